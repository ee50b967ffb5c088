use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use carryover::cli::{handle_legacy_command, LegacyCommands};
use carryover::config::paths::{CarryoverPaths, DEFAULT_BACKUP_FILE};

#[derive(Parser)]
#[command(
    name = "carryover",
    author = "Kaylee Beyene",
    version,
    about = "Preserve selected application settings across reinstalls and upgrades",
    long_about = "carryover keeps an allow-listed subset of an application's \
                  settings in a separate backup file and restores them after \
                  the primary configuration has been reset or regenerated."
)]
struct Cli {
    /// Directory containing the backup file (defaults to the platform config dir)
    #[arg(long, env = "CARRYOVER_DATA_DIR", global = true)]
    dir: Option<PathBuf>,

    /// Backup file name
    #[arg(long, default_value = DEFAULT_BACKUP_FILE, global = true)]
    file: String,

    #[command(subcommand)]
    command: LegacyCommands,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let paths = match cli.dir {
        Some(dir) => CarryoverPaths::with_base_dir(dir),
        None => CarryoverPaths::new()?,
    };

    handle_legacy_command(&paths, &cli.file, cli.command)?;

    Ok(())
}
