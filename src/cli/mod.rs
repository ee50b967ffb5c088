//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the backup store.

use std::path::PathBuf;

use clap::Subcommand;
use serde_json::Value;

use crate::backup::{LegacyOptions, LegacyStore};
use crate::config::paths::CarryoverPaths;
use crate::error::{CarryoverError, CarryoverResult};
use crate::storage::file_io;

/// Backup store subcommands
#[derive(Subcommand)]
pub enum LegacyCommands {
    /// Check that the backup file exists and holds a settings document
    Validate,

    /// Print the backup file contents
    Show,

    /// Merge a settings document into the backup file
    Update {
        /// Path to a JSON file holding the application's current settings
        settings: PathBuf,

        /// Comma-separated setting names to track
        #[arg(short, long, value_delimiter = ',', required = true)]
        keys: Vec<String>,
    },

    /// Show the resolved configuration and paths
    Config,
}

/// Handle a backup store command
pub fn handle_legacy_command(
    paths: &CarryoverPaths,
    file: &str,
    cmd: LegacyCommands,
) -> CarryoverResult<()> {
    match cmd {
        LegacyCommands::Validate => {
            let store = LegacyStore::new(LegacyOptions {
                file: Some(file.to_string()),
                path: paths.base_dir().to_path_buf(),
                keys: Vec::new(),
            });

            if store.validate() {
                println!("Backup file is valid: {}", store.path().display());
            } else {
                println!(
                    "Backup file is missing or invalid: {}",
                    store.path().display()
                );
            }
        }

        LegacyCommands::Show => {
            let path = paths.backup_file(file);
            let document = file_io::read_json_object(&path).ok_or_else(|| {
                CarryoverError::backup_unavailable(path.display().to_string())
            })?;

            println!("{}", serde_json::to_string_pretty(&document)?);
        }

        LegacyCommands::Update { settings, keys } => {
            let contents = std::fs::read_to_string(&settings).map_err(|e| {
                CarryoverError::Io(format!(
                    "Failed to read settings file {}: {}",
                    settings.display(),
                    e
                ))
            })?;

            let document: Value = serde_json::from_str(&contents).map_err(|e| {
                CarryoverError::Json(format!(
                    "Failed to parse settings file {}: {}",
                    settings.display(),
                    e
                ))
            })?;

            // Reject non-object documents here so the failure reaches the
            // exit code instead of being absorbed by the store
            if !document.is_object() {
                return Err(CarryoverError::InvalidSettings);
            }

            paths.ensure_directories()?;

            let mut store = LegacyStore::new(LegacyOptions {
                file: Some(file.to_string()),
                path: paths.base_dir().to_path_buf(),
                keys,
            });

            if store.update(&document) {
                println!("Backup updated: {}", store.path().display());
            } else {
                println!("No update needed.");
            }
        }

        LegacyCommands::Config => {
            println!("carryover Configuration");
            println!("=======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Backup file:    {}", paths.backup_file(file).display());
        }
    }

    Ok(())
}
