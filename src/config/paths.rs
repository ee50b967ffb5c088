//! Path management for carryover
//!
//! Provides XDG-compliant path resolution for the directory holding the
//! settings backup file.
//!
//! ## Path Resolution Order
//!
//! 1. `CARRYOVER_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/carryover` or `~/.config/carryover`
//! 3. Windows: `%APPDATA%\carryover`

use std::path::{Path, PathBuf};

use crate::error::CarryoverError;

/// Default name of the settings backup file
pub const DEFAULT_BACKUP_FILE: &str = "default.legacy.json";

/// Manages the paths used by carryover
#[derive(Debug, Clone)]
pub struct CarryoverPaths {
    /// Base directory holding the backup file
    base_dir: PathBuf,
}

impl CarryoverPaths {
    /// Create a new CarryoverPaths instance
    ///
    /// Path resolution:
    /// 1. `CARRYOVER_DATA_DIR` env var (explicit override)
    /// 2. Unix: `$XDG_CONFIG_HOME/carryover` or `~/.config/carryover`
    /// 3. Windows: `%APPDATA%\carryover`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, CarryoverError> {
        let base_dir = if let Ok(custom) = std::env::var("CARRYOVER_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create CarryoverPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/carryover/ or equivalent)
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a backup file with the given name
    pub fn backup_file(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Get the path to the default backup file
    pub fn default_backup_file(&self) -> PathBuf {
        self.backup_file(DEFAULT_BACKUP_FILE)
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), CarryoverError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CarryoverError::Io(format!("Failed to create base directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, CarryoverError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME")
                .map_err(|_| CarryoverError::Config("Could not determine home directory".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("carryover"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, CarryoverError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| CarryoverError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("carryover"))
}
