//! carryover - Preserve selected application settings across upgrades
//!
//! This library maintains a separate, versioned-by-convention backup file
//! for a restricted set of application settings. When the application is
//! reinstalled or upgraded and its primary configuration is reset or
//! regenerated, the previously chosen settings can be merged back in from
//! the backup.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution for the backup file directory
//! - `error`: Custom error types
//! - `storage`: JSON file I/O with atomic writes
//! - `logging`: Message sink injected into the store
//! - `backup`: The settings backup store itself
//! - `cli`: Command handlers for the carryover binary
//!
//! # Example
//!
//! ```rust,ignore
//! use carryover::backup::{LegacyOptions, LegacyStore};
//! use carryover::config::CarryoverPaths;
//! use serde_json::json;
//!
//! let paths = CarryoverPaths::new()?;
//! let mut store = LegacyStore::new(LegacyOptions {
//!     file: None,
//!     path: paths.base_dir().to_path_buf(),
//!     keys: vec!["theme".into(), "locale".into()],
//! });
//!
//! store.update(&json!({"theme": "dark", "locale": "en-US"}));
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod storage;

pub use backup::{LegacyOptions, LegacyStore};
pub use error::CarryoverError;
