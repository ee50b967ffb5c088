//! Settings backup system for carryover
//!
//! Preserves a chosen subset of an application's settings across reinstalls
//! and upgrades by mirroring them into a separate JSON backup file.
//!
//! # Architecture
//!
//! The backup system consists of two components:
//!
//! - `LegacyStore`: The stateful core. It keeps an in-memory snapshot of the
//!   tracked settings, bootstraps that snapshot from the backup file on
//!   first use, and rewrites the file only when a tracked value actually
//!   changed.
//! - `format_transition`: Utility to render human-readable change messages
//!   for the store's logging.
//!
//! # Backup File Format
//!
//! One pretty-printed JSON object holding only tracked keys. There is no
//! version field; schema evolution is handled entirely by changing the
//! tracked-key set between releases — old keys simply stop being written
//! and read.
//!
//! # Example
//!
//! ```rust,ignore
//! use carryover::backup::{LegacyOptions, LegacyStore};
//! use serde_json::json;
//!
//! let mut store = LegacyStore::new(LegacyOptions {
//!     file: None,
//!     path: config_dir,
//!     keys: vec!["theme".into(), "locale".into()],
//! });
//!
//! // Call with the live configuration whenever it changes; the backup
//! // file is rewritten only when a tracked value differs.
//! store.update(&json!({"theme": "dark", "locale": "en-US"}));
//! ```

mod diff;
mod store;

pub use diff::{format_transition, format_value};
pub use store::{LegacyOptions, LegacyStore};
