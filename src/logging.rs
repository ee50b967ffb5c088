//! Logging collaborator for the backup store
//!
//! The store reports progress and errors through the [`BackupLog`] trait:
//! fire-and-forget message emission with no return value. The default
//! implementation forwards to the `log` facade with a fixed label prefix
//! chosen at construction, so every line the store emits can be attributed
//! to its backup file without the store knowing about sinks or formatting.

/// Message sink used by the backup store
///
/// Implementations must not fail; delivery is best-effort and carries no
/// acknowledgment.
pub trait BackupLog {
    /// Report a progress message
    fn info(&self, message: &str);

    /// Report an error message
    fn error(&self, message: &str);
}

/// A [`BackupLog`] that forwards to the `log` facade
///
/// Each message is prefixed with a fixed label, e.g.
/// `LegacyStore: settings backup file saved`.
#[derive(Debug, Clone)]
pub struct LabelLog {
    label: String,
}

impl LabelLog {
    /// Create a logger with the given label prefix
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Get the label prefix
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl BackupLog for LabelLog {
    fn info(&self, message: &str) {
        log::info!("{}: {}", self.label, message);
    }

    fn error(&self, message: &str) {
        log::error!("{}: {}", self.label, message);
    }
}
