//! Settings backup store
//!
//! The stateful core of carryover. [`LegacyStore`] keeps an in-memory
//! snapshot of an allow-listed subset of the application's settings,
//! detects when that snapshot actually changed relative to what is
//! persisted, and rewrites the backup file only on real change.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::backup::diff::format_transition;
use crate::config::paths::DEFAULT_BACKUP_FILE;
use crate::error::{CarryoverError, CarryoverResult};
use crate::logging::{BackupLog, LabelLog};
use crate::storage::file_io;

/// Construction-time configuration for [`LegacyStore`]
#[derive(Debug, Clone)]
pub struct LegacyOptions {
    /// Backup file name; `None` selects `default.legacy.json`
    pub file: Option<String>,
    /// Directory containing the backup file
    pub path: PathBuf,
    /// Names of the settings to track
    pub keys: Vec<String>,
}

/// Preserves a chosen subset of settings in a separate backup file
///
/// The store is constructed with its file location and tracked-key set and
/// performs no I/O until the first operation. Its snapshot is populated
/// lazily: either implicitly by the first [`update`](LegacyStore::update)
/// call, which loads the existing backup file if one is valid, or
/// explicitly via [`load`](LegacyStore::load).
///
/// A store instance is the single logical owner of its backup file;
/// `update` takes `&mut self`, so concurrent read-modify-write sequences
/// on one instance cannot be expressed without an external sharing wrapper.
pub struct LegacyStore {
    /// Full path to the backup file
    path: PathBuf,
    /// Ordered allow-list of tracked setting names
    tracked_keys: Vec<String>,
    /// In-memory snapshot; `None` until the first load or update
    snapshot: Option<Map<String, Value>>,
    /// Injected message sink
    log: Box<dyn BackupLog>,
}

impl LegacyStore {
    /// Create a store that reports through the default labeled logger
    pub fn new(options: LegacyOptions) -> Self {
        Self::with_logger(options, Box::new(LabelLog::new("LegacyStore")))
    }

    /// Create a store with an explicitly injected logger
    pub fn with_logger(options: LegacyOptions, log: Box<dyn BackupLog>) -> Self {
        let file = options
            .file
            .unwrap_or_else(|| DEFAULT_BACKUP_FILE.to_string());
        let path = options.path.join(file);

        // Keep first-occurrence order, drop duplicates
        let mut tracked_keys: Vec<String> = Vec::with_capacity(options.keys.len());
        for key in options.keys {
            if !tracked_keys.contains(&key) {
                tracked_keys.push(key);
            }
        }

        Self {
            path,
            tracked_keys,
            snapshot: None,
            log,
        }
    }

    /// Get the full path to the backup file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the names of the settings this store tracks
    pub fn tracked_keys(&self) -> &[String] {
        &self.tracked_keys
    }

    /// Get the in-memory snapshot, if it has been loaded
    pub fn snapshot(&self) -> Option<&Map<String, Value>> {
        self.snapshot.as_ref()
    }

    /// Check whether the backup file exists and holds a JSON object
    ///
    /// Any read failure (missing file, unreadable file, malformed JSON,
    /// non-object document) folds into `false`.
    pub fn validate(&self) -> bool {
        file_io::read_json_object(&self.path).is_some()
    }

    /// Merge settings into the in-memory snapshot without touching disk
    ///
    /// Only keys present in the tracked set participate; everything else is
    /// ignored. Returns the number of values that changed. `Ok(0)` means the
    /// snapshot already matched the input and no write is needed — callers
    /// treat it exactly like a no-op.
    ///
    /// The first successful call initializes the snapshot. Transitions are
    /// not logged for that call, since there are no prior values to compare
    /// against; later calls log each change.
    ///
    /// # Errors
    ///
    /// Returns [`CarryoverError::InvalidSettings`] when `settings` is not a
    /// JSON object. The snapshot is left untouched in that case.
    pub fn update_data(&mut self, settings: &Value) -> CarryoverResult<usize> {
        let incoming = settings
            .as_object()
            .ok_or(CarryoverError::InvalidSettings)?;

        let first_update = self.snapshot.is_none();
        let data = self.snapshot.get_or_insert_with(Map::new);

        let mut changed = 0;
        for (key, value) in incoming {
            if !self.tracked_keys.contains(key) {
                continue;
            }
            if data.get(key) == Some(value) {
                continue;
            }
            if !first_update {
                self.log.info(&format_transition(key, data.get(key), value));
            }
            data.insert(key.clone(), value.clone());
            changed += 1;
        }

        Ok(changed)
    }

    /// Load the backup file and merge it into the snapshot
    ///
    /// Returns the raw parsed document. Loading follows the same first-call
    /// vs incremental semantics as [`update_data`](LegacyStore::update_data).
    ///
    /// # Errors
    ///
    /// Returns [`CarryoverError::BackupUnavailable`] when the file is
    /// missing, unreadable, or not a JSON object; the error is also logged
    /// and the snapshot is left untouched.
    pub fn load(&mut self) -> CarryoverResult<Map<String, Value>> {
        self.log.info(&format!(
            "Reading settings backup file {}...",
            self.path.display()
        ));

        let document = match file_io::read_json_object(&self.path) {
            Some(document) => document,
            None => {
                self.log.error(&format!(
                    "Settings backup file {} is missing or unreadable",
                    self.path.display()
                ));
                return Err(CarryoverError::backup_unavailable(
                    self.path.display().to_string(),
                ));
            }
        };

        self.update_data(&Value::Object(document.clone()))?;
        Ok(document)
    }

    /// Serialize a settings document to the backup file
    ///
    /// Keys outside the tracked set are dropped at write time. The write is
    /// atomic from the caller's point of view: it either fully succeeds or
    /// surfaces the underlying I/O failure, and a concurrent reader never
    /// observes partial content.
    pub fn save(&self, data: &Map<String, Value>) -> CarryoverResult<()> {
        let document: Map<String, Value> = data
            .iter()
            .filter(|(key, _)| self.tracked_keys.contains(*key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        file_io::write_json_atomic(&self.path, &document)
    }

    /// Bring the backup file up to date with the application's settings
    ///
    /// The orchestrating entry point, intended to be called with the live
    /// configuration whenever it changes. Seeds the snapshot from the
    /// backup file on first use, merges `settings`, and rewrites the file
    /// only if at least one tracked value changed. Returns `true` when the
    /// file was written.
    ///
    /// Every failure — invalid input, an unreadable backup mid-load, a
    /// failed write — is logged and folded into `false`; no error escapes
    /// this method.
    pub fn update(&mut self, settings: &Value) -> bool {
        self.log.info("Updating settings backup file...");

        match self.try_update(settings) {
            Ok(saved) => saved,
            Err(err) => {
                self.log
                    .error(&format!("Failed to update settings backup file: {}", err));
                false
            }
        }
    }

    fn try_update(&mut self, settings: &Value) -> CarryoverResult<bool> {
        if !settings.is_object() {
            return Err(CarryoverError::InvalidSettings);
        }

        // Seed the snapshot from disk on first use. An invalid or missing
        // backup file is not fatal: update_data below starts fresh instead.
        if self.snapshot.is_none() && self.validate() {
            self.load()?;
        }

        let changed = self.update_data(settings)?;
        if changed == 0 {
            self.log
                .info("Backup settings unchanged, no file update needed");
            return Ok(false);
        }

        // update_data loaded the snapshot above
        if let Some(data) = &self.snapshot {
            self.save(data)?;
        }

        self.log.info("Settings backup file saved");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// A logger that captures messages for assertions
    #[derive(Clone, Default)]
    struct MemoryLog {
        messages: Arc<Mutex<Vec<String>>>,
    }

    impl MemoryLog {
        fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl BackupLog for MemoryLog {
        fn info(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }

        fn error(&self, message: &str) {
            self.messages
                .lock()
                .unwrap()
                .push(format!("error: {}", message));
        }
    }

    fn test_options(dir: &TempDir) -> LegacyOptions {
        LegacyOptions {
            file: Some("test.legacy.json".to_string()),
            path: dir.path().to_path_buf(),
            keys: vec!["option1".to_string(), "option2".to_string()],
        }
    }

    fn create_test_store() -> (LegacyStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = LegacyStore::new(test_options(&temp_dir));
        (store, temp_dir)
    }

    fn mock_settings() -> Value {
        json!({"option1": "val1", "option2": "val2"})
    }

    fn backup_path(dir: &TempDir) -> std::path::PathBuf {
        dir.path().join("test.legacy.json")
    }

    #[test]
    fn test_default_file_name() {
        let temp_dir = TempDir::new().unwrap();
        let store = LegacyStore::new(LegacyOptions {
            file: None,
            path: temp_dir.path().to_path_buf(),
            keys: Vec::new(),
        });

        assert_eq!(store.path(), temp_dir.path().join("default.legacy.json"));
    }

    #[test]
    fn test_tracked_keys_deduplicated() {
        let temp_dir = TempDir::new().unwrap();
        let store = LegacyStore::new(LegacyOptions {
            file: None,
            path: temp_dir.path().to_path_buf(),
            keys: vec![
                "option2".to_string(),
                "option1".to_string(),
                "option2".to_string(),
            ],
        });

        assert_eq!(store.tracked_keys(), ["option2", "option1"]);
    }

    #[test]
    fn test_validate_missing_file() {
        let (store, _temp) = create_test_store();
        assert!(!store.validate());
    }

    #[test]
    fn test_validate_non_json_content() {
        let (store, temp) = create_test_store();
        std::fs::write(backup_path(&temp), "Some data").unwrap();

        assert!(!store.validate());
    }

    #[test]
    fn test_validate_non_object_json() {
        let (store, temp) = create_test_store();
        std::fs::write(backup_path(&temp), "[1, 2, 3]").unwrap();

        assert!(!store.validate());
    }

    #[test]
    fn test_validate_json_object() {
        let (store, temp) = create_test_store();
        std::fs::write(backup_path(&temp), r#"{"option1": "val1"}"#).unwrap();

        assert!(store.validate());
    }

    #[test]
    fn test_first_update_counts_every_tracked_key() {
        let (mut store, _temp) = create_test_store();

        let changed = store.update_data(&mock_settings()).unwrap();

        assert_eq!(changed, 2);
        assert_eq!(
            store.snapshot().unwrap(),
            mock_settings().as_object().unwrap()
        );
    }

    #[test]
    fn test_update_data_idempotent() {
        let (mut store, _temp) = create_test_store();
        store.update_data(&mock_settings()).unwrap();

        let changed = store.update_data(&mock_settings()).unwrap();

        assert_eq!(changed, 0);
        assert_eq!(
            store.snapshot().unwrap(),
            mock_settings().as_object().unwrap()
        );
    }

    #[test]
    fn test_update_data_counts_partial_change() {
        let (mut store, _temp) = create_test_store();
        store.update_data(&mock_settings()).unwrap();

        let changed = store
            .update_data(&json!({"option1": "val1", "option2": 99}))
            .unwrap();

        assert_eq!(changed, 1);
        assert_eq!(store.snapshot().unwrap().get("option2"), Some(&json!(99)));
        assert_eq!(
            store.snapshot().unwrap().get("option1"),
            Some(&json!("val1"))
        );
    }

    #[test]
    fn test_untracked_keys_are_filtered() {
        let (mut store, _temp) = create_test_store();

        let changed = store
            .update_data(&json!({"option1": "val1", "extra": true}))
            .unwrap();

        assert_eq!(changed, 1);
        assert!(store.snapshot().unwrap().get("extra").is_none());
    }

    #[test]
    fn test_update_data_rejects_non_object() {
        let (mut store, _temp) = create_test_store();

        let err = store.update_data(&json!("not an object")).unwrap_err();

        assert!(err.is_invalid_settings());
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn test_empty_object_still_initializes_snapshot() {
        let (mut store, _temp) = create_test_store();

        let changed = store.update_data(&json!({})).unwrap();

        assert_eq!(changed, 0);
        // Loaded-but-empty is distinct from never-loaded
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_never_reverts_to_unloaded() {
        let (mut store, _temp) = create_test_store();
        store.update_data(&mock_settings()).unwrap();

        assert!(store.update_data(&json!(42)).is_err());
        assert!(store.snapshot().is_some());
    }

    #[test]
    fn test_load_missing_file() {
        let (mut store, _temp) = create_test_store();

        let result = store.load();

        assert!(matches!(result, Err(CarryoverError::BackupUnavailable(_))));
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn test_load_returns_document_and_seeds_snapshot() {
        let (mut store, temp) = create_test_store();
        std::fs::write(
            backup_path(&temp),
            serde_json::to_string(&mock_settings()).unwrap(),
        )
        .unwrap();

        let document = store.load().unwrap();

        assert_eq!(&document, mock_settings().as_object().unwrap());
        assert_eq!(
            store.snapshot().unwrap(),
            mock_settings().as_object().unwrap()
        );
    }

    #[test]
    fn test_update_end_to_end() {
        let (mut store, temp) = create_test_store();

        // First update on an empty directory writes the file
        assert!(store.update(&mock_settings()));
        let written = file_io::read_json_object(backup_path(&temp)).unwrap();
        assert_eq!(&written, mock_settings().as_object().unwrap());

        // An identical second update changes nothing
        let before = std::fs::read_to_string(backup_path(&temp)).unwrap();
        assert!(!store.update(&mock_settings()));
        let after = std::fs::read_to_string(backup_path(&temp)).unwrap();
        assert_eq!(before, after);

        // A changed value rewrites the file with the merged document
        assert!(store.update(&json!({"option2": 150})));
        let written = file_io::read_json_object(backup_path(&temp)).unwrap();
        assert_eq!(written.get("option1"), Some(&json!("val1")));
        assert_eq!(written.get("option2"), Some(&json!(150)));
    }

    #[test]
    fn test_update_rejects_invalid_input() {
        let (mut store, temp) = create_test_store();

        assert!(!store.update(&json!("not an object")));
        assert!(!store.update(&json!(null)));
        assert!(!backup_path(&temp).exists());
    }

    #[test]
    fn test_update_with_empty_settings_needs_no_write() {
        let (mut store, temp) = create_test_store();

        assert!(!store.update(&json!({})));
        assert!(!backup_path(&temp).exists());
    }

    #[test]
    fn test_update_seeds_from_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            backup_path(&temp_dir),
            serde_json::to_string(&mock_settings()).unwrap(),
        )
        .unwrap();

        // A fresh store (new process) picks up the persisted snapshot, so
        // identical settings require no write
        let mut store = LegacyStore::new(test_options(&temp_dir));
        assert!(!store.update(&mock_settings()));

        // A changed value still merges into the persisted document
        assert!(store.update(&json!({"option2": 150})));
        let written = file_io::read_json_object(backup_path(&temp_dir)).unwrap();
        assert_eq!(written.get("option1"), Some(&json!("val1")));
        assert_eq!(written.get("option2"), Some(&json!(150)));
    }

    #[test]
    fn test_update_starts_fresh_on_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(backup_path(&temp_dir), "corrupt {").unwrap();

        let mut store = LegacyStore::new(test_options(&temp_dir));

        assert!(store.update(&mock_settings()));
        let written = file_io::read_json_object(backup_path(&temp_dir)).unwrap();
        assert_eq!(&written, mock_settings().as_object().unwrap());
    }

    #[test]
    fn test_save_round_trip() {
        let (mut store, _temp) = create_test_store();
        let document = mock_settings().as_object().unwrap().clone();

        store.save(&document).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, document);
    }

    #[test]
    fn test_save_filters_untracked_keys() {
        let (store, temp) = create_test_store();
        let mut document = mock_settings().as_object().unwrap().clone();
        document.insert("extra".to_string(), json!("dropped"));

        store.save(&document).unwrap();

        let written = file_io::read_json_object(backup_path(&temp)).unwrap();
        assert!(written.get("extra").is_none());
        assert_eq!(written.len(), 2);
    }

    #[test]
    fn test_first_load_suppresses_transition_messages() {
        let temp_dir = TempDir::new().unwrap();
        let log = MemoryLog::default();
        let mut store = LegacyStore::with_logger(test_options(&temp_dir), Box::new(log.clone()));

        store.update_data(&mock_settings()).unwrap();
        assert!(log.messages().is_empty());

        store.update_data(&json!({"option2": 150})).unwrap();
        let messages = log.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0], "option2: \"val2\" -> 150");
    }
}
