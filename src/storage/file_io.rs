//! File I/O utilities with atomic writes
//!
//! Implements the structured-document file contract used by the backup
//! store: reads collapse every failure into a single sentinel, and writes
//! are whole-document and atomic so readers never observe partial content.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CarryoverError;

/// Read a JSON document from a file, requiring a top-level object
///
/// Returns `None` when the file is missing or unreadable, when its content
/// is not valid JSON, or when the parsed document is not an object (scalars,
/// arrays, and null all count as failures). All failure cases collapse into
/// the one sentinel; no error detail is preserved.
pub fn read_json_object<P: AsRef<Path>>(path: P) -> Option<Map<String, Value>> {
    let file = File::open(path.as_ref()).ok()?;
    let reader = BufReader::new(file);
    let document: Value = serde_json::from_reader(reader).ok()?;

    match document {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The document is pretty-printed for human readability. The target file is
/// either completely replaced or not modified at all, preventing corruption
/// on crashes or power failures.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), CarryoverError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CarryoverError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Create temp file in same directory (important for atomic rename)
    let temp_path = path.with_extension("json.tmp");

    // Write to temp file
    let file = File::create(&temp_path)
        .map_err(|e| CarryoverError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| CarryoverError::Json(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| CarryoverError::Io(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| CarryoverError::Io(format!("Failed to sync data: {}", e)))?;

    // Atomic rename
    fs::rename(&temp_path, path).map_err(|e| {
        // Try to clean up temp file if rename fails
        let _ = fs::remove_file(&temp_path);
        CarryoverError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
