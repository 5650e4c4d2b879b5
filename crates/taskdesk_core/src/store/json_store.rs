//! JSON file task store.
//!
//! # Responsibility
//! - Persist the full task collection as one pretty-printed JSON array.
//! - Recover missing, empty or unreadable files as an empty collection.
//!
//! # Invariants
//! - Writes go to a sibling temp file and are renamed over the target, so
//!   readers never observe a partially written file.
//! - After any recovery the file on disk holds a valid empty array (`[]`).
//!
//! # See also
//! - `crate::model::task::Task` for the record shape.

use super::{StoreError, StoreResult, TaskStore};
use crate::model::task::Task;
use log::{error, info, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

const EMPTY_COLLECTION: &[u8] = b"[]";
const INDENT: &[u8] = b"    ";
const TEMP_SUFFIX: &str = ".tmp";

/// Task store backed by a single JSON document.
#[derive(Debug, Clone)]
pub struct JsonTaskStore {
    path: PathBuf,
}

impl JsonTaskStore {
    /// Opens a store at `path`, creating parent directories and an empty
    /// collection file when missing.
    ///
    /// # Errors
    /// - `StoreError::Io` when the directory or file cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = Self { path: path.into() };

        if let Some(parent) = store.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
            }
        }

        if !store.path.exists() {
            info!(
                "event=store_open module=store status=ok action=create path={}",
                store.path.display()
            );
            store.write_atomic(EMPTY_COLLECTION)?;
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("tasks"));
        name.push(TEMP_SUFFIX);
        self.path.with_file_name(name)
    }

    fn write_atomic(&self, contents: &[u8]) -> StoreResult<()> {
        let temp_path = self.temp_path();
        fs::write(&temp_path, contents).map_err(|err| StoreError::io(&temp_path, err))?;
        if let Err(err) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::io(&self.path, err));
        }
        Ok(())
    }

    fn reset(&self, reason: &str) -> StoreResult<Vec<Task>> {
        warn!(
            "event=store_reset module=store status=recovered reason={} path={}",
            reason,
            self.path.display()
        );
        self.write_atomic(EMPTY_COLLECTION)?;
        Ok(Vec::new())
    }
}

impl TaskStore for JsonTaskStore {
    fn load_all(&self) -> StoreResult<Vec<Task>> {
        let started_at = Instant::now();

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=store_load module=store status=ok action=create path={}",
                    self.path.display()
                );
                self.write_atomic(EMPTY_COLLECTION)?;
                return Ok(Vec::new());
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=error error_code=read_failed error={}",
                    err
                );
                return self.reset("unreadable");
            }
        };

        if content.trim().is_empty() {
            return self.reset("empty");
        }

        match serde_json::from_str::<Vec<Task>>(&content) {
            Ok(tasks) => {
                info!(
                    "event=store_load module=store status=ok count={} duration_ms={}",
                    tasks.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(tasks)
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=error error_code=parse_failed line={} column={}",
                    err.line(),
                    err.column()
                );
                self.reset("corrupted")
            }
        }
    }

    fn save_all(&self, tasks: &[Task]) -> StoreResult<()> {
        let started_at = Instant::now();

        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
        tasks.serialize(&mut serializer)?;

        match self.write_atomic(&buffer) {
            Ok(()) => {
                info!(
                    "event=store_save module=store status=ok count={} duration_ms={}",
                    tasks.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=store status=error error_code=write_failed error={}",
                    err
                );
                Err(err)
            }
        }
    }
}
