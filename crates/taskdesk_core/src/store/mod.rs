//! Whole-collection task persistence.
//!
//! # Responsibility
//! - Define the `TaskStore` contract used by `TaskManager`.
//! - Isolate file format and I/O details from service orchestration.
//!
//! # Invariants
//! - `save_all` always rewrites the full collection, never a delta.
//! - `load_all` preserves persisted order.
//! - Missing or corrupted data is recovered as an empty collection; write
//!   failures propagate.

use crate::model::task::Task;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod json_store;
pub mod memory_store;

pub use json_store::JsonTaskStore;
pub use memory_store::MemoryTaskStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Unrecovered persistence failure.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Encode(serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "task file `{}`: {source}", path.display()),
            Self::Encode(err) => write!(f, "failed to encode tasks: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Durable snapshot of the full task collection.
pub trait TaskStore {
    /// Loads every persisted task in stored order.
    fn load_all(&self) -> StoreResult<Vec<Task>>;

    /// Replaces the persisted collection with `tasks`.
    fn save_all(&self, tasks: &[Task]) -> StoreResult<()>;
}
