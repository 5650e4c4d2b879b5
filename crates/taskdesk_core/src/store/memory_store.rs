//! In-memory task store for tests and embedders without a data file.

use super::{StoreResult, TaskStore};
use crate::model::task::Task;
use std::cell::{Cell, RefCell};

/// Keeps the last saved snapshot in memory.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    tasks: RefCell<Vec<Task>>,
    saves: Cell<usize>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store as if `tasks` had already been persisted.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RefCell::new(tasks),
            saves: Cell::new(0),
        }
    }

    /// Returns a copy of the last saved collection.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    /// Number of `save_all` calls observed.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl TaskStore for MemoryTaskStore {
    fn load_all(&self) -> StoreResult<Vec<Task>> {
        Ok(self.snapshot())
    }

    fn save_all(&self, tasks: &[Task]) -> StoreResult<()> {
        *self.tasks.borrow_mut() = tasks.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
