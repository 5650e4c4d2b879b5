//! Task manager use-case service.
//!
//! # Responsibility
//! - Own the authoritative in-memory task collection.
//! - Provide CRUD, lookup and priority ordering for presentation callers.
//! - Persist the whole collection through `TaskStore` after every change.
//!
//! # Invariants
//! - The collection is loaded from the store exactly once, at construction.
//! - Every mutating call (add/update/delete/sort/apply) ends with a full save.
//! - Ids are unique within the collection.
//! - Not-found is reported through return values, never as an error.
//!
//! # Concurrency
//! - Single owner, no internal locking. Multi-threaded embedders wrap the
//!   manager in one `Mutex`.

use crate::model::task::{generate_task_id, Task, TaskId};
use crate::store::{StoreResult, TaskStore};
use crate::strategy::priority::PriorityStrategy;
use log::{info, warn};
use std::collections::HashSet;

/// In-memory task collection backed by a `TaskStore`.
pub struct TaskManager<S: TaskStore> {
    store: S,
    tasks: Vec<Task>,
}

impl<S: TaskStore> TaskManager<S> {
    /// Loads the full collection from `store`.
    ///
    /// Later records repeating an earlier id get a fresh id, so hand-edited
    /// files cannot break id uniqueness.
    ///
    /// # Errors
    /// - Propagates unrecovered store failures (e.g. reset write failed).
    pub fn new(store: S) -> StoreResult<Self> {
        let mut tasks = store.load_all()?;
        dedupe_ids(&mut tasks);
        info!(
            "event=manager_open module=service status=ok count={}",
            tasks.len()
        );
        Ok(Self { store, tasks })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current collection in display order.
    pub fn get_all_tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Finds a task by id.
    pub fn get_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Appends `task` and persists.
    ///
    /// A missing id is generated. An id already present in the collection is
    /// replaced with a fresh one so ids stay unique. Returns the stored id.
    pub fn add_task(&mut self, mut task: Task) -> StoreResult<TaskId> {
        task.ensure_id();
        if self.get_task(&task.id).is_some() {
            let fresh = generate_task_id();
            warn!(
                "event=task_add module=service status=reassigned duplicate_id={} task_id={}",
                task.id, fresh
            );
            task.id = fresh;
        }

        let id = task.id.clone();
        self.tasks.push(task);
        self.save()?;
        info!(
            "event=task_add module=service status=ok task_id={} count={}",
            id,
            self.tasks.len()
        );
        Ok(id)
    }

    /// Replaces the task with the same id in place and persists.
    ///
    /// Returns `false` when no task has that id; the unchanged collection is
    /// still persisted.
    pub fn update_task(&mut self, task: Task) -> StoreResult<bool> {
        let id = task.id.clone();
        let replaced = match self.tasks.iter_mut().find(|existing| existing.id == id) {
            Some(existing) => {
                *existing = task;
                true
            }
            None => false,
        };

        self.save()?;
        if replaced {
            info!("event=task_update module=service status=ok task_id={id}");
        } else {
            warn!("event=task_update module=service status=not_found task_id={id}");
        }
        Ok(replaced)
    }

    /// Removes every task with `id` and persists. Returns the removed count.
    pub fn delete_task(&mut self, id: &str) -> StoreResult<usize> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = before - self.tasks.len();

        self.save()?;
        info!(
            "event=task_delete module=service status=ok task_id={} removed={}",
            id, removed
        );
        Ok(removed)
    }

    /// Stable sort by priority, then persists the new order.
    pub fn sort_tasks(&mut self, descending: bool) -> StoreResult<()> {
        if descending {
            self.tasks.sort_by(|a, b| b.priority.cmp(&a.priority));
        } else {
            self.tasks.sort_by_key(|task| task.priority);
        }

        self.save()?;
        info!(
            "event=task_sort module=service status=ok descending={} count={}",
            descending,
            self.tasks.len()
        );
        Ok(())
    }

    /// Runs `strategy` on the stored task with `id` and persists.
    ///
    /// Returns the new priority, or `None` when the id is unknown (nothing is
    /// written in that case).
    pub fn apply_priority(
        &mut self,
        id: &str,
        strategy: &dyn PriorityStrategy,
    ) -> StoreResult<Option<i64>> {
        let priority = match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => strategy.assign_priority(task).priority,
            None => return Ok(None),
        };

        self.save()?;
        Ok(Some(priority))
    }

    /// Runs `strategy` on every task and persists. Returns the task count.
    pub fn apply_priority_all(&mut self, strategy: &dyn PriorityStrategy) -> StoreResult<usize> {
        for task in &mut self.tasks {
            strategy.assign_priority(task);
        }

        self.save()?;
        info!(
            "event=priority_assign module=service status=ok strategy={} count={}",
            strategy.name(),
            self.tasks.len()
        );
        Ok(self.tasks.len())
    }

    /// Writes the current collection through the store.
    pub fn save(&self) -> StoreResult<()> {
        self.store.save_all(&self.tasks)
    }
}

fn dedupe_ids(tasks: &mut [Task]) {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks.iter_mut() {
        if seen.insert(task.id.clone()) {
            continue;
        }
        let fresh = generate_task_id();
        warn!(
            "event=manager_open module=service status=reassigned duplicate_id={} task_id={}",
            task.id, fresh
        );
        task.id = fresh.clone();
        seen.insert(fresh);
    }
}

#[cfg(test)]
mod tests {
    use super::TaskManager;
    use crate::model::task::Task;
    use crate::store::MemoryTaskStore;
    use chrono::NaiveDate;

    fn task(title: &str, priority: i64) -> Task {
        let deadline = NaiveDate::from_ymd_opt(2025, 12, 31).expect("valid calendar date");
        Task::new(title, "d", "c", deadline).with_priority(priority)
    }

    #[test]
    fn every_mutation_saves_once() {
        let mut manager = TaskManager::new(MemoryTaskStore::new()).expect("manager should load");
        let id = manager.add_task(task("a", 1)).expect("add should persist");
        assert_eq!(manager.store().save_count(), 1);

        let mut edited = manager.get_task(&id).expect("task should exist").clone();
        edited.title = "b".to_string();
        manager.update_task(edited).expect("update should persist");
        assert_eq!(manager.store().save_count(), 2);

        manager.sort_tasks(true).expect("sort should persist");
        assert_eq!(manager.store().save_count(), 3);

        manager.delete_task(&id).expect("delete should persist");
        assert_eq!(manager.store().save_count(), 4);
        assert!(manager.store().snapshot().is_empty());
    }

    #[test]
    fn add_replaces_duplicate_id() {
        let mut manager = TaskManager::new(MemoryTaskStore::new()).expect("manager should load");
        let first = task("a", 1);
        let duplicate = first.clone();

        let first_id = manager.add_task(first).expect("add should persist");
        let second_id = manager.add_task(duplicate).expect("add should persist");

        assert_ne!(first_id, second_id);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn add_generates_missing_id() {
        let mut manager = TaskManager::new(MemoryTaskStore::new()).expect("manager should load");
        let mut anonymous = task("a", 1);
        anonymous.id.clear();

        let id = manager.add_task(anonymous).expect("add should persist");
        assert!(!id.is_empty());
        assert_eq!(manager.get_task(&id).expect("task should exist").title, "a");
    }

    #[test]
    fn ascending_sort_is_stable() {
        let mut manager = TaskManager::new(MemoryTaskStore::new()).expect("manager should load");
        for (title, priority) in [("x", 3), ("y", 1), ("z", 3), ("w", 1)] {
            manager.add_task(task(title, priority)).expect("add should persist");
        }

        manager.sort_tasks(false).expect("sort should persist");
        let titles: Vec<&str> = manager
            .get_all_tasks()
            .iter()
            .map(|task| task.title.as_str())
            .collect();
        assert_eq!(titles, ["y", "w", "x", "z"]);

        manager.sort_tasks(true).expect("sort should persist");
        let titles: Vec<&str> = manager
            .get_all_tasks()
            .iter()
            .map(|task| task.title.as_str())
            .collect();
        assert_eq!(titles, ["x", "z", "y", "w"]);
    }
}
