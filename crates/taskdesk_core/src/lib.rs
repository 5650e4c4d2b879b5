//! Core domain logic for TaskDesk.
//! This crate owns the task record, priority policies, persistence and the
//! task manager; presentation layers only consume `TaskManager`.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod strategy;

pub use config::{default_data_file, ConfigError, ConfigResult, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    generate_task_id, Deadline, Task, TaskError, TaskId, TaskResult, DEADLINE_FORMAT,
    DEFAULT_PRIORITY, DEFAULT_STATUS,
};
pub use service::task_manager::TaskManager;
pub use store::{JsonTaskStore, MemoryTaskStore, StoreError, StoreResult, TaskStore};
pub use strategy::priority::{
    build_strategy, CategoryPriorityStrategy, DatePriorityStrategy, ManualPriorityStrategy,
    PriorityStrategy, StrategyKind,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
