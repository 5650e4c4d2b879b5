//! Domain model for the task table.
//!
//! # Responsibility
//! - Define the canonical task record consumed by manager and presentation.
//! - Own the persisted field names and date rendering rules.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deadlines are rendered with one fixed pattern (`YYYY-MM-DD`).

pub mod task;
