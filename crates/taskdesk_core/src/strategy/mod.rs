//! Pluggable priority policies.
//!
//! # Responsibility
//! - Compute a task priority from its other attributes.
//! - Let callers pick a policy at run time without knowing concrete types.
//!
//! # Invariants
//! - Strategies only mutate `Task::priority`.
//! - Strategies never persist; callers save through `TaskManager`.

pub mod priority;
