//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into the CRUD + listing contract consumed by
//!   presentation layers.
//! - Keep presentation code decoupled from file format details.

pub mod task_manager;
