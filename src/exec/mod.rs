// src/exec/mod.rs

//! Execution layer.
//!
//! - [`pool`] owns the bounded worker pool the scheduler submits task bodies
//!   to, and the invocation boundary where body failures are caught.
//! - [`command`] builds task bodies that run shell commands (used for tasks
//!   loaded from a task file).

pub mod command;
pub mod pool;

pub use command::{shell_command, shell_work};
pub use pool::{Completion, MAX_CONCURRENCY, WorkerPool, check_concurrency};
