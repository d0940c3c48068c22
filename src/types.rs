// src/types.rs

//! Small shared types used across the graph, scheduler and executor layers.

use std::fmt;

/// Canonical task name type used throughout the crate.
pub type TaskName = String;

/// Name of the start anchor. Every other task runs after it.
pub const START_TASK: &str = "first_task";

/// Name of the end anchor. Every other task runs before it.
pub const END_TASK: &str = "last_task";

/// Outcome of a single invocation of a task body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    /// The body returned an error.
    Failed(String),
    /// The body panicked.
    Panicked(String),
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Success)
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskOutcome::Success => write!(f, "success"),
            TaskOutcome::Failed(reason) => write!(f, "failed: {reason}"),
            TaskOutcome::Panicked(reason) => write!(f, "panicked: {reason}"),
        }
    }
}

/// Per-node state within a single scheduling run.
///
/// A node moves strictly forward: `Blocked -> Ready -> Running -> Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Waiting on at least one predecessor.
    Blocked,
    /// All predecessors completed; not yet handed to the worker pool.
    Ready,
    /// Submitted to the worker pool and not yet retired.
    Running,
    /// Retired by the coordinator (successfully or not).
    Done,
}
