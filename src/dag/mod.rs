// src/dag/mod.rs

//! DAG representation and scheduling.
//!
//! - [`descriptor`] defines [`TaskDescriptor`], the input to graph construction.
//! - [`graph`] builds the dependency graph and records dangling references.
//! - [`cycle`] is the pre-flight cycle check.
//! - [`state`] holds the per-run in-degree / ready / in-flight bookkeeping.
//! - [`scheduler`] drives the run on top of the worker pool.
//! - [`report`] summarises a finished run.

pub mod cycle;
pub mod descriptor;
pub mod graph;
pub mod report;
pub mod scheduler;
pub mod state;

pub use cycle::{find_cycle, has_cycle};
pub use descriptor::{TaskDescriptor, TaskWork};
pub use graph::{DanglingReference, Relation, TaskGraph};
pub use report::{RunReport, TaskFailure};
pub use scheduler::ConcurrentScheduler;
pub use state::ExecutionState;
