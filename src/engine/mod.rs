// src/engine/mod.rs

//! Orchestration engine for taskdag.
//!
//! Ties the pieces together for a single run:
//! descriptors -> graph -> cycle check -> concurrent scheduler -> report.
//! Nothing executes unless the graph builds and is acyclic.

pub mod runner;

pub use runner::{prepare_graph, run_tasks, run_tasks_blocking, validate_graph};
