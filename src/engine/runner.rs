// src/engine/runner.rs

use tracing::{debug, error};

use crate::dag::{ConcurrentScheduler, RunReport, TaskDescriptor, TaskGraph, find_cycle};
use crate::errors::{Result, TaskdagError};

/// Build the graph for `descriptors` and reject it if it has a cycle.
pub fn prepare_graph<I>(descriptors: I) -> Result<TaskGraph>
where
    I: IntoIterator<Item = TaskDescriptor>,
{
    let graph = TaskGraph::from_descriptors(descriptors)?;
    validate_graph(&graph)?;
    Ok(graph)
}

/// Fail with [`TaskdagError::DependencyCycle`] if `graph` has a cycle.
pub fn validate_graph(graph: &TaskGraph) -> Result<()> {
    debug!("checking task graph for any dependency issues");
    match find_cycle(graph) {
        Some(cycle) => {
            error!(?cycle, "issues found in dependencies amongst tasks");
            Err(TaskdagError::DependencyCycle(format!(
                "cycle among tasks: {}",
                cycle.join(", ")
            )))
        }
        None => Ok(()),
    }
}

/// Build, validate and execute `descriptors` with at most `max_concurrency`
/// task bodies running at once.
///
/// Construction and validation errors abort before any task body runs.
/// Task body failures do not: they are logged and listed in the report.
pub async fn run_tasks<I>(descriptors: I, max_concurrency: usize) -> Result<RunReport>
where
    I: IntoIterator<Item = TaskDescriptor>,
{
    let scheduler = ConcurrentScheduler::new(max_concurrency)?;
    let graph = prepare_graph(descriptors)?;
    scheduler.run(&graph).await
}

/// Blocking variant of [`run_tasks`].
///
/// Spins up a dedicated runtime whose blocking pool is capped at
/// `max_concurrency` threads. Must not be called from inside a Tokio runtime.
pub fn run_tasks_blocking<I>(descriptors: I, max_concurrency: usize) -> Result<RunReport>
where
    I: IntoIterator<Item = TaskDescriptor>,
{
    let scheduler = ConcurrentScheduler::new(max_concurrency)?;
    let graph = prepare_graph(descriptors)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .max_blocking_threads(max_concurrency)
        .thread_name("taskdag-worker")
        .enable_all()
        .build()?;

    runtime.block_on(scheduler.run(&graph))
}
