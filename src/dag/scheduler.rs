// src/dag/scheduler.rs

use anyhow::anyhow;
use tracing::{debug, error, info, warn};

use crate::dag::graph::TaskGraph;
use crate::dag::report::RunReport;
use crate::dag::state::ExecutionState;
use crate::errors::{Result, TaskdagError};
use crate::exec::{WorkerPool, check_concurrency};
use crate::types::START_TASK;

/// Executes a validated [`TaskGraph`] with bounded concurrency.
///
/// The coordinating loop:
/// - submits every `Ready` node to the worker pool
/// - waits for at least one completion and retires exactly one of them
/// - releases successors whose last predecessor just completed
/// - stops once nothing is ready and nothing is in flight
///
/// A failed task body still counts as completed, so its successors run.
#[derive(Debug, Clone, Copy)]
pub struct ConcurrentScheduler {
    max_concurrency: usize,
}

impl ConcurrentScheduler {
    /// Fails with [`TaskdagError::InvalidConcurrency`] for 0 or for more
    /// workers than the pool can track.
    pub fn new(max_concurrency: usize) -> Result<Self> {
        let max_concurrency = check_concurrency(max_concurrency)?;
        Ok(Self { max_concurrency })
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Run every task in `graph`, respecting its edges.
    ///
    /// The graph must already have passed cycle validation; on a cyclic graph
    /// the nodes on the cycle are never released and end up in
    /// [`RunReport::unfinished`].
    pub async fn run(&self, graph: &TaskGraph) -> Result<RunReport> {
        if !graph.contains(START_TASK) {
            error!(start_task = START_TASK, "start task must be present in the task graph");
            return Err(TaskdagError::StartTaskMissing(START_TASK.to_string()));
        }

        info!(
            tasks = graph.node_count(),
            max_concurrency = self.max_concurrency,
            "running all tasks"
        );

        let mut state = ExecutionState::new(graph);
        let mut pool = WorkerPool::new(self.max_concurrency)?;
        let mut report = RunReport::default();

        loop {
            for task in state.take_ready() {
                let work = graph
                    .work_of(&task)
                    .ok_or_else(|| anyhow!("task '{task}' has no node in the graph"))?;
                pool.submit(task, work);
            }

            if !state.has_in_flight() {
                break;
            }

            let completion = pool.await_any().await?;
            debug!(
                task = %completion.task,
                outcome = %completion.outcome,
                in_flight = state.in_flight_count(),
                "task completed"
            );

            state.complete(graph, &completion.task);
            report.record(completion.task, completion.outcome);
        }

        let unfinished = state.blocked_tasks();
        if !unfinished.is_empty() {
            warn!(?unfinished, "run finished with tasks that were never released");
        }
        report.unfinished = unfinished;

        info!(
            completed = report.completed.len(),
            failed = report.failures.len(),
            "completed all tasks"
        );

        Ok(report)
    }
}
