// src/exec/pool.rs

//! Bounded worker pool for task bodies.
//!
//! Bodies run on Tokio's blocking thread pool. A semaphore with one permit per
//! worker slot bounds how many of them execute at once; submissions beyond
//! that wait for a permit instead of being dropped. Finished bodies report
//! back over an mpsc channel, which is what [`WorkerPool::await_any`] reads.
//!
//! Workers log through the subscriber that was current when the body was
//! submitted, so a scoped subscriber sees events from every worker thread.

use std::any::Any;
use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::dispatcher::{self, Dispatch};
use tracing::instrument::WithSubscriber;
use tracing::{debug, error, warn};

use crate::dag::TaskWork;
use crate::errors::{Result, TaskdagError};
use crate::types::{TaskName, TaskOutcome};

/// Largest worker count a pool (and so a run) accepts.
pub const MAX_CONCURRENCY: usize = Semaphore::MAX_PERMITS;

/// Accept `n` as a worker count, or fail with
/// [`TaskdagError::InvalidConcurrency`] when it is 0 or above
/// [`MAX_CONCURRENCY`].
pub fn check_concurrency(n: usize) -> Result<usize> {
    if n == 0 || n > MAX_CONCURRENCY {
        return Err(TaskdagError::InvalidConcurrency(n));
    }
    Ok(n)
}

/// A finished task body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub task: TaskName,
    pub outcome: TaskOutcome,
}

#[derive(Debug)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    /// Submitted bodies whose completion has not been handed out yet.
    outstanding: usize,
}

impl WorkerPool {
    /// Create a pool with `capacity` worker slots.
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = check_concurrency(capacity)?;

        let (tx, rx) = mpsc::unbounded_channel();
        Ok(Self {
            permits: Arc::new(Semaphore::new(capacity)),
            tx,
            rx,
            outstanding: 0,
        })
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Queue `work` for execution. Must be called from within a Tokio runtime.
    pub fn submit(&mut self, task: TaskName, work: TaskWork) {
        let permits = Arc::clone(&self.permits);
        let tx = self.tx.clone();
        let dispatch = dispatcher::get_default(Dispatch::clone);
        self.outstanding += 1;

        debug!(task = %task, "submitting task to worker pool");

        tokio::spawn(async move {
            let outcome = match permits.acquire_owned().await {
                Ok(permit) => {
                    let name = task.clone();
                    let joined = tokio::task::spawn_blocking(move || {
                        // Held until the body returns or unwinds.
                        let _permit = permit;
                        dispatcher::with_default(&dispatch, || invoke(&name, &work))
                    })
                    .await;

                    match joined {
                        Ok(outcome) => outcome,
                        Err(err) if err.is_panic() => {
                            let message = panic_message(err.into_panic());
                            error!(task = %task, panic = %message, "task panicked");
                            TaskOutcome::Panicked(message)
                        }
                        Err(err) => {
                            error!(task = %task, error = %err, "task worker was cancelled");
                            TaskOutcome::Failed(format!("worker cancelled: {err}"))
                        }
                    }
                }
                Err(_) => {
                    error!(task = %task, "worker pool closed before task could start");
                    TaskOutcome::Failed("worker pool closed".to_string())
                }
            };

            if tx.send(Completion { task, outcome }).is_err() {
                warn!("completion dropped; scheduler is gone");
            }
        }
        .with_current_subscriber());
    }

    /// Wait until at least one submitted body has finished and return exactly
    /// one completion. Others stay queued for later calls.
    pub async fn await_any(&mut self) -> Result<Completion> {
        if self.outstanding == 0 {
            return Err(TaskdagError::WorkerPool(
                "await_any called with no submitted work".to_string(),
            ));
        }

        match self.rx.recv().await {
            Some(completion) => {
                self.outstanding -= 1;
                Ok(completion)
            }
            None => Err(TaskdagError::WorkerPool(
                "completion channel closed".to_string(),
            )),
        }
    }
}

/// Run a task body, turning an error return into a failed outcome.
fn invoke(task: &str, work: &TaskWork) -> TaskOutcome {
    debug!(task = %task, "executing task body");
    match work() {
        Ok(()) => {
            debug!(task = %task, "task body finished");
            TaskOutcome::Success
        }
        Err(err) => {
            let message = format!("{err:#}");
            error!(task = %task, error = %message, "exception occurred inside a task");
            TaskOutcome::Failed(message)
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
