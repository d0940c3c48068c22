// src/dag/descriptor.rs

//! Task descriptors: the unit of schedulable work handed to the graph builder.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::types::{END_TASK, START_TASK, TaskName};

/// Shared, thread-safe task body.
///
/// Returning `Err` (or panicking) marks the task as failed for reporting, but
/// never stops the run.
pub type TaskWork = Arc<dyn Fn() -> anyhow::Result<()> + Send + Sync + 'static>;

/// One schedulable unit: a name, a body and its ordering constraints.
///
/// Anchor edges are added on construction: every task except [`END_TASK`]
/// runs before the end anchor, and every task except [`START_TASK`] runs after
/// the start anchor.
#[derive(Clone)]
pub struct TaskDescriptor {
    name: TaskName,
    work: TaskWork,
    /// Tasks that must not start until this one completes (`self -> other`).
    runs_before: BTreeSet<TaskName>,
    /// Tasks that must complete before this one starts (`other -> self`).
    runs_after: BTreeSet<TaskName>,
}

impl TaskDescriptor {
    pub fn new<F>(name: impl Into<TaskName>, work: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self::from_shared(name, Arc::new(work))
    }

    /// Like [`TaskDescriptor::new`] for a body that is already shared.
    pub fn from_shared(name: impl Into<TaskName>, work: TaskWork) -> Self {
        let name = name.into();

        let mut runs_before = BTreeSet::new();
        if name != END_TASK {
            runs_before.insert(END_TASK.to_string());
        }

        let mut runs_after = BTreeSet::new();
        if name != START_TASK {
            runs_after.insert(START_TASK.to_string());
        }

        Self {
            name,
            work,
            runs_before,
            runs_after,
        }
    }

    /// A task whose body does nothing.
    pub fn noop(name: impl Into<TaskName>) -> Self {
        Self::new(name, || Ok(()))
    }

    /// No-op start anchor.
    pub fn start_anchor() -> Self {
        Self::noop(START_TASK)
    }

    /// No-op end anchor.
    pub fn end_anchor() -> Self {
        Self::noop(END_TASK)
    }

    /// Add tasks that must wait for this one.
    pub fn runs_before<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TaskName>,
    {
        self.runs_before.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add tasks this one must wait for.
    pub fn runs_after<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TaskName>,
    {
        self.runs_after.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn work(&self) -> &TaskWork {
        &self.work
    }

    pub fn successors(&self) -> &BTreeSet<TaskName> {
        &self.runs_before
    }

    pub fn predecessors(&self) -> &BTreeSet<TaskName> {
        &self.runs_after
    }
}

impl fmt::Debug for TaskDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskDescriptor")
            .field("name", &self.name)
            .field("runs_before", &self.runs_before)
            .field("runs_after", &self.runs_after)
            .finish_non_exhaustive()
    }
}
