// src/dag/report.rs

//! Summary of a finished scheduling run.

use crate::types::{TaskName, TaskOutcome};

/// A task whose body returned an error or panicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    pub task: TaskName,
    pub outcome: TaskOutcome,
}

/// What happened during one run.
///
/// A run that returns a report always reached its terminal state; failed
/// task bodies do not hold back their successors, they are only listed here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Every retired task, in the order the coordinator retired them.
    pub completed: Vec<TaskName>,
    /// Tasks whose body failed, in retirement order.
    pub failures: Vec<TaskFailure>,
    /// Tasks that were never released (only possible on a cyclic graph).
    pub unfinished: Vec<TaskName>,
}

impl RunReport {
    pub fn record(&mut self, task: TaskName, outcome: TaskOutcome) {
        if !outcome.is_success() {
            self.failures.push(TaskFailure {
                task: task.clone(),
                outcome,
            });
        }
        self.completed.push(task);
    }

    /// All tasks ran and none failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.unfinished.is_empty()
    }

    pub fn failed_tasks(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.task.as_str()).collect()
    }

    /// Retirement position of `task`, if it completed.
    pub fn position_of(&self, task: &str) -> Option<usize> {
        self.completed.iter().position(|t| t == task)
    }
}
