// src/dag/state.rs

//! Per-run execution state for the scheduler.
//!
//! Owned exclusively by the coordinating loop; workers never see it, so none
//! of it needs synchronisation.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::dag::graph::TaskGraph;
use crate::types::{NodeState, START_TASK, TaskName};

#[derive(Debug)]
pub struct ExecutionState {
    /// Not-yet-satisfied predecessor edges per node.
    in_degree: HashMap<TaskName, usize>,
    states: HashMap<TaskName, NodeState>,
    /// Nodes whose in-degree reached zero and that have not been submitted yet.
    ready: Vec<TaskName>,
    /// Submitted, not yet retired.
    in_flight: HashSet<TaskName>,
}

impl ExecutionState {
    /// Initial state: the start anchor plus every node without predecessors
    /// is `Ready`, everything else is `Blocked`.
    pub fn new(graph: &TaskGraph) -> Self {
        let mut in_degree = HashMap::with_capacity(graph.node_count());
        let mut states = HashMap::with_capacity(graph.node_count());
        let mut ready = Vec::new();

        for name in graph.task_names() {
            let degree = graph.in_degree(name);
            in_degree.insert(name.to_string(), degree);

            if degree == 0 || name == START_TASK {
                debug!(task = %name, "task is available for execution");
                states.insert(name.to_string(), NodeState::Ready);
                ready.push(name.to_string());
            } else {
                states.insert(name.to_string(), NodeState::Blocked);
            }
        }

        Self {
            in_degree,
            states,
            ready,
            in_flight: HashSet::new(),
        }
    }

    /// Drain the ready set, marking every drained node `Running`.
    pub fn take_ready(&mut self) -> Vec<TaskName> {
        let ready: Vec<TaskName> = self.ready.drain(..).collect();
        for name in ready.iter() {
            self.states.insert(name.clone(), NodeState::Running);
            self.in_flight.insert(name.clone());
        }
        ready
    }

    /// Retire a completed node and release its successors.
    ///
    /// Returns the successors that became `Ready` as a result. Completions for
    /// nodes that are not `Running` are ignored.
    pub fn complete(&mut self, graph: &TaskGraph, task: &str) -> Vec<TaskName> {
        if !self.in_flight.remove(task) {
            warn!(task = %task, "completion for task that is not running; ignoring");
            return Vec::new();
        }
        self.states.insert(task.to_string(), NodeState::Done);

        let mut newly_ready = Vec::new();
        for successor in graph.successors_of(task) {
            let Some(degree) = self.in_degree.get_mut(successor) else {
                continue;
            };
            *degree = degree.saturating_sub(1);

            if *degree == 0 && self.states.get(successor) == Some(&NodeState::Blocked) {
                debug!(task = %successor, after = %task, "task is now available for execution");
                self.states.insert(successor.to_string(), NodeState::Ready);
                self.ready.push(successor.to_string());
                newly_ready.push(successor.to_string());
            }
        }

        newly_ready
    }

    /// No pending or running work remains.
    pub fn is_finished(&self) -> bool {
        self.ready.is_empty() && self.in_flight.is_empty()
    }

    pub fn has_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    pub fn state_of(&self, task: &str) -> Option<NodeState> {
        self.states.get(task).copied()
    }

    /// Remaining in-degree of `task`, or `None` if unknown.
    pub fn pending_predecessors(&self, task: &str) -> Option<usize> {
        self.in_degree.get(task).copied()
    }

    /// Nodes that never left `Blocked`, sorted by name.
    pub fn blocked_tasks(&self) -> Vec<TaskName> {
        let mut blocked: Vec<TaskName> = self
            .states
            .iter()
            .filter(|(_, state)| **state == NodeState::Blocked)
            .map(|(name, _)| name.clone())
            .collect();
        blocked.sort();
        blocked
    }
}
