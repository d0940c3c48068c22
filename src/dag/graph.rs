// src/dag/graph.rs

use std::collections::HashMap;
use std::fmt;

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, error, warn};

use crate::dag::descriptor::{TaskDescriptor, TaskWork};
use crate::errors::{Result, TaskdagError};
use crate::types::TaskName;

/// A node of the dependency graph: a task name bound to its body.
pub struct TaskNode {
    pub name: TaskName,
    work: TaskWork,
}

impl TaskNode {
    pub fn work(&self) -> &TaskWork {
        &self.work
    }
}

impl fmt::Debug for TaskNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskNode")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Which declaration a dangling reference came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    RunsBefore,
    RunsAfter,
}

/// A `runs_before` / `runs_after` entry naming a task that was never registered.
///
/// These are soft failures: the edge is omitted and the graph is still built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    /// Task that declared the constraint.
    pub task: TaskName,
    /// The unknown task it referred to.
    pub missing: TaskName,
    pub relation: Relation,
}

/// Directed dependency graph of tasks.
///
/// Edge direction: `A -> B` means A must complete before B may start.
/// Repeated constraints between the same pair collapse into a single edge.
#[derive(Debug)]
pub struct TaskGraph {
    graph: DiGraph<TaskNode, ()>,
    index: HashMap<TaskName, NodeIndex>,
    dangling: Vec<DanglingReference>,
}

impl TaskGraph {
    /// Build the dependency graph for one scheduling run.
    ///
    /// Fails with [`TaskdagError::DuplicateTask`] as soon as two descriptors
    /// share a name. References to unknown tasks are logged and skipped.
    pub fn from_descriptors<I>(descriptors: I) -> Result<Self>
    where
        I: IntoIterator<Item = TaskDescriptor>,
    {
        debug!("creating dependency graph for all tasks");

        let descriptors: Vec<TaskDescriptor> = descriptors.into_iter().collect();
        let mut graph: DiGraph<TaskNode, ()> = DiGraph::with_capacity(descriptors.len(), 0);
        let mut index: HashMap<TaskName, NodeIndex> = HashMap::with_capacity(descriptors.len());
        let mut node_ids: Vec<NodeIndex> = Vec::with_capacity(descriptors.len());

        // First pass: one node per descriptor.
        for desc in descriptors.iter() {
            let name = desc.name();
            if index.contains_key(name) {
                error!(task = %name, "duplicate task found");
                return Err(TaskdagError::DuplicateTask(name.to_string()));
            }

            debug!(task = %name, "adding task node");
            let id = graph.add_node(TaskNode {
                name: name.to_string(),
                work: desc.work().clone(),
            });
            index.insert(name.to_string(), id);
            node_ids.push(id);
        }

        // Second pass: edges from both sides of every declaration.
        let mut dangling = Vec::new();
        for (desc, &id) in descriptors.iter().zip(node_ids.iter()) {
            for successor in desc.successors() {
                match index.get(successor) {
                    Some(&to) => {
                        debug!(task = %desc.name(), successor = %successor, "adding edge");
                        graph.update_edge(id, to, ());
                    }
                    None => {
                        warn!(
                            task = %desc.name(),
                            missing = %successor,
                            "task that should run after this one is missing; dependency ignored"
                        );
                        dangling.push(DanglingReference {
                            task: desc.name().to_string(),
                            missing: successor.clone(),
                            relation: Relation::RunsBefore,
                        });
                    }
                }
            }

            for predecessor in desc.predecessors() {
                match index.get(predecessor) {
                    Some(&from) => {
                        debug!(task = %desc.name(), predecessor = %predecessor, "adding edge");
                        graph.update_edge(from, id, ());
                    }
                    None => {
                        warn!(
                            task = %desc.name(),
                            missing = %predecessor,
                            "task this one depends on is missing; dependency ignored"
                        );
                        dangling.push(DanglingReference {
                            task: desc.name().to_string(),
                            missing: predecessor.clone(),
                            relation: Relation::RunsAfter,
                        });
                    }
                }
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            dangling = dangling.len(),
            "dependency graph created"
        );

        Ok(Self {
            graph,
            index,
            dangling,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Return all task names, in registration order.
    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(|n| n.name.as_str())
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Tasks that may only start once `name` has completed.
    pub fn successors_of(&self, name: &str) -> Vec<&str> {
        self.neighbors(name, Direction::Outgoing)
    }

    /// Tasks that must complete before `name` may start.
    pub fn predecessors_of(&self, name: &str) -> Vec<&str> {
        self.neighbors(name, Direction::Incoming)
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Number of incoming edges; `0` for unknown tasks.
    pub fn in_degree(&self, name: &str) -> usize {
        self.index
            .get(name)
            .map(|&id| {
                self.graph
                    .neighbors_directed(id, Direction::Incoming)
                    .count()
            })
            .unwrap_or(0)
    }

    pub fn work_of(&self, name: &str) -> Option<TaskWork> {
        let &id = self.index.get(name)?;
        Some(self.graph[id].work().clone())
    }

    /// References to unknown tasks that were dropped while building.
    pub fn dangling_references(&self) -> &[DanglingReference] {
        &self.dangling
    }

    /// One valid execution order, or `None` if the graph has a cycle.
    pub fn topological_order(&self) -> Option<Vec<TaskName>> {
        toposort(&self.graph, None).ok().map(|order| {
            order
                .into_iter()
                .map(|id| self.graph[id].name.clone())
                .collect()
        })
    }

    pub(crate) fn inner(&self) -> &DiGraph<TaskNode, ()> {
        &self.graph
    }

    fn neighbors(&self, name: &str, dir: Direction) -> Vec<&str> {
        match self.index.get(name) {
            Some(&id) => self
                .graph
                .neighbors_directed(id, dir)
                .map(|n| self.graph[n].name.as_str())
                .collect(),
            None => Vec::new(),
        }
    }
}
