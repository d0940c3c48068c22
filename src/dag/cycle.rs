// src/dag/cycle.rs

//! Pre-flight cycle detection for the task graph.

use petgraph::algo::tarjan_scc;
use tracing::debug;

use crate::dag::graph::TaskGraph;
use crate::types::TaskName;

/// Returns `true` if the graph contains at least one cycle (self-loops included).
pub fn has_cycle(graph: &TaskGraph) -> bool {
    find_cycle(graph).is_some()
}

/// Names of the tasks forming the first cyclic component found, sorted.
///
/// A strongly connected component is cyclic when it has more than one member,
/// or a single member with an edge to itself.
pub fn find_cycle(graph: &TaskGraph) -> Option<Vec<TaskName>> {
    debug!("checking task graph for dependency cycles");
    let inner = graph.inner();

    let component = tarjan_scc(inner).into_iter().find(|scc| match scc.as_slice() {
        [single] => inner.contains_edge(*single, *single),
        members => members.len() > 1,
    })?;

    let mut names: Vec<TaskName> = component
        .into_iter()
        .map(|id| inner[id].name.clone())
        .collect();
    names.sort();

    debug!(?names, "dependency cycle found");
    Some(names)
}
