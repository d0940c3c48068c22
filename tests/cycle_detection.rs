// tests/cycle_detection.rs

mod common;
use crate::common::builders::{noop_chain, with_anchors};
use crate::common::timeline::Timeline;
use crate::common::{init_tracing, with_timeout, TestResult};

use std::time::Duration;

use taskdag::dag::{find_cycle, has_cycle, TaskDescriptor, TaskGraph};
use taskdag::engine::{prepare_graph, run_tasks};
use taskdag::errors::TaskdagError;

#[test]
fn chain_has_no_cycle() -> TestResult {
    init_tracing();

    let graph = TaskGraph::from_descriptors(with_anchors(noop_chain(&["a", "b", "c"])))?;
    assert!(!has_cycle(&graph));
    assert_eq!(find_cycle(&graph), None);

    Ok(())
}

#[test]
fn mutual_runs_after_is_a_cycle() -> TestResult {
    init_tracing();

    let graph = TaskGraph::from_descriptors(with_anchors(vec![
        TaskDescriptor::noop("A").runs_after(["B"]),
        TaskDescriptor::noop("B").runs_after(["A"]),
    ]))?;

    assert!(has_cycle(&graph));
    assert_eq!(find_cycle(&graph), Some(vec!["A".to_string(), "B".to_string()]));

    Ok(())
}

#[test]
fn self_reference_is_a_cycle() -> TestResult {
    init_tracing();

    let graph = TaskGraph::from_descriptors(with_anchors(vec![
        TaskDescriptor::noop("loop").runs_before(["loop"]),
    ]))?;

    assert!(has_cycle(&graph));
    assert_eq!(find_cycle(&graph), Some(vec!["loop".to_string()]));

    Ok(())
}

#[test]
fn task_running_before_the_start_anchor_is_a_cycle() -> TestResult {
    init_tracing();

    let graph = TaskGraph::from_descriptors(with_anchors(vec![
        TaskDescriptor::noop("early").runs_before([taskdag::START_TASK]),
    ]))?;

    assert!(has_cycle(&graph));

    Ok(())
}

#[test]
fn longer_cycle_reports_all_members() -> TestResult {
    init_tracing();

    let graph = TaskGraph::from_descriptors(with_anchors(vec![
        TaskDescriptor::noop("x").runs_before(["y"]),
        TaskDescriptor::noop("y").runs_before(["z"]),
        TaskDescriptor::noop("z").runs_before(["x"]),
        TaskDescriptor::noop("bystander"),
    ]))?;

    let cycle = find_cycle(&graph).expect("x -> y -> z -> x");
    assert_eq!(cycle, vec!["x", "y", "z"]);

    Ok(())
}

#[test]
fn prepare_graph_rejects_cycles() {
    init_tracing();

    let result = prepare_graph(with_anchors(vec![
        TaskDescriptor::noop("A").runs_after(["B"]),
        TaskDescriptor::noop("B").runs_after(["A"]),
    ]));

    match result {
        Err(TaskdagError::DependencyCycle(msg)) => {
            assert!(msg.contains("cycle"));
            assert!(msg.contains('A') && msg.contains('B'));
        }
        Err(e) => panic!("Expected DependencyCycle error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[tokio::test]
async fn cyclic_graph_executes_no_task_body() -> TestResult {
    with_timeout(async {
        init_tracing();

        let timeline = Timeline::new();
        let hold = Duration::from_millis(1);

        let descriptors = vec![
            TaskDescriptor::new(taskdag::START_TASK, timeline.work(taskdag::START_TASK, hold)),
            timeline.descriptor("A", hold).runs_after(["B"]),
            timeline.descriptor("B", hold).runs_after(["A"]),
            timeline.descriptor("C", hold),
            TaskDescriptor::new(taskdag::END_TASK, timeline.work(taskdag::END_TASK, hold)),
        ];

        let result = run_tasks(descriptors, 4).await;

        assert!(matches!(result, Err(TaskdagError::DependencyCycle(_))));
        assert!(timeline.events().is_empty(), "no body may run: {:?}", timeline.events());

        Ok(())
    })
    .await
}
