// tests/config_loading.rs

mod common;
use crate::common::builders::{ConfigFileBuilder, TaskConfigBuilder};
use crate::common::{init_tracing, with_timeout, TestResult};

use std::io::Write;

use tempfile::NamedTempFile;
use taskdag::config::{load_and_validate, parse_str};
use taskdag::dag::TaskGraph;
use taskdag::engine::run_tasks;
use taskdag::errors::TaskdagError;
use taskdag::{END_TASK, START_TASK};

#[test]
fn task_file_is_loaded_with_defaults() -> TestResult {
    init_tracing();

    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
[task.fetch]
cmd = "echo fetch"

[task.build]
cmd = "echo build"
after = ["fetch"]
before = ["publish"]

[task.publish]
"#
    )?;

    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.config.max_concurrency, 1);
    assert_eq!(cfg.task.len(), 3);
    assert_eq!(cfg.task["build"].after, vec!["fetch"]);
    assert_eq!(cfg.task["build"].before, vec!["publish"]);
    assert_eq!(cfg.task["publish"].cmd, None);

    Ok(())
}

#[test]
fn max_concurrency_is_read_from_config_section() -> TestResult {
    let raw = parse_str(
        r#"
[config]
max_concurrency = 4

[task.a]
cmd = "true"
"#,
    )?;

    assert_eq!(raw.config.max_concurrency, 4);
    Ok(())
}

#[test]
fn zero_max_concurrency_is_a_config_error() {
    init_tracing();

    let result = ConfigFileBuilder::new()
        .max_concurrency(0)
        .with_task("a", TaskConfigBuilder::noop().build())
        .try_build();

    match result {
        Err(TaskdagError::ConfigError(msg)) => assert!(msg.contains("max_concurrency")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn oversized_max_concurrency_is_a_config_error() {
    let result = ConfigFileBuilder::new()
        .max_concurrency(usize::MAX)
        .with_task("a", TaskConfigBuilder::noop().build())
        .try_build();

    assert!(matches!(result, Err(TaskdagError::ConfigError(msg)) if msg.contains("max_concurrency")));
}

#[test]
fn task_file_without_tasks_is_rejected() -> TestResult {
    let mut file = NamedTempFile::new()?;
    write!(file, "[config]\nmax_concurrency = 2\n")?;

    let result = load_and_validate(file.path());
    assert!(matches!(result, Err(TaskdagError::ConfigError(msg)) if msg.contains("at least one")));

    Ok(())
}

#[test]
fn blank_command_is_rejected() {
    let result = ConfigFileBuilder::new()
        .with_task("a", TaskConfigBuilder::new("   ").build())
        .try_build();

    assert!(matches!(result, Err(TaskdagError::ConfigError(msg)) if msg.contains("'a'")));
}

#[test]
fn malformed_toml_is_a_toml_error() {
    let result = parse_str("[task.a\ncmd = ");
    assert!(matches!(result, Err(TaskdagError::TomlError(_))));
}

#[test]
fn unknown_dependencies_are_not_a_config_error() -> TestResult {
    let cfg = ConfigFileBuilder::new()
        .with_task("a", TaskConfigBuilder::noop().after("ghost").build())
        .try_build()?;

    let graph = TaskGraph::from_descriptors(cfg.to_descriptors())?;
    assert_eq!(graph.dangling_references().len(), 1);

    Ok(())
}

#[test]
fn descriptors_get_anchors_unless_defined() -> TestResult {
    init_tracing();

    let cfg = ConfigFileBuilder::new()
        .with_task("a", TaskConfigBuilder::noop().build())
        .build();
    let names: Vec<String> = cfg
        .to_descriptors()
        .iter()
        .map(|d| d.name().to_string())
        .collect();
    assert_eq!(names, vec![START_TASK, "a", END_TASK]);

    // A file that defines its own start anchor must not get a second one.
    let cfg = ConfigFileBuilder::new()
        .with_task(START_TASK, TaskConfigBuilder::new("echo start").build())
        .with_task("a", TaskConfigBuilder::noop().build())
        .build();
    let graph = TaskGraph::from_descriptors(cfg.to_descriptors())?;
    assert_eq!(graph.node_count(), 3);
    assert!(graph.has_edge(START_TASK, "a"));

    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn shell_commands_run_in_dependency_order() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let log_path = dir.path().join("order.log");
        let log = log_path.display();

        let cfg = ConfigFileBuilder::new()
            .max_concurrency(2)
            .with_task("first", TaskConfigBuilder::new(&format!("echo first >> {log}")).build())
            .with_task(
                "second",
                TaskConfigBuilder::new(&format!("echo second >> {log}"))
                    .after("first")
                    .build(),
            )
            .with_task(
                "broken",
                TaskConfigBuilder::new("exit 3").before("second").build(),
            )
            .build();

        let report = run_tasks(cfg.to_descriptors(), cfg.config.max_concurrency).await?;

        let written = std::fs::read_to_string(&log_path)?;
        assert_eq!(written.lines().collect::<Vec<_>>(), vec!["first", "second"]);

        assert_eq!(report.failed_tasks(), vec!["broken"]);
        assert!(report.position_of("broken") < report.position_of("second"));

        Ok(())
    })
    .await
}
