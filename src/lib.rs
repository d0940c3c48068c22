// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

use anyhow::{Result, bail};
use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::dag::{RunReport, TaskGraph};
use crate::engine::{run_tasks, validate_graph};

pub use crate::dag::{ConcurrentScheduler, TaskDescriptor};
pub use crate::errors::TaskdagError;
pub use crate::types::{END_TASK, START_TASK, TaskName, TaskOutcome};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - task file loading
/// - graph construction + cycle check
/// - the concurrent scheduler
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)?;
    let max_concurrency = args.max_concurrency.unwrap_or(cfg.config.max_concurrency);

    if args.dry_run {
        let scheduler = ConcurrentScheduler::new(max_concurrency)?;
        return print_dry_run(&cfg, &scheduler);
    }

    let report = run_tasks(cfg.to_descriptors(), max_concurrency).await?;
    log_summary(&report);

    if args.strict && !report.is_clean() {
        bail!(
            "{} task(s) failed: {}",
            report.failures.len(),
            report.failed_tasks().join(", ")
        );
    }

    Ok(())
}

fn log_summary(report: &RunReport) {
    if report.is_clean() {
        info!(completed = report.completed.len(), "all tasks succeeded");
        return;
    }

    for failure in report.failures.iter() {
        warn!(task = %failure.task, outcome = %failure.outcome, "task failed");
    }
    if !report.unfinished.is_empty() {
        warn!(unfinished = ?report.unfinished, "some tasks never ran");
    }
}

/// Simple dry-run output: print tasks, edges and one valid execution order.
fn print_dry_run(cfg: &ConfigFile, scheduler: &ConcurrentScheduler) -> Result<()> {
    let graph = TaskGraph::from_descriptors(cfg.to_descriptors())?;
    validate_graph(&graph)?;

    println!("taskdag dry-run");
    println!("  max_concurrency = {}", scheduler.max_concurrency());
    println!();

    println!("tasks ({}):", graph.node_count());
    for name in graph.task_names() {
        println!("  - {name}");
        if let Some(cmd) = cfg.task.get(name).and_then(|t| t.cmd.as_deref()) {
            println!("      cmd: {cmd}");
        }
        let successors = graph.successors_of(name);
        if !successors.is_empty() {
            println!("      before: {successors:?}");
        }
    }

    if !graph.dangling_references().is_empty() {
        println!();
        println!("ignored references:");
        for dangling in graph.dangling_references() {
            println!("  - {} -> {} ({:?})", dangling.task, dangling.missing, dangling.relation);
        }
    }

    if let Some(order) = graph.topological_order() {
        println!();
        println!("order: {}", order.join(" -> "));
    }

    Ok(())
}
