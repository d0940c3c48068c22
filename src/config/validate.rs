// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, TaskdagError};
use crate::exec::MAX_CONCURRENCY;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = TaskdagError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.task))
    }
}

/// Semantic checks on a freshly parsed task file.
///
/// Dependency references are deliberately not checked here: unknown names
/// are tolerated (and logged) when the graph is built, and cycles are
/// rejected right before a run.
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_tasks(cfg)?;
    validate_global_config(cfg)?;
    validate_tasks(cfg)?;
    Ok(())
}

fn ensure_has_tasks(cfg: &RawConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(TaskdagError::ConfigError(
            "task file must contain at least one [task.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    let n = cfg.config.max_concurrency;
    if n == 0 || n > MAX_CONCURRENCY {
        return Err(TaskdagError::ConfigError(format!(
            "[config].max_concurrency must be between 1 and {MAX_CONCURRENCY} (got {n})"
        )));
    }
    Ok(())
}

fn validate_tasks(cfg: &RawConfigFile) -> Result<()> {
    for (name, task) in cfg.task.iter() {
        if name.trim().is_empty() {
            return Err(TaskdagError::ConfigError(
                "task names must not be blank".to_string(),
            ));
        }

        if let Some(cmd) = task.cmd.as_deref() {
            if cmd.trim().is_empty() {
                return Err(TaskdagError::ConfigError(format!(
                    "task '{name}' has an empty `cmd`; omit it for a no-op task"
                )));
            }
        }

        for dep in task.before.iter().chain(task.after.iter()) {
            if dep.trim().is_empty() {
                return Err(TaskdagError::ConfigError(format!(
                    "task '{name}' lists a blank task name in `before`/`after`"
                )));
            }
        }
    }
    Ok(())
}
