#![allow(dead_code)]

use std::collections::BTreeMap;

use taskdag::config::{ConfigFile, ConfigSection, RawConfigFile, TaskConfig};
use taskdag::errors::Result;
use taskdag::TaskDescriptor;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                task: BTreeMap::new(),
            },
        }
    }

    pub fn with_task(mut self, name: &str, task: TaskConfig) -> Self {
        self.config.task.insert(name.to_string(), task);
        self
    }

    pub fn max_concurrency(mut self, n: usize) -> Self {
        self.config.config.max_concurrency = n;
        self
    }

    /// Validate and return the result, for tests that expect an error.
    pub fn try_build(self) -> Result<ConfigFile> {
        ConfigFile::try_from(self.config)
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new(cmd: &str) -> Self {
        Self {
            task: TaskConfig {
                cmd: Some(cmd.to_string()),
                before: vec![],
                after: vec![],
            },
        }
    }

    /// A task without a command.
    pub fn noop() -> Self {
        Self {
            task: TaskConfig::default(),
        }
    }

    pub fn before(mut self, name: &str) -> Self {
        self.task.before.push(name.to_string());
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.after.push(dep.to_string());
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}

/// `names` as no-op descriptors, each running after the previous one.
///
/// Anchors are not included.
pub fn noop_chain(names: &[&str]) -> Vec<TaskDescriptor> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let desc = TaskDescriptor::noop(*name);
            if i == 0 {
                desc
            } else {
                desc.runs_after([names[i - 1]])
            }
        })
        .collect()
}

/// `tasks` plus both no-op anchors.
pub fn with_anchors(tasks: Vec<TaskDescriptor>) -> Vec<TaskDescriptor> {
    let mut all = Vec::with_capacity(tasks.len() + 2);
    all.push(TaskDescriptor::start_anchor());
    all.extend(tasks);
    all.push(TaskDescriptor::end_anchor());
    all
}
