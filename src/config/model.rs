// src/config/model.rs

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::dag::{TaskDescriptor, TaskWork};
use crate::exec::shell_work;
use crate::types::{END_TASK, START_TASK};

/// Task file as read from TOML, before validation.
///
/// ```toml
/// [config]
/// max_concurrency = 4
///
/// [task.build]
/// cmd = "cargo build"
/// after = ["fetch"]
/// before = ["package"]
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Global behaviour config from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// All tasks from `[task.<name>]`, keyed by task name.
    #[serde(default)]
    pub task: BTreeMap<String, TaskConfig>,
}

/// A task file that passed validation. Build it with `ConfigFile::try_from`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub task: BTreeMap<String, TaskConfig>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Maximum number of task bodies running at the same time.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_max_concurrency() -> usize {
    1
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
        }
    }
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskConfig {
    /// Shell command to execute. A task without one does nothing when run,
    /// which is handy for grouping or anchor tasks.
    #[serde(default)]
    pub cmd: Option<String>,

    /// Tasks that must wait for this one.
    #[serde(default)]
    pub before: Vec<String>,

    /// Tasks this one waits for.
    #[serde(default)]
    pub after: Vec<String>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection, task: BTreeMap<String, TaskConfig>) -> Self {
        Self { config, task }
    }

    /// Turn every configured task into a [`TaskDescriptor`].
    ///
    /// The start and end anchors are added as no-op tasks unless the file
    /// defines them itself.
    pub fn to_descriptors(&self) -> Vec<TaskDescriptor> {
        let mut descriptors = Vec::with_capacity(self.task.len() + 2);

        if !self.task.contains_key(START_TASK) {
            descriptors.push(TaskDescriptor::start_anchor());
        }

        for (name, tc) in self.task.iter() {
            let work: TaskWork = match tc.cmd.as_deref() {
                Some(cmd) => shell_work(name, cmd),
                None => Arc::new(|| Ok(())),
            };

            descriptors.push(
                TaskDescriptor::from_shared(name.clone(), work)
                    .runs_before(tc.before.iter().cloned())
                    .runs_after(tc.after.iter().cloned()),
            );
        }

        if !self.task.contains_key(END_TASK) {
            descriptors.push(TaskDescriptor::end_anchor());
        }

        descriptors
    }
}
