// src/exec/command.rs

//! Task bodies backed by shell commands.
//!
//! Used by the config layer: each `[task.<name>]` with a `cmd` becomes a
//! [`TaskWork`] that runs the command through the platform shell on a worker
//! thread. The child inherits stdout/stderr so task output goes straight to
//! the terminal.

use std::process::Command;
use std::sync::Arc;

use anyhow::{Context, bail};
use tracing::info;

use crate::dag::TaskWork;

/// Build a shell command appropriate for the platform.
pub fn shell_command(cmd: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd);
        c
    }
}

/// A task body that runs `cmd` and fails on a non-zero exit status.
pub fn shell_work(task: &str, cmd: &str) -> TaskWork {
    let task = task.to_string();
    let cmd = cmd.to_string();

    Arc::new(move || {
        info!(task = %task, cmd = %cmd, "starting task process");

        let status = shell_command(&cmd)
            .status()
            .with_context(|| format!("spawning process for task '{task}'"))?;

        let code = status.code().unwrap_or(-1);
        info!(
            task = %task,
            exit_code = code,
            success = status.success(),
            "task process exited"
        );

        if !status.success() {
            bail!("command `{cmd}` exited with status {code}");
        }
        Ok(())
    })
}
