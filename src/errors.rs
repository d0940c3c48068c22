// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskdagError {
    #[error("Duplicate task found: {0}")]
    DuplicateTask(String),

    #[error("Start task '{0}' is missing from the task graph")]
    StartTaskMissing(String),

    #[error("Dependency cycle detected: {0}")]
    DependencyCycle(String),

    #[error("Invalid concurrency limit: {0} (must be >= 1)")]
    InvalidConcurrency(usize),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TaskdagError>;
