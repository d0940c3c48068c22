// src/config/mod.rs

//! Task file loading and validation.
//!
//! A TOML task file is one way of producing [`crate::dag::TaskDescriptor`]s:
//! - `model.rs` defines the serde data model and the conversion to descriptors.
//! - `loader.rs` reads and parses the file.
//! - `validate.rs` checks basic invariants (non-empty, sane limits).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, parse_str};
pub use model::{ConfigFile, ConfigSection, RawConfigFile, TaskConfig};
pub use validate::validate_config;
