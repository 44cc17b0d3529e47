// src/config/mod.rs

//! Options file handling.
//!
//! - [`model`] holds the raw TOML shape and the validated `ExecutionOptions`.
//! - [`validate`] turns one into the other.
//! - [`loader`] reads files from disk.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{DEFAULT_CONFIG_FILE, load_and_validate, load_from_path, parse_and_validate};
pub use model::{ExecutionOptions, ExecutionSection, RawOptionsFile, StrategySelection};
