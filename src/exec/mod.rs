// src/exec/mod.rs

//! Executor facade and the built-in spawn strategies.
//!
//! - [`executor`] holds the `Executor` facade consumed by action code.
//! - [`builder`] constructs an open executor from its collaborators.
//! - [`local`] runs spawns as child processes via `tokio::process`.
//! - [`dry_run`] reports spawns without running them.

pub mod builder;
pub mod dry_run;
pub mod executor;
pub mod local;

use std::sync::Arc;

pub use builder::ExecutorBuilder;
pub use dry_run::DryRunSpawnStrategy;
pub use executor::Executor;
pub use local::LocalSpawnStrategy;

use crate::context::StrategyCatalog;
use crate::errors::Result;

/// Catalog of the strategies compiled into this crate.
pub fn builtin_strategies() -> Result<StrategyCatalog> {
    let mut catalog = StrategyCatalog::new();
    catalog.add(Arc::new(LocalSpawnStrategy))?;
    catalog.add(Arc::new(DryRunSpawnStrategy))?;
    Ok(catalog)
}
