// src/context/mod.rs

//! Action contexts and spawn strategy dispatch.
//!
//! - [`registry`] holds the `ActionContext` marker and the type-indexed
//!   `ContextRegistry`.
//! - [`spawn`] defines the spawn capability (`SpawnActionContext`) and the
//!   `Spawn`/`SpawnResult` values it works on.
//! - [`resolver`] maps mnemonics to spawn strategies with a default.
//! - [`catalog`] names the available strategies and wires them from
//!   configuration.
//! - [`provider`] is the trait strategy-providing modules implement.

pub mod catalog;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod spawn;

pub use catalog::{ConfiguredStrategies, StrategyCatalog};
pub use provider::ContextProvider;
pub use registry::{ActionContext, ContextRegistry};
pub use resolver::SpawnStrategyResolver;
pub use spawn::{Spawn, SpawnActionContext, SpawnFuture, SpawnResult};
