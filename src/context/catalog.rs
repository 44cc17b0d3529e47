// src/context/catalog.rs

//! Named spawn strategies and their configuration-driven wiring.
//!
//! The catalog knows every strategy the binary was built with, keyed by
//! [`SpawnActionContext::name`]. A [`StrategySelection`] (read from the
//! options file) then picks the default and the per-mnemonic overrides.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::config::StrategySelection;
use crate::context::provider::ContextProvider;
use crate::context::spawn::SpawnActionContext;
use crate::errors::{DispatchError, Result};
use crate::exec::Executor;

#[derive(Default, Clone)]
pub struct StrategyCatalog {
    strategies: BTreeMap<String, Arc<dyn SpawnActionContext>>,
}

impl StrategyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a strategy under its own name.
    pub fn add(&mut self, strategy: Arc<dyn SpawnActionContext>) -> Result<()> {
        let name = strategy.name().to_string();
        if self.strategies.contains_key(&name) {
            return Err(DispatchError::DuplicateBinding(format!(
                "spawn strategy named '{name}'"
            )));
        }
        self.strategies.insert(name, strategy);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn SpawnActionContext>> {
        self.strategies
            .get(name)
            .cloned()
            .ok_or_else(|| DispatchError::UnknownStrategy {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    pub fn names(&self) -> Vec<&str> {
        self.strategies.keys().map(String::as_str).collect()
    }

    /// Pair this catalog with a selection, producing a provider that binds
    /// the selected strategies.
    pub fn configured(self, selection: StrategySelection) -> ConfiguredStrategies {
        ConfiguredStrategies {
            catalog: self,
            selection,
        }
    }
}

/// Provider that binds the default and per-mnemonic strategies named by a
/// [`StrategySelection`].
pub struct ConfiguredStrategies {
    catalog: StrategyCatalog,
    selection: StrategySelection,
}

impl ContextProvider for ConfiguredStrategies {
    fn name(&self) -> &str {
        "configured-strategies"
    }

    fn register_contexts(&self, executor: &Executor) -> Result<()> {
        // Resolve every name before binding anything so a typo leaves the
        // executor untouched.
        let default = self.catalog.get(&self.selection.default)?;
        let overrides = self
            .selection
            .by_mnemonic
            .iter()
            .map(|(mnemonic, name)| self.catalog.get(name).map(|s| (mnemonic.clone(), s)))
            .collect::<Result<Vec<_>>>()?;

        executor.register_default_spawn_strategy(default)?;
        for (mnemonic, strategy) in overrides {
            debug!(%mnemonic, strategy = strategy.name(), "applying configured strategy");
            executor.register_spawn_strategy(mnemonic, strategy)?;
        }
        Ok(())
    }
}
