// src/config/model.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::types::Mnemonic;

/// Options file as deserialized from TOML, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOptionsFile {
    #[serde(default)]
    pub execution: ExecutionSection,

    /// `Mnemonic = "strategy-name"` overrides.
    #[serde(default)]
    pub strategy: BTreeMap<String, String>,
}

/// `[execution]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutionSection {
    /// Absolute execution root. Defaults to the current directory.
    pub exec_root: Option<PathBuf>,
    pub verbose_failures: bool,
    /// Report every spawned subcommand to the event handler.
    pub subcommands: bool,
    /// Attach an event bus that receives structured subcommand events.
    pub action_logging: bool,
    /// Name of the default spawn strategy.
    pub spawn_strategy: String,
}

impl Default for ExecutionSection {
    fn default() -> Self {
        Self {
            exec_root: None,
            verbose_failures: false,
            subcommands: false,
            action_logging: false,
            spawn_strategy: "local".to_string(),
        }
    }
}

/// Which catalog strategy serves as default and which serve particular
/// mnemonics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategySelection {
    pub default: String,
    pub by_mnemonic: BTreeMap<Mnemonic, String>,
}

impl StrategySelection {
    pub fn with_default(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            by_mnemonic: BTreeMap::new(),
        }
    }

    pub fn with_override(mut self, mnemonic: Mnemonic, strategy: impl Into<String>) -> Self {
        self.by_mnemonic.insert(mnemonic, strategy.into());
        self
    }
}

/// Validated options. Also stored in the executor's option bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOptions {
    execution: ExecutionSection,
    strategies: StrategySelection,
}

impl ExecutionOptions {
    pub(crate) fn new_unchecked(execution: ExecutionSection, strategies: StrategySelection) -> Self {
        Self {
            execution,
            strategies,
        }
    }

    pub fn exec_root(&self) -> Option<&Path> {
        self.execution.exec_root.as_deref()
    }

    pub fn verbose_failures(&self) -> bool {
        self.execution.verbose_failures
    }

    pub fn subcommands(&self) -> bool {
        self.execution.subcommands
    }

    pub fn action_logging(&self) -> bool {
        self.execution.action_logging
    }

    pub fn strategies(&self) -> &StrategySelection {
        &self.strategies
    }
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        let execution = ExecutionSection::default();
        let strategies = StrategySelection::with_default(execution.spawn_strategy.clone());
        Self::new_unchecked(execution, strategies)
    }
}
