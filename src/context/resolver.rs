// src/context/resolver.rs

//! Mnemonic-keyed selection of spawn strategies.
//!
//! Every lookup falls back to the default strategy, so once the table is
//! sealed `resolve` answers for any mnemonic at all. Sealing is refused
//! until a default exists.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use tracing::{debug, info};

use crate::context::spawn::SpawnActionContext;
use crate::errors::{DispatchError, Result};
use crate::types::Mnemonic;

#[derive(Default)]
struct PendingTable {
    default: Option<Arc<dyn SpawnActionContext>>,
    by_mnemonic: HashMap<String, Arc<dyn SpawnActionContext>>,
}

struct StrategyTable {
    default: Arc<dyn SpawnActionContext>,
    by_mnemonic: HashMap<String, Arc<dyn SpawnActionContext>>,
}

#[derive(Default)]
pub struct SpawnStrategyResolver {
    pending: Mutex<PendingTable>,
    sealed: OnceLock<StrategyTable>,
}

impl SpawnStrategyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_default(&self, strategy: Arc<dyn SpawnActionContext>) -> Result<()> {
        let mut pending = self.lock_open("default spawn strategy")?;
        if pending.default.is_some() {
            return Err(DispatchError::DuplicateBinding(
                "default spawn strategy".to_string(),
            ));
        }
        debug!(strategy = strategy.name(), "bound default spawn strategy");
        pending.default = Some(strategy);
        Ok(())
    }

    pub fn register_for_mnemonic(
        &self,
        mnemonic: Mnemonic,
        strategy: Arc<dyn SpawnActionContext>,
    ) -> Result<()> {
        let what = format!("spawn strategy for mnemonic '{mnemonic}'");
        let mut pending = self.lock_open(&what)?;
        if pending.by_mnemonic.contains_key(mnemonic.as_str()) {
            return Err(DispatchError::DuplicateBinding(what));
        }
        debug!(%mnemonic, strategy = strategy.name(), "bound spawn strategy");
        pending.by_mnemonic.insert(mnemonic.as_str().to_string(), strategy);
        Ok(())
    }

    /// Freeze the table.
    ///
    /// Fails with `MissingDefaultStrategy` if no default was registered; the
    /// table then stays open with its bindings intact.
    pub fn seal(&self) -> Result<()> {
        let mut pending = self.lock_open("spawn strategy table")?;
        let default = pending
            .default
            .take()
            .ok_or(DispatchError::MissingDefaultStrategy)?;
        let by_mnemonic = std::mem::take(&mut pending.by_mnemonic);

        info!(
            default = default.name(),
            overrides = by_mnemonic.len(),
            "spawn strategy table sealed"
        );

        let table = StrategyTable {
            default,
            by_mnemonic,
        };
        if self.sealed.set(table).is_err() {
            return Err(DispatchError::RegistrySealed(
                "spawn strategy table".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.get().is_some()
    }

    /// Strategy for `mnemonic`, or the default if it has no binding.
    ///
    /// Only fails when called before `seal`.
    pub fn resolve(&self, mnemonic: &str) -> Result<Arc<dyn SpawnActionContext>> {
        let table = self
            .sealed
            .get()
            .ok_or_else(|| DispatchError::NotSealed(format!("spawn strategy for '{mnemonic}'")))?;
        Ok(Arc::clone(
            table.by_mnemonic.get(mnemonic).unwrap_or(&table.default),
        ))
    }

    /// The default strategy. Only fails when called before `seal`.
    pub fn default_strategy(&self) -> Result<Arc<dyn SpawnActionContext>> {
        self.sealed
            .get()
            .map(|table| Arc::clone(&table.default))
            .ok_or_else(|| DispatchError::NotSealed("default spawn strategy".to_string()))
    }

    /// `(mnemonic, strategy name)` pairs for every explicit binding, sorted
    /// by mnemonic. Empty while open.
    pub fn bindings(&self) -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = self
            .sealed
            .get()
            .map(|table| {
                table
                    .by_mnemonic
                    .iter()
                    .map(|(m, s)| (m.clone(), s.name().to_string()))
                    .collect()
            })
            .unwrap_or_default();
        out.sort();
        out
    }

    // The sealed check happens under the lock so a registration racing with
    // `seal` is either part of the sealed table or rejected.
    fn lock_open(&self, what: &str) -> Result<MutexGuard<'_, PendingTable>> {
        let guard = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if self.sealed.get().is_some() {
            return Err(DispatchError::RegistrySealed(what.to_string()));
        }
        Ok(guard)
    }
}
