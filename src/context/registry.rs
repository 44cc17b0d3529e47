// src/context/registry.rs

//! Type-indexed registry of action contexts.
//!
//! A capability is identified by its type, usually a trait object such as
//! `dyn SpawnActionContext`. Each capability has at most one implementation
//! per build. Bindings are collected under a mutex while the registry is
//! open; `seal` moves them into a `OnceLock`, after which lookups are plain
//! reads of an immutable map.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use tracing::{debug, error, info};

use crate::errors::{DispatchError, Result};

/// Marker for capabilities that can be looked up through the executor.
///
/// Capability traits extend this one; implementations opt in with an empty
/// `impl ActionContext for MyStrategy {}`.
pub trait ActionContext: Send + Sync + 'static {}

struct Binding {
    capability: &'static str,
    // Always an `Arc<C>` for the `C` whose `TypeId` keys this binding.
    implementation: Box<dyn Any + Send + Sync>,
}

type Bindings = HashMap<TypeId, Binding>;

#[derive(Default)]
pub struct ContextRegistry {
    pending: Mutex<Bindings>,
    sealed: OnceLock<Bindings>,
}

impl ContextRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `implementation` as the sole provider of capability `C`.
    pub fn register<C>(&self, implementation: Arc<C>) -> Result<()>
    where
        C: ActionContext + ?Sized,
    {
        let capability = type_name::<C>();
        let mut pending = self.lock_pending();
        if self.sealed.get().is_some() {
            return Err(DispatchError::RegistrySealed(capability.to_string()));
        }

        match pending.entry(TypeId::of::<C>()) {
            Entry::Occupied(_) => Err(DispatchError::DuplicateBinding(capability.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(Binding {
                    capability,
                    implementation: Box::new(implementation),
                });
                debug!(capability, "bound action context");
                Ok(())
            }
        }
    }

    /// Bind `implementation` unless `C` already has a binding.
    ///
    /// Returns whether the binding was added.
    pub(crate) fn register_if_absent<C>(&self, implementation: Arc<C>) -> Result<bool>
    where
        C: ActionContext + ?Sized,
    {
        match self.register(implementation) {
            Ok(()) => Ok(true),
            Err(DispatchError::DuplicateBinding(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Freeze the bindings. No registration is accepted afterwards.
    pub fn seal(&self) -> Result<()> {
        let mut pending = self.lock_pending();
        let bindings = std::mem::take(&mut *pending);
        let count = bindings.len();

        self.sealed
            .set(bindings)
            .map_err(|_| DispatchError::RegistrySealed("action context registry".to_string()))?;

        info!(contexts = count, "action context registry sealed");
        Ok(())
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.get().is_some()
    }

    /// Return the implementation bound to capability `C`.
    ///
    /// A miss means some module expected a capability that nobody provided;
    /// that is a broken executor assembly and the error should abort the
    /// build.
    pub fn lookup<C>(&self) -> Result<Arc<C>>
    where
        C: ActionContext + ?Sized,
    {
        let capability = type_name::<C>();
        let bindings = self
            .sealed
            .get()
            .ok_or_else(|| DispatchError::NotSealed(capability.to_string()))?;

        bindings
            .get(&TypeId::of::<C>())
            .and_then(|binding| binding.implementation.downcast_ref::<Arc<C>>())
            .cloned()
            .ok_or_else(|| {
                error!(capability, "no action context bound for capability");
                DispatchError::UnboundCapability(capability.to_string())
            })
    }

    /// Names of all bound capabilities, sorted. Empty while open.
    pub fn capabilities(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .sealed
            .get()
            .map(|bindings| bindings.values().map(|b| b.capability).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    fn lock_pending(&self) -> MutexGuard<'_, Bindings> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
