// src/exec/executor.rs

//! The executor facade handed to action execution code.
//!
//! It combines the build-scoped environment, the event sink and the two
//! registries behind one object. An executor starts `Open`: providers bind
//! contexts and spawn strategies into it. `seal` moves it to `Sealed`,
//! after which it only answers queries and is shared between all
//! action-execution threads.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::context::{
    ActionContext, ContextProvider, ContextRegistry, SpawnActionContext, SpawnStrategyResolver,
};
use crate::env::{Clock, ExecutionEnvironment, OptionsBundle};
use crate::errors::{DispatchError, Result};
use crate::events::{EventBus, EventHandler, EventSink};
use crate::types::{ExecutorState, Mnemonic};

pub struct Executor {
    env: ExecutionEnvironment,
    events: EventSink,
    contexts: ContextRegistry,
    spawn_strategies: SpawnStrategyResolver,
    // Held by every registration and by `seal`; `sealed` flips while it is
    // held, after both registries are frozen.
    lifecycle: Mutex<()>,
    sealed: AtomicBool,
}

impl Executor {
    pub fn new(env: ExecutionEnvironment, events: EventSink) -> Self {
        Self {
            env,
            events,
            contexts: ContextRegistry::new(),
            spawn_strategies: SpawnStrategyResolver::new(),
            lifecycle: Mutex::new(()),
            sealed: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> ExecutorState {
        if self.sealed.load(Ordering::Acquire) {
            ExecutorState::Sealed
        } else {
            ExecutorState::Open
        }
    }

    // ---- registration (Open) ----

    pub fn register_context<C>(&self, implementation: Arc<C>) -> Result<()>
    where
        C: ActionContext + ?Sized,
    {
        let _open = self.lock_open("action context")?;
        self.contexts.register(implementation)
    }

    pub fn register_default_spawn_strategy(
        &self,
        strategy: Arc<dyn SpawnActionContext>,
    ) -> Result<()> {
        let _open = self.lock_open("default spawn strategy")?;
        self.spawn_strategies.register_default(strategy)
    }

    pub fn register_spawn_strategy(
        &self,
        mnemonic: Mnemonic,
        strategy: Arc<dyn SpawnActionContext>,
    ) -> Result<()> {
        let _open = self.lock_open("spawn strategy")?;
        self.spawn_strategies.register_for_mnemonic(mnemonic, strategy)
    }

    /// Let `provider` bind its contexts.
    pub fn install(&self, provider: &dyn ContextProvider) -> Result<()> {
        debug!(provider = provider.name(), "installing context provider");
        provider.register_contexts(self)
    }

    /// Close registration and start answering queries.
    ///
    /// The spawn table is sealed first: if it has no default the call fails
    /// with `MissingDefaultStrategy` and the whole executor stays open. The
    /// default strategy is also bound as the `dyn SpawnActionContext`
    /// capability unless a provider bound one explicitly.
    pub fn seal(&self) -> Result<()> {
        let _open = self.lock_open("executor")?;
        self.spawn_strategies.seal()?;
        let default = self.spawn_strategies.default_strategy()?;
        if self
            .contexts
            .register_if_absent::<dyn SpawnActionContext>(default)?
        {
            debug!("default spawn strategy bound as spawn action context");
        }
        self.contexts.seal()?;
        self.sealed.store(true, Ordering::Release);

        info!(
            exec_root = %self.env.exec_root().display(),
            verbose_failures = self.env.verbose_failures(),
            reports_subcommands = self.events.reports_subcommands(),
            "executor sealed"
        );
        Ok(())
    }

    // ---- environment ----

    /// Directory under which every action runs.
    pub fn exec_root(&self) -> &Path {
        self.env.exec_root()
    }

    /// Not hermetic: only for timing and reporting.
    pub fn clock(&self) -> &dyn Clock {
        self.env.clock()
    }

    pub fn event_bus(&self) -> Option<&Arc<dyn EventBus>> {
        self.events.event_bus()
    }

    pub fn verbose_failures(&self) -> bool {
        self.env.verbose_failures()
    }

    pub fn options(&self) -> &OptionsBundle {
        self.env.options()
    }

    // ---- dispatch (Sealed) ----

    /// Look up the implementation of capability `C`.
    ///
    /// `UnboundCapability` means the executor was assembled without a
    /// provider some action depends on; propagate it and abort the build.
    /// Before `seal` every lookup fails with `NotSealed`.
    pub fn context<C>(&self) -> Result<Arc<C>>
    where
        C: ActionContext + ?Sized,
    {
        self.ensure_sealed(std::any::type_name::<C>())?;
        self.contexts.lookup::<C>()
    }

    /// Spawn strategy for actions with the given mnemonic, falling back to
    /// the default.
    ///
    /// The only error is `NotSealed`, returned when called before `seal`.
    /// On a sealed executor this always yields a strategy, so action code
    /// running after setup may treat an `Err` as a wiring bug.
    pub fn spawn_action_context(&self, mnemonic: &str) -> Result<Arc<dyn SpawnActionContext>> {
        self.ensure_sealed(&format!("spawn strategy for '{mnemonic}'"))?;
        self.spawn_strategies.resolve(mnemonic)
    }

    pub fn context_capabilities(&self) -> Vec<&'static str> {
        self.contexts.capabilities()
    }

    /// `(mnemonic, strategy)` for every explicit override, plus the default
    /// strategy name.
    pub fn spawn_strategy_bindings(&self) -> Result<(String, Vec<(String, String)>)> {
        self.ensure_sealed("spawn strategy table")?;
        let default = self.spawn_strategies.default_strategy()?;
        Ok((default.name().to_string(), self.spawn_strategies.bindings()))
    }

    // ---- events ----

    pub fn reports_subcommands(&self) -> bool {
        self.events.reports_subcommands()
    }

    pub fn report_subcommand(&self, reason: &str, message: &str) {
        self.events.report_subcommand(reason, message)
    }

    /// Handler for informational messages. Action failures are returned as
    /// errors rather than reported here.
    pub fn event_handler(&self) -> &Arc<dyn EventHandler> {
        self.events.event_handler()
    }

    fn lock_open(&self, what: &str) -> Result<MutexGuard<'_, ()>> {
        let guard = self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner);
        if self.sealed.load(Ordering::Acquire) {
            return Err(DispatchError::RegistrySealed(what.to_string()));
        }
        Ok(guard)
    }

    fn ensure_sealed(&self, what: &str) -> Result<()> {
        if self.sealed.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(DispatchError::NotSealed(what.to_string()))
        }
    }
}
