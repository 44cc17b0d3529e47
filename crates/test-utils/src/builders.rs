#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use exec_dispatch::context::SpawnActionContext;
use exec_dispatch::env::Clock;
use exec_dispatch::exec::{Executor, ExecutorBuilder};
use exec_dispatch::types::Mnemonic;

use crate::recording::{Journal, RecordingEventBus, RecordingEventHandler};

/// Builder for a sealed `Executor` wired to recording spies.
pub struct TestExecutorBuilder {
    journal: Journal,
    exec_root: PathBuf,
    reports_subcommands: bool,
    verbose_failures: bool,
    with_bus: bool,
    clock: Option<Arc<dyn Clock>>,
    default: Option<Arc<dyn SpawnActionContext>>,
    overrides: Vec<(String, Arc<dyn SpawnActionContext>)>,
}

impl TestExecutorBuilder {
    pub fn new() -> Self {
        Self {
            journal: Journal::new(),
            exec_root: std::env::temp_dir(),
            reports_subcommands: false,
            verbose_failures: false,
            with_bus: false,
            clock: None,
            default: None,
            overrides: Vec::new(),
        }
    }

    pub fn exec_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.exec_root = root.into();
        self
    }

    pub fn reports_subcommands(mut self, val: bool) -> Self {
        self.reports_subcommands = val;
        self
    }

    pub fn verbose_failures(mut self, val: bool) -> Self {
        self.verbose_failures = val;
        self
    }

    /// Attach a `RecordingEventBus` sharing the handler's journal.
    pub fn with_bus(mut self) -> Self {
        self.with_bus = true;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn default_strategy(mut self, strategy: Arc<dyn SpawnActionContext>) -> Self {
        self.default = Some(strategy);
        self
    }

    pub fn strategy_for(mut self, mnemonic: &str, strategy: Arc<dyn SpawnActionContext>) -> Self {
        self.overrides.push((mnemonic.to_string(), strategy));
        self
    }

    /// Build the executor without sealing it.
    pub fn build_open(self) -> (Executor, Journal) {
        let mut builder = ExecutorBuilder::new(self.exec_root)
            .reports_subcommands(self.reports_subcommands)
            .verbose_failures(self.verbose_failures)
            .with_event_handler(Arc::new(RecordingEventHandler::new(self.journal.clone())));
        if self.with_bus {
            builder = builder.with_event_bus(Arc::new(RecordingEventBus::new(self.journal.clone())));
        }
        if let Some(clock) = self.clock {
            builder = builder.with_clock(clock);
        }

        let executor = builder.build().expect("Failed to build executor from builder");
        if let Some(default) = self.default {
            executor
                .register_default_spawn_strategy(default)
                .expect("Failed to register default strategy");
        }
        for (mnemonic, strategy) in self.overrides {
            executor
                .register_spawn_strategy(Mnemonic::new(mnemonic).expect("valid mnemonic"), strategy)
                .expect("Failed to register mnemonic strategy");
        }
        (executor, self.journal)
    }

    /// Build and seal.
    pub fn build(self) -> (Executor, Journal) {
        let (executor, journal) = self.build_open();
        executor.seal().expect("Failed to seal executor from builder");
        (executor, journal)
    }
}

impl Default for TestExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
