// src/exec/builder.rs

//! Construction of an open [`Executor`].
//!
//! Every collaborator has a production default (`SystemClock`,
//! `TracingEventHandler`, no bus, empty option bundle), so callers only
//! override what they care about.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ExecutionOptions;
use crate::env::{Clock, ExecutionEnvironment, OptionsBundle, SystemClock};
use crate::errors::Result;
use crate::events::{EventBus, EventHandler, EventSink, TracingEventHandler};
use crate::exec::Executor;

pub struct ExecutorBuilder {
    exec_root: PathBuf,
    clock: Arc<dyn Clock>,
    verbose_failures: bool,
    reports_subcommands: bool,
    options: OptionsBundle,
    handler: Arc<dyn EventHandler>,
    bus: Option<Arc<dyn EventBus>>,
}

impl ExecutorBuilder {
    pub fn new(exec_root: impl Into<PathBuf>) -> Self {
        Self {
            exec_root: exec_root.into(),
            clock: Arc::new(SystemClock::new()),
            verbose_failures: false,
            reports_subcommands: false,
            options: OptionsBundle::new(),
            handler: Arc::new(TracingEventHandler),
            bus: None,
        }
    }

    /// Start from a validated options file: copies its flags and places the
    /// options in the bundle. The options' own `exec_root` is not consulted;
    /// callers decide the root.
    pub fn from_options(exec_root: impl Into<PathBuf>, options: &ExecutionOptions) -> Self {
        Self::new(exec_root)
            .verbose_failures(options.verbose_failures())
            .reports_subcommands(options.subcommands())
            .with_options(options.clone())
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn verbose_failures(mut self, enabled: bool) -> Self {
        self.verbose_failures = enabled;
        self
    }

    pub fn reports_subcommands(mut self, enabled: bool) -> Self {
        self.reports_subcommands = enabled;
        self
    }

    /// Add an option class to the bundle.
    pub fn with_options<O: std::any::Any + Send + Sync>(mut self, options: O) -> Self {
        self.options.insert(options);
        self
    }

    pub fn with_event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.handler = handler;
        self
    }

    pub fn with_event_bus(mut self, bus: Arc<dyn EventBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Build the executor in the `Open` state.
    pub fn build(self) -> Result<Executor> {
        let env = ExecutionEnvironment::new(
            self.exec_root,
            self.clock,
            self.verbose_failures,
            Arc::new(self.options),
        )?;
        let events = EventSink::new(self.handler, self.bus, self.reports_subcommands);
        Ok(Executor::new(env, events))
    }
}
