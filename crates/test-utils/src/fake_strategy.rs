use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use exec_dispatch::context::{ActionContext, Spawn, SpawnActionContext, SpawnFuture, SpawnResult};
use exec_dispatch::env::Clock;
use exec_dispatch::errors::DispatchError;
use exec_dispatch::exec::Executor;

/// A fake spawn strategy that:
/// - records the mnemonic of every spawn it was asked to run
/// - reports the subcommand like a real strategy would
/// - immediately returns the configured exit code (0 unless overridden).
#[derive(Debug, Clone)]
pub struct FakeSpawnStrategy {
    name: String,
    exit_code: i32,
    executed: Arc<Mutex<Vec<String>>>,
}

impl FakeSpawnStrategy {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            exit_code: 0,
            executed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(name: &str, exit_code: i32) -> Self {
        Self {
            exit_code,
            ..Self::new(name)
        }
    }

    /// Mnemonics of the spawns run so far, in order.
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

impl ActionContext for FakeSpawnStrategy {}

impl SpawnActionContext for FakeSpawnStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn exec<'a>(&'a self, spawn: &'a Spawn, executor: &'a Executor) -> SpawnFuture<'a> {
        Box::pin(async move {
            self.executed
                .lock()
                .unwrap()
                .push(spawn.mnemonic.to_string());

            if executor.reports_subcommands() {
                executor.report_subcommand(&spawn.reason(), &spawn.describe(executor.exec_root()));
            }

            if self.exit_code != 0 {
                return Err(DispatchError::SpawnFailed {
                    mnemonic: spawn.mnemonic.to_string(),
                    exit_code: self.exit_code,
                    detail: String::new(),
                });
            }

            Ok(SpawnResult {
                exit_code: 0,
                wall_time: Duration::ZERO,
            })
        })
    }
}

/// Clock whose time only moves when a test advances it, or by a fixed
/// tick on every `nano_time` read.
#[derive(Debug, Default)]
pub struct ManualClock {
    nanos: AtomicU64,
    tick: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each `nano_time` call returns the current time, then advances it by
    /// `tick`.
    pub fn ticking(tick: Duration) -> Self {
        Self {
            nanos: AtomicU64::new(0),
            tick: tick.as_nanos() as u64,
        }
    }

    pub fn advance(&self, by: Duration) {
        self.nanos.fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn current_time_millis(&self) -> u64 {
        self.nanos.load(Ordering::SeqCst) / 1_000_000
    }

    fn nano_time(&self) -> u64 {
        self.nanos.fetch_add(self.tick, Ordering::SeqCst)
    }
}
