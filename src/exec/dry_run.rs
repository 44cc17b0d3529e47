// src/exec/dry_run.rs

use std::time::Duration;

use tracing::info;

use crate::context::{ActionContext, Spawn, SpawnActionContext, SpawnFuture, SpawnResult};
use crate::errors::Result;
use crate::exec::Executor;

/// Strategy that reports what it would run and succeeds without running it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunSpawnStrategy;

impl ActionContext for DryRunSpawnStrategy {}

impl SpawnActionContext for DryRunSpawnStrategy {
    fn name(&self) -> &str {
        "dry-run"
    }

    fn exec<'a>(&'a self, spawn: &'a Spawn, executor: &'a Executor) -> SpawnFuture<'a> {
        Box::pin(skip_spawn(spawn, executor))
    }
}

async fn skip_spawn(spawn: &Spawn, executor: &Executor) -> Result<SpawnResult> {
    if executor.reports_subcommands() {
        executor.report_subcommand(&spawn.reason(), &spawn.describe(executor.exec_root()));
    }
    info!(
        mnemonic = %spawn.mnemonic,
        argc = spawn.arguments.len(),
        "dry-run: skipping spawn"
    );
    Ok(SpawnResult {
        exit_code: 0,
        wall_time: Duration::ZERO,
    })
}
