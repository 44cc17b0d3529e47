// src/exec/local.rs

//! Local spawn strategy: runs the spawn's argv as a child process of the
//! build tool, inside the execution root.

use std::process::Stdio;
use std::time::Duration;

use anyhow::Context;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::context::{ActionContext, Spawn, SpawnActionContext, SpawnFuture, SpawnResult};
use crate::errors::{DispatchError, Result};
use crate::exec::Executor;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSpawnStrategy;

impl ActionContext for LocalSpawnStrategy {}

impl SpawnActionContext for LocalSpawnStrategy {
    fn name(&self) -> &str {
        "local"
    }

    fn exec<'a>(&'a self, spawn: &'a Spawn, executor: &'a Executor) -> SpawnFuture<'a> {
        Box::pin(run_local(spawn, executor))
    }
}

/// Run a single spawn to completion.
///
/// - The subcommand is reported before the process starts (only rendered
///   when the executor reports subcommands).
/// - The child gets exactly the spawn's environment, nothing inherited.
/// - Output is consumed and logged at debug; a non-zero exit becomes
///   `SpawnFailed`, carrying the command line when failures are verbose.
async fn run_local(spawn: &Spawn, executor: &Executor) -> Result<SpawnResult> {
    let (program, args) = spawn
        .arguments
        .split_first()
        .ok_or_else(|| DispatchError::EmptyCommandLine(spawn.mnemonic.to_string()))?;

    if executor.reports_subcommands() {
        executor.report_subcommand(&spawn.reason(), &spawn.describe(executor.exec_root()));
    }

    info!(
        mnemonic = %spawn.mnemonic,
        program = %program,
        exec_root = %executor.exec_root().display(),
        "starting local spawn"
    );

    let mut cmd = Command::new(program);
    cmd.args(args)
        .current_dir(executor.exec_root())
        .env_clear()
        .envs(&spawn.environment)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let started = executor.clock().nano_time();
    let output = cmd
        .output()
        .await
        .with_context(|| format!("spawning '{}' for {} action", program, spawn.mnemonic))?;
    let wall_time = Duration::from_nanos(executor.clock().nano_time().saturating_sub(started));

    for line in String::from_utf8_lossy(&output.stdout).lines() {
        debug!(mnemonic = %spawn.mnemonic, "stdout: {}", line);
    }
    for line in String::from_utf8_lossy(&output.stderr).lines() {
        debug!(mnemonic = %spawn.mnemonic, "stderr: {}", line);
    }

    let exit_code = output.status.code().unwrap_or(-1);
    info!(
        mnemonic = %spawn.mnemonic,
        exit_code,
        success = output.status.success(),
        wall_time_ms = wall_time.as_millis() as u64,
        "local spawn exited"
    );

    if !output.status.success() {
        warn!(mnemonic = %spawn.mnemonic, exit_code, "local spawn failed");
        let detail = if executor.verbose_failures() {
            format!(": {}", spawn.describe(executor.exec_root()))
        } else {
            String::new()
        };
        return Err(DispatchError::SpawnFailed {
            mnemonic: spawn.mnemonic.to_string(),
            exit_code,
            detail,
        });
    }

    Ok(SpawnResult {
        exit_code,
        wall_time,
    })
}
