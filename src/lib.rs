// src/lib.rs

pub mod cli;
pub mod config;
pub mod context;
pub mod env;
pub mod errors;
pub mod events;
pub mod exec;
pub mod logging;
pub mod types;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, error, info};

use crate::cli::CliArgs;
use crate::config::{ExecutionOptions, load_and_validate};
use crate::context::{Spawn, StrategyCatalog};
use crate::errors::DispatchError;
use crate::events::{BuildEvent, ChannelEventBus, EventBus};
use crate::exec::{Executor, ExecutorBuilder, builtin_strategies};
use crate::types::Mnemonic;

/// High-level entry point used by `main.rs`. Returns the exit code.
///
/// This wires together:
/// - options loading
/// - executor construction, strategy wiring and sealing
/// - (optional) the action-logging event bus
/// - either the dry-run resolution table or one spawn
pub async fn run(args: CliArgs) -> Result<i32> {
    let options = load_and_validate(&args.config)?;
    let exec_root = resolve_exec_root(args.exec_root.as_deref(), &options)?;

    // Action logging: structured subcommand events are drained and logged.
    let (bus, drain) = if options.action_logging() {
        let (bus, mut rx) = ChannelEventBus::new();
        let drain = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                match event {
                    BuildEvent::Subcommand { reason, .. } => {
                        info!(%reason, "subcommand event");
                    }
                }
            }
            debug!("event bus drained (all senders dropped)");
        });
        (Some(Arc::new(bus) as Arc<dyn EventBus>), Some(drain))
    } else {
        (None, None)
    };

    let executor = build_executor(exec_root, &options, bus, builtin_strategies()?)?;

    let code = if args.dry_run {
        print_dry_run(&executor, &args.mnemonic)?;
        0
    } else {
        run_spawn(&executor, &args).await?
    };

    // Dropping the executor drops the last bus sender, ending the drain task.
    drop(executor);
    if let Some(drain) = drain {
        drain.await?;
    }

    Ok(code)
}

/// Build, wire and seal an executor from validated options.
///
/// The default and per-mnemonic strategies are taken from `catalog` by the
/// names in `options`; an unknown name fails before anything is bound.
pub fn build_executor(
    exec_root: PathBuf,
    options: &ExecutionOptions,
    bus: Option<Arc<dyn EventBus>>,
    catalog: StrategyCatalog,
) -> errors::Result<Executor> {
    let mut builder = ExecutorBuilder::from_options(exec_root, options);
    if let Some(bus) = bus {
        builder = builder.with_event_bus(bus);
    }
    let executor = builder.build()?;

    executor.install(&catalog.configured(options.strategies().clone()))?;
    executor.seal()?;
    Ok(executor)
}

/// CLI flag, then `[execution].exec_root`, then the current directory.
fn resolve_exec_root(cli_root: Option<&str>, options: &ExecutionOptions) -> Result<PathBuf> {
    let root = match (cli_root, options.exec_root()) {
        (Some(root), _) => PathBuf::from(root),
        (None, Some(root)) => root.to_path_buf(),
        (None, None) => std::env::current_dir()?,
    };

    if root.is_absolute() {
        Ok(root)
    } else {
        Ok(std::env::current_dir()?.join(root))
    }
}

async fn run_spawn(executor: &Executor, args: &CliArgs) -> Result<i32> {
    let mnemonic = Mnemonic::new(args.mnemonic.as_str())?;
    let spawn = Spawn::new(mnemonic, args.command.clone());
    let strategy = executor.spawn_action_context(spawn.mnemonic.as_str())?;
    info!(
        mnemonic = %spawn.mnemonic,
        strategy = strategy.name(),
        "dispatching spawn"
    );

    match strategy.exec(&spawn, executor).await {
        Ok(result) => Ok(result.exit_code),
        Err(DispatchError::SpawnFailed {
            mnemonic,
            exit_code,
            detail,
        }) => {
            error!(%mnemonic, exit_code, "{}", detail.trim_start_matches(": "));
            Ok(exit_code)
        }
        Err(e) => Err(e.into()),
    }
}

/// Dry-run output: the sealed tables and where `mnemonic` would go.
fn print_dry_run(executor: &Executor, mnemonic: &str) -> errors::Result<()> {
    let (default, bindings) = executor.spawn_strategy_bindings()?;

    println!("exec-dispatch dry-run");
    println!("  exec_root = {}", executor.exec_root().display());
    println!("  verbose_failures = {}", executor.verbose_failures());
    println!("  reports_subcommands = {}", executor.reports_subcommands());
    println!();

    println!("spawn strategies:");
    println!("  (default) -> {default}");
    for (m, strategy) in &bindings {
        println!("  {m} -> {strategy}");
    }
    println!();

    println!("action contexts ({}):", executor.context_capabilities().len());
    for capability in executor.context_capabilities() {
        println!("  - {capability}");
    }
    println!();

    let resolved = executor.spawn_action_context(mnemonic)?;
    println!("{mnemonic} would run with: {}", resolved.name());

    debug!("dry-run complete (no execution)");
    Ok(())
}
