#![cfg(unix)]

use std::sync::Arc;
use std::time::Duration;

use exec_dispatch::context::{Spawn, SpawnActionContext};
use exec_dispatch::env::Clock;
use exec_dispatch::errors::DispatchError;
use exec_dispatch::events::{Event, EventKind};
use exec_dispatch::exec::{DryRunSpawnStrategy, LocalSpawnStrategy};
use exec_dispatch::types::Mnemonic;
use exec_dispatch_test_utils::{
    JournalEntry, ManualClock, TestExecutorBuilder, init_tracing, with_timeout,
};

fn sh(mnemonic: &str, script: &str) -> Spawn {
    Spawn::new(
        Mnemonic::new(mnemonic).unwrap(),
        vec!["/bin/sh".into(), "-c".into(), script.into()],
    )
}

#[tokio::test]
async fn successful_spawn_reports_then_runs() {
    init_tracing();
    let root = tempfile::tempdir().unwrap();
    let (executor, journal) = TestExecutorBuilder::new()
        .exec_root(root.path())
        .reports_subcommands(true)
        .default_strategy(Arc::new(LocalSpawnStrategy))
        .build();

    // Runs inside the exec root: the marker lands there.
    let spawn = sh("Genrule", "echo built > marker.txt").with_env("LANG", "C");
    let strategy = executor.spawn_action_context("Genrule").unwrap();
    let result = with_timeout(strategy.exec(&spawn, &executor)).await.unwrap();

    assert!(result.success());
    assert_eq!(
        std::fs::read_to_string(root.path().join("marker.txt")).unwrap(),
        "built\n"
    );

    let entries = journal.entries();
    assert_eq!(entries.len(), 1);
    match &entries[0] {
        JournalEntry::Handled(Event { kind, message }) => {
            assert_eq!(*kind, EventKind::Subcommand);
            assert!(message.starts_with("# Genrule action\n"));
            assert!(message.contains("LANG=C"));
        }
        other => panic!("unexpected journal entry: {other:?}"),
    }
}

#[tokio::test]
async fn environment_is_not_inherited() {
    let root = tempfile::tempdir().unwrap();
    let (executor, _) = TestExecutorBuilder::new()
        .exec_root(root.path())
        .default_strategy(Arc::new(LocalSpawnStrategy))
        .build();

    let spawn = sh("Genrule", r#"test -z "$HOME" && test "$ONLY" = yes"#).with_env("ONLY", "yes");
    let result = LocalSpawnStrategy.exec(&spawn, &executor).await.unwrap();
    assert_eq!(result.exit_code, 0);
}

#[tokio::test]
async fn non_zero_exit_is_spawn_failed_with_verbose_detail() {
    let root = tempfile::tempdir().unwrap();
    let (executor, _) = TestExecutorBuilder::new()
        .exec_root(root.path())
        .verbose_failures(true)
        .default_strategy(Arc::new(LocalSpawnStrategy))
        .build();

    match LocalSpawnStrategy.exec(&sh("CppCompile", "exit 3"), &executor).await {
        Err(DispatchError::SpawnFailed {
            mnemonic,
            exit_code,
            detail,
        }) => {
            assert_eq!(mnemonic, "CppCompile");
            assert_eq!(exit_code, 3);
            assert!(detail.contains("exit 3"));
        }
        other => panic!("Expected SpawnFailed, got: {other:?}"),
    }
}

#[tokio::test]
async fn terse_failures_omit_the_command_line() {
    let (executor, _) = TestExecutorBuilder::new()
        .default_strategy(Arc::new(LocalSpawnStrategy))
        .build();

    match LocalSpawnStrategy.exec(&sh("CppCompile", "exit 1"), &executor).await {
        Err(DispatchError::SpawnFailed { detail, .. }) => assert!(detail.is_empty()),
        other => panic!("Expected SpawnFailed, got: {other:?}"),
    }
}

#[tokio::test]
async fn empty_command_line_is_rejected() {
    let (executor, _) = TestExecutorBuilder::new()
        .default_strategy(Arc::new(LocalSpawnStrategy))
        .build();

    let spawn = Spawn::new(Mnemonic::new("Genrule").unwrap(), Vec::new());
    assert!(matches!(
        LocalSpawnStrategy.exec(&spawn, &executor).await,
        Err(DispatchError::EmptyCommandLine(_))
    ));
}

#[tokio::test]
async fn wall_time_comes_from_the_executor_clock() {
    let clock = Arc::new(ManualClock::ticking(Duration::from_secs(7)));
    let (executor, _) = TestExecutorBuilder::new()
        .clock(clock.clone())
        .default_strategy(Arc::new(LocalSpawnStrategy))
        .build();

    let result = LocalSpawnStrategy
        .exec(&sh("Genrule", "exit 0"), &executor)
        .await
        .unwrap();
    assert_eq!(result.wall_time, Duration::from_secs(7));
    assert_eq!(clock.nano_time(), 14_000_000_000);
}

#[test]
fn described_command_line_reproduces_the_spawn() {
    let root = tempfile::tempdir().unwrap();
    let spawn = sh("Genrule", r#"echo "$MSG" > 'out file.txt'"#).with_env("MSG", "hello world");
    let line = spawn.describe(root.path());

    let status = std::process::Command::new("/bin/sh")
        .arg("-c")
        .arg(&line)
        .status()
        .unwrap();
    assert!(status.success(), "failed to replay: {line}");
    assert_eq!(
        std::fs::read_to_string(root.path().join("out file.txt")).unwrap(),
        "hello world\n"
    );
}

#[tokio::test]
async fn dry_run_reports_without_running() {
    let root = tempfile::tempdir().unwrap();
    let (executor, journal) = TestExecutorBuilder::new()
        .exec_root(root.path())
        .reports_subcommands(true)
        .default_strategy(Arc::new(LocalSpawnStrategy))
        .strategy_for("Genrule", Arc::new(DryRunSpawnStrategy))
        .build();

    let spawn = sh("Genrule", "echo built > marker.txt");
    let strategy = executor.spawn_action_context("Genrule").unwrap();
    assert_eq!(strategy.name(), "dry-run");

    let result = strategy.exec(&spawn, &executor).await.unwrap();
    assert!(result.success());
    assert!(!root.path().join("marker.txt").exists());
    assert_eq!(journal.len(), 1);
}
