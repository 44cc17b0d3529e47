use std::sync::Arc;

use exec_dispatch::context::{Spawn, SpawnActionContext};
use exec_dispatch::errors::DispatchError;
use exec_dispatch::types::{ExecutorState, Mnemonic};
use exec_dispatch_test_utils::{FakeSpawnStrategy, TestExecutorBuilder, init_tracing};

#[test]
fn cpp_compile_is_sandboxed_everything_else_is_local() {
    init_tracing();
    let local = Arc::new(FakeSpawnStrategy::new("local"));
    let sandboxed = Arc::new(FakeSpawnStrategy::new("sandboxed"));
    let local_dyn: Arc<dyn SpawnActionContext> = local.clone();
    let sandboxed_dyn: Arc<dyn SpawnActionContext> = sandboxed.clone();

    let (executor, _) = TestExecutorBuilder::new()
        .default_strategy(local_dyn.clone())
        .strategy_for("CppCompile", sandboxed_dyn.clone())
        .build();

    let cpp = executor.spawn_action_context("CppCompile").unwrap();
    let javac = executor.spawn_action_context("Javac").unwrap();
    assert!(Arc::ptr_eq(&cpp, &sandboxed_dyn));
    assert!(Arc::ptr_eq(&javac, &local_dyn));
    assert_eq!(cpp.name(), "sandboxed");
    assert_eq!(javac.name(), "local");
}

#[test]
fn explicit_binding_never_drifts_to_default() {
    let (executor, _) = TestExecutorBuilder::new()
        .default_strategy(Arc::new(FakeSpawnStrategy::new("local")))
        .strategy_for("Javac", Arc::new(FakeSpawnStrategy::new("worker")))
        .build();

    for _ in 0..100 {
        assert_eq!(
            executor.spawn_action_context("Javac").unwrap().name(),
            "worker"
        );
    }
}

#[test]
fn sealing_without_default_fails_and_stays_open() {
    let (executor, _) = TestExecutorBuilder::new()
        .strategy_for("Javac", Arc::new(FakeSpawnStrategy::new("worker")))
        .build_open();

    let err = executor.seal().unwrap_err();
    assert!(matches!(err, DispatchError::MissingDefaultStrategy));
    assert_eq!(executor.state(), ExecutorState::Open);
}

#[test]
fn duplicate_mnemonic_binding_is_rejected() {
    let (executor, _) = TestExecutorBuilder::new()
        .default_strategy(Arc::new(FakeSpawnStrategy::new("local")))
        .strategy_for("Javac", Arc::new(FakeSpawnStrategy::new("worker")))
        .build_open();

    let err = executor
        .register_spawn_strategy(
            Mnemonic::new("Javac").unwrap(),
            Arc::new(FakeSpawnStrategy::new("local")),
        )
        .unwrap_err();
    assert!(matches!(err, DispatchError::DuplicateBinding(ref what) if what.contains("Javac")));
}

#[tokio::test]
async fn resolved_strategy_runs_the_spawn() {
    let sandboxed = Arc::new(FakeSpawnStrategy::new("sandboxed"));
    let local = Arc::new(FakeSpawnStrategy::new("local"));
    let (executor, _) = TestExecutorBuilder::new()
        .default_strategy(local.clone())
        .strategy_for("CppCompile", sandboxed.clone())
        .build();

    for mnemonic in ["CppCompile", "Javac", "CppCompile"] {
        let spawn = Spawn::new(Mnemonic::new(mnemonic).unwrap(), vec!["true".into()]);
        let strategy = executor.spawn_action_context(mnemonic).unwrap();
        let result = strategy.exec(&spawn, &executor).await.unwrap();
        assert!(result.success());
    }

    assert_eq!(sandboxed.executed(), vec!["CppCompile", "CppCompile"]);
    assert_eq!(local.executed(), vec!["Javac"]);
}

#[tokio::test]
async fn failing_strategy_surfaces_spawn_failed() {
    let (executor, _) = TestExecutorBuilder::new()
        .default_strategy(Arc::new(FakeSpawnStrategy::failing("local", 2)))
        .build();

    let spawn = Spawn::new(Mnemonic::new("Genrule").unwrap(), vec!["false".into()]);
    let strategy = executor.spawn_action_context("Genrule").unwrap();
    match strategy.exec(&spawn, &executor).await {
        Err(DispatchError::SpawnFailed { exit_code, .. }) => assert_eq!(exit_code, 2),
        other => panic!("Expected SpawnFailed, got: {other:?}"),
    }
}
