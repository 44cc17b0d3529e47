use std::sync::Arc;
use std::time::Duration;

use exec_dispatch::env::Clock;
use exec_dispatch_test_utils::{FakeSpawnStrategy, ManualClock, TestExecutorBuilder};

#[test]
fn executor_hands_out_the_injected_clock() {
    let clock = Arc::new(ManualClock::new());
    let (executor, _) = TestExecutorBuilder::new()
        .clock(clock.clone())
        .default_strategy(Arc::new(FakeSpawnStrategy::new("local")))
        .build();

    assert_eq!(executor.clock().current_time_millis(), 0);
    assert_eq!(executor.clock().nano_time(), 0);

    clock.advance(Duration::from_millis(1500));
    assert_eq!(executor.clock().current_time_millis(), 1500);
    assert_eq!(executor.clock().nano_time(), 1_500_000_000);
}

#[test]
fn environment_flags_pass_through_the_facade() {
    let root = tempfile::tempdir().unwrap();
    let (executor, _) = TestExecutorBuilder::new()
        .exec_root(root.path())
        .verbose_failures(true)
        .default_strategy(Arc::new(FakeSpawnStrategy::new("local")))
        .build();

    assert_eq!(executor.exec_root(), root.path());
    assert!(executor.verbose_failures());
    assert!(!executor.reports_subcommands());
    assert!(executor.event_bus().is_none());
}
