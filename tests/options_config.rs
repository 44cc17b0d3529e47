use std::io::Write;

use exec_dispatch::build_executor;
use exec_dispatch::config::{ExecutionOptions, load_and_validate, parse_and_validate};
use exec_dispatch::errors::DispatchError;
use exec_dispatch::exec::builtin_strategies;
use tempfile::NamedTempFile;

fn write_options(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn loads_strategy_overrides_from_file() {
    let file = write_options(
        r#"
[execution]
verbose_failures = true
subcommands = true
spawn_strategy = "local"

[strategy]
CppCompile = "dry-run"
"#,
    );

    let options = load_and_validate(file.path()).unwrap();
    assert!(options.verbose_failures());
    assert!(options.subcommands());
    assert!(!options.action_logging());
    assert_eq!(options.strategies().default, "local");
    assert_eq!(options.strategies().by_mnemonic.len(), 1);

    let executor =
        build_executor(std::env::temp_dir(), &options, None, builtin_strategies().unwrap())
            .unwrap();
    assert_eq!(
        executor.spawn_action_context("CppCompile").unwrap().name(),
        "dry-run"
    );
    assert_eq!(executor.spawn_action_context("Javac").unwrap().name(), "local");
    assert_eq!(executor.options().get::<ExecutionOptions>(), Some(&options));
    assert!(executor.verbose_failures());
}

#[test]
fn unknown_strategy_name_fails_before_binding() {
    let options = parse_and_validate(
        r#"
[strategy]
Javac = "worker"
"#,
    )
    .unwrap();

    let result = build_executor(
        std::env::temp_dir(),
        &options,
        None,
        builtin_strategies().unwrap(),
    );
    match result {
        Err(DispatchError::UnknownStrategy { name, available }) => {
            assert_eq!(name, "worker");
            assert!(available.contains("local"));
        }
        Err(e) => panic!("Expected UnknownStrategy, got: {e:?}"),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn unknown_execution_key_is_rejected() {
    let err = parse_and_validate(
        r#"
[execution]
spawn_stratgy = "local"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, DispatchError::TomlError(_)));
}

#[test]
fn empty_default_strategy_is_config_error() {
    let err = parse_and_validate(
        r#"
[execution]
spawn_strategy = ""
"#,
    )
    .unwrap_err();
    match err {
        DispatchError::ConfigError(msg) => assert!(msg.contains("spawn_strategy")),
        e => panic!("Expected ConfigError, got: {e:?}"),
    }
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_and_validate(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, DispatchError::IoError(_)));
}
