// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::config::DEFAULT_CONFIG_FILE;

/// Command-line arguments for `exec-dispatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "exec-dispatch",
    version,
    about = "Resolve and run a spawn through the strategy configured for its mnemonic.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the options file (TOML).
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Execution root. Overrides `[execution].exec_root`; defaults to the
    /// current working directory.
    #[arg(long, value_name = "DIR")]
    pub exec_root: Option<String>,

    /// Mnemonic of the action being run; selects the spawn strategy.
    #[arg(long, value_name = "NAME", default_value = "Genrule")]
    pub mnemonic: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `EXEC_DISPATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the strategy table and the resolution for `--mnemonic`, but
    /// don't run anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Command to run, e.g. `-- cc -c a.cc`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_command_is_collected() {
        let args = CliArgs::try_parse_from([
            "exec-dispatch",
            "--mnemonic",
            "CppCompile",
            "--",
            "cc",
            "-c",
            "a.cc",
        ])
        .unwrap();
        assert_eq!(args.mnemonic, "CppCompile");
        assert_eq!(args.command, vec!["cc", "-c", "a.cc"]);
        assert_eq!(args.config, DEFAULT_CONFIG_FILE);
        assert!(!args.dry_run);
    }
}
