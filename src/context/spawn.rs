// src/context/spawn.rs

//! Spawn capability: the contract between the executor and the strategies
//! that actually run subprocess-style actions.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::time::Duration;

use crate::context::registry::ActionContext;
use crate::errors::Result;
use crate::exec::Executor;
use crate::types::Mnemonic;

/// One subprocess invocation requested by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spawn {
    pub mnemonic: Mnemonic,
    pub arguments: Vec<String>,
    pub environment: BTreeMap<String, String>,
    pub progress_message: Option<String>,
}

impl Spawn {
    pub fn new(mnemonic: Mnemonic, arguments: Vec<String>) -> Self {
        Self {
            mnemonic,
            arguments,
            environment: BTreeMap::new(),
            progress_message: None,
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    pub fn with_progress_message(mut self, message: impl Into<String>) -> Self {
        self.progress_message = Some(message.into());
        self
    }

    /// Reason shown above the subcommand: the progress message if there is
    /// one, else the mnemonic.
    pub fn reason(&self) -> String {
        match &self.progress_message {
            Some(msg) => msg.clone(),
            None => format!("{} action", self.mnemonic),
        }
    }

    /// Render the spawn as a shell line that reproduces it from the
    /// execution root. Tokens are single-quoted where the shell would
    /// otherwise split or interpret them.
    pub fn describe(&self, exec_root: &Path) -> String {
        let mut line = format!(
            "(cd {} && \\\n  exec env - \\\n",
            shell_escape(&exec_root.to_string_lossy())
        );
        for (key, value) in &self.environment {
            line.push_str(&format!("    {key}={} \\\n", shell_escape(value)));
        }
        line.push_str("  ");
        let argv: Vec<String> = self.arguments.iter().map(|a| shell_escape(a)).collect();
        line.push_str(&argv.join(" "));
        line.push(')');
        line
    }
}

/// Quote `s` for a POSIX shell. Plain words are returned bare.
fn shell_escape(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }
    let plain = |c: char| {
        c.is_ascii_alphanumeric()
            || matches!(c, '-' | '_' | '.' | '/' | '%' | ':' | '=' | '+' | ',' | '@')
    };
    if s.chars().all(plain) {
        return s.to_string();
    }
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Outcome of a spawn that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnResult {
    pub exit_code: i32,
    pub wall_time: Duration,
}

impl SpawnResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

pub type SpawnFuture<'a> = Pin<Box<dyn Future<Output = Result<SpawnResult>> + Send + 'a>>;

/// Capability implemented by every spawn strategy (local, sandboxed,
/// remote, worker...).
///
/// Strategies are selected per mnemonic through
/// [`Executor::spawn_action_context`]. A non-zero exit is reported as
/// `DispatchError::SpawnFailed`, not as an `Ok` result.
pub trait SpawnActionContext: ActionContext {
    /// Name used to select this strategy from configuration.
    fn name(&self) -> &str;

    fn exec<'a>(&'a self, spawn: &'a Spawn, executor: &'a Executor) -> SpawnFuture<'a>;
}
