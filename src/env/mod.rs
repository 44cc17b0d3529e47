// src/env/mod.rs

//! Build-scoped execution environment.
//!
//! - [`clock`] provides the `Clock` trait and the production `SystemClock`.
//! - [`options`] provides the type-indexed `OptionsBundle`.
//!
//! `ExecutionEnvironment` itself is plain immutable storage: it is built once
//! when the executor is constructed and only read afterwards.

pub mod clock;
pub mod options;

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use clock::{Clock, SystemClock};
pub use options::OptionsBundle;

use crate::errors::{DispatchError, Result};

#[derive(Debug, Clone)]
pub struct ExecutionEnvironment {
    exec_root: PathBuf,
    clock: Arc<dyn Clock>,
    verbose_failures: bool,
    options: Arc<OptionsBundle>,
}

impl ExecutionEnvironment {
    /// Create a new environment.
    ///
    /// The execution root must be absolute: every action runs relative to
    /// it, so a relative root would depend on the process working directory.
    pub fn new(
        exec_root: impl Into<PathBuf>,
        clock: Arc<dyn Clock>,
        verbose_failures: bool,
        options: Arc<OptionsBundle>,
    ) -> Result<Self> {
        let exec_root = exec_root.into();
        if !exec_root.is_absolute() {
            return Err(DispatchError::InvalidExecRoot(
                exec_root.display().to_string(),
            ));
        }
        Ok(Self {
            exec_root,
            clock,
            verbose_failures,
            options,
        })
    }

    pub fn exec_root(&self) -> &Path {
        &self.exec_root
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn verbose_failures(&self) -> bool {
        self.verbose_failures
    }

    pub fn options(&self) -> &OptionsBundle {
        &self.options
    }
}
