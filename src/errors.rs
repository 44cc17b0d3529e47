// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Duplicate binding for {0}")]
    DuplicateBinding(String),

    #[error("Registry is sealed; cannot bind {0}")]
    RegistrySealed(String),

    #[error("No default spawn strategy registered")]
    MissingDefaultStrategy,

    #[error("No action context registered for {0}")]
    UnboundCapability(String),

    #[error("{0} queried before the executor was sealed")]
    NotSealed(String),

    #[error("Invalid mnemonic: {0:?}")]
    InvalidMnemonic(String),

    #[error("Execution root must be an absolute path: {0}")]
    InvalidExecRoot(String),

    #[error("Unknown spawn strategy '{name}' (available: {available})")]
    UnknownStrategy { name: String, available: String },

    #[error("Empty command line for {0} spawn")]
    EmptyCommandLine(String),

    #[error("{mnemonic} spawn failed with exit code {exit_code}{detail}")]
    SpawnFailed {
        mnemonic: String,
        exit_code: i32,
        detail: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DispatchError {
    /// Whether this error points at a broken executor assembly rather than
    /// a failure of the work being executed.
    pub fn is_configuration_defect(&self) -> bool {
        matches!(
            self,
            DispatchError::DuplicateBinding(_)
                | DispatchError::RegistrySealed(_)
                | DispatchError::MissingDefaultStrategy
                | DispatchError::UnboundCapability(_)
                | DispatchError::NotSealed(_)
                | DispatchError::UnknownStrategy { .. }
                | DispatchError::InvalidExecRoot(_)
                | DispatchError::ConfigError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DispatchError>;
