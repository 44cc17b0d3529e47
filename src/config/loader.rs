// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{ExecutionOptions, RawOptionsFile};
use crate::errors::Result;

/// Default options file, relative to the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "ExecDispatch.toml";

/// Load an options file and return the raw `RawOptionsFile`.
///
/// This only performs TOML deserialization. Use [`load_and_validate`] for
/// semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawOptionsFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    debug!(path = %path.display(), "read options file");
    parse_raw(&contents)
}

/// Load an options file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ExecutionOptions> {
    let raw = load_from_path(&path)?;
    ExecutionOptions::try_from(raw)
}

/// Parse and validate options from an in-memory TOML string.
pub fn parse_and_validate(contents: &str) -> Result<ExecutionOptions> {
    ExecutionOptions::try_from(parse_raw(contents)?)
}

fn parse_raw(contents: &str) -> Result<RawOptionsFile> {
    let raw: RawOptionsFile = toml::from_str(contents)?;
    Ok(raw)
}

