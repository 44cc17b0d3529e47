// src/context/provider.rs

use crate::errors::Result;
use crate::exec::Executor;

/// A module that contributes action contexts and spawn strategies to an
/// executor while it is still open.
///
/// Providers are applied with [`Executor::install`]; they call the
/// executor's `register_*` methods and must not assume they are the only
/// provider.
pub trait ContextProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    fn register_contexts(&self, executor: &Executor) -> Result<()>;
}
