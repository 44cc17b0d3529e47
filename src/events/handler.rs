// src/events/handler.rs

use tracing::{debug, error, info, warn};

use super::event::{Event, EventKind};

/// Receiver for human-readable build events.
///
/// Implementations must tolerate concurrent delivery from many action
/// threads.
pub trait EventHandler: Send + Sync {
    fn handle(&self, event: Event);
}

/// Production handler that forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventHandler;

impl EventHandler for TracingEventHandler {
    fn handle(&self, event: Event) {
        match event.kind {
            EventKind::Error => error!(target: "exec_dispatch::events", "{}", event.message),
            EventKind::Warning => warn!(target: "exec_dispatch::events", "{}", event.message),
            EventKind::Info | EventKind::Subcommand => {
                info!(target: "exec_dispatch::events", kind = %event.kind, "{}", event.message)
            }
            EventKind::Progress => debug!(target: "exec_dispatch::events", "{}", event.message),
        }
    }
}
