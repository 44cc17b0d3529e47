// src/events/sink.rs

use std::sync::Arc;

use tracing::trace;

use super::bus::EventBus;
use super::event::{BuildEvent, Event};
use super::handler::EventHandler;

/// Gate in front of the event handler and the optional bus.
///
/// Whether subcommands are reported is decided once, at construction.
#[derive(Clone)]
pub struct EventSink {
    handler: Arc<dyn EventHandler>,
    bus: Option<Arc<dyn EventBus>>,
    reports_subcommands: bool,
}

impl EventSink {
    pub fn new(
        handler: Arc<dyn EventHandler>,
        bus: Option<Arc<dyn EventBus>>,
        reports_subcommands: bool,
    ) -> Self {
        Self {
            handler,
            bus,
            reports_subcommands,
        }
    }

    /// Lets callers skip building the subcommand text when it would be
    /// discarded anyway.
    pub fn reports_subcommands(&self) -> bool {
        self.reports_subcommands
    }

    /// Deliver a subcommand to the handler, then post it on the bus (if any).
    /// No-op when subcommand reporting is disabled.
    pub fn report_subcommand(&self, reason: &str, message: &str) {
        if !self.reports_subcommands {
            return;
        }

        trace!(reason, "reporting subcommand");
        self.handler.handle(Event::subcommand(reason, message));

        if let Some(bus) = &self.bus {
            bus.post(BuildEvent::Subcommand {
                reason: reason.to_string(),
                message: message.to_string(),
            });
        }
    }

    pub fn event_handler(&self) -> &Arc<dyn EventHandler> {
        &self.handler
    }

    pub fn event_bus(&self) -> Option<&Arc<dyn EventBus>> {
        self.bus.as_ref()
    }
}
