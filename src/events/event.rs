// src/events/event.rs

use std::fmt;

/// Severity/category of an event delivered to an [`EventHandler`].
///
/// [`EventHandler`]: crate::events::EventHandler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Error,
    Warning,
    Info,
    Progress,
    Subcommand,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventKind::Error => "ERROR",
            EventKind::Warning => "WARNING",
            EventKind::Info => "INFO",
            EventKind::Progress => "PROGRESS",
            EventKind::Subcommand => "SUBCOMMAND",
        };
        f.write_str(s)
    }
}

/// A human-readable message for the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub message: String,
}

impl Event {
    pub fn new(kind: EventKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(EventKind::Warning, message)
    }

    /// Subcommand events render as `# <reason>` followed by the command.
    pub fn subcommand(reason: &str, message: &str) -> Self {
        Self::new(EventKind::Subcommand, format!("# {reason}\n{message}"))
    }
}

/// Structured events posted on the build's event bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    Subcommand { reason: String, message: String },
}
