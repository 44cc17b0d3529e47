// src/events/mod.rs

//! Event reporting.
//!
//! - [`event`] defines handler events and structured bus events.
//! - [`handler`] provides the `EventHandler` trait and the production
//!   `TracingEventHandler`.
//! - [`bus`] provides the `EventBus` publish trait and a tokio-channel
//!   implementation.
//! - [`sink`] gates subcommand reporting in front of both.

pub mod bus;
pub mod event;
pub mod handler;
pub mod sink;

pub use bus::{ChannelEventBus, EventBus};
pub use event::{BuildEvent, Event, EventKind};
pub use handler::{EventHandler, TracingEventHandler};
pub use sink::EventSink;
