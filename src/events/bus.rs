// src/events/bus.rs

//! Narrow publish interface onto the build's event bus.

use tokio::sync::mpsc;
use tracing::debug;

use super::event::BuildEvent;

pub trait EventBus: Send + Sync {
    /// Publish an event. Must not block.
    fn post(&self, event: BuildEvent);
}

/// Event bus backed by an unbounded tokio channel.
///
/// Posting never blocks; the receiving half is drained by whoever owns it
/// (the binary logs the events). Events posted after the receiver is dropped
/// are discarded.
#[derive(Debug, Clone)]
pub struct ChannelEventBus {
    tx: mpsc::UnboundedSender<BuildEvent>,
}

impl ChannelEventBus {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<BuildEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventBus for ChannelEventBus {
    fn post(&self, event: BuildEvent) {
        if let Err(e) = self.tx.send(event) {
            debug!(event = ?e.0, "event bus receiver dropped; discarding event");
        }
    }
}
