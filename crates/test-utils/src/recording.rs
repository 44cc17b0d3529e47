use std::sync::{Arc, Mutex};

use exec_dispatch::events::{BuildEvent, Event, EventBus, EventHandler};

/// One observed effect, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalEntry {
    Handled(Event),
    Posted(BuildEvent),
}

/// Shared, ordered log of everything the spies observed.
///
/// Hand the same journal to a `RecordingEventHandler` and a
/// `RecordingEventBus` to check handler-before-bus ordering.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<JournalEntry>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, entry: JournalEntry) {
        self.entries.lock().unwrap().push(entry);
    }
}

/// Spy `EventHandler` that records every event.
#[derive(Debug, Clone)]
pub struct RecordingEventHandler {
    journal: Journal,
}

impl RecordingEventHandler {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

impl EventHandler for RecordingEventHandler {
    fn handle(&self, event: Event) {
        self.journal.push(JournalEntry::Handled(event));
    }
}

/// Spy `EventBus` that records every posted event.
#[derive(Debug, Clone)]
pub struct RecordingEventBus {
    journal: Journal,
}

impl RecordingEventBus {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

impl EventBus for RecordingEventBus {
    fn post(&self, event: BuildEvent) {
        self.journal.push(JournalEntry::Posted(event));
    }
}
