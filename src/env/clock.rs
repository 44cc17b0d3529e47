// src/env/clock.rs

//! Clock abstraction handed to strategies.
//!
//! The clock is not hermetic. Strategies should only use it for timing and
//! reporting, never for anything that influences action outputs.

use std::fmt::Debug;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

pub trait Clock: Send + Sync + Debug {
    /// Wall-clock time in milliseconds since the Unix epoch.
    fn current_time_millis(&self) -> u64;

    /// Monotonic time in nanoseconds, relative to an arbitrary origin.
    fn nano_time(&self) -> u64;
}

/// Clock backed by `SystemTime` and a monotonic `Instant`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn current_time_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    fn nano_time(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }
}
