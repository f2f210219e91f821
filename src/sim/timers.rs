//! Manually clocked timers
//!
//! Deterministic `Timers` for tests and the native demo: nothing fires until
//! the owner advances the clock.

use std::time::Duration;

use super::services::{TimerHandle, Timers};

#[derive(Debug, Default)]
pub struct ManualTimers {
    now: Duration,
    next_id: u32,
    /// (deadline, handle), unordered
    pending: Vec<(Duration, TimerHandle)>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|(_, h)| *h == handle)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Advance the clock; returns handles whose deadline passed, earliest first
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerHandle> {
        self.now += dt;
        let now = self.now;

        let mut fired: Vec<(Duration, TimerHandle)> = Vec::new();
        self.pending.retain(|&(deadline, handle)| {
            if deadline <= now {
                fired.push((deadline, handle));
                false
            } else {
                true
            }
        });
        fired.sort();
        fired.into_iter().map(|(_, h)| h).collect()
    }
}

impl Timers for ManualTimers {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.push((self.now + delay, handle));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|(_, h)| *h != handle);
    }
}
