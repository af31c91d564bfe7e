//! System time adapter.
//!
//! Wall-clock timestamps come from the OS clock; uptime is measured from
//! construction with a monotonic `Instant`.

use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::app::ports::Clock;

/// [`Clock`] backed by the host's system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn uptime_secs(&self) -> u64 {
        self.start.elapsed().as_secs()
    }
}
