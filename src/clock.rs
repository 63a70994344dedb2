//! Wall-clock sources for status derivation and countdown ticks.
//!
//! Class dates and times are local wall-clock values, so every clock hands out
//! a `NaiveDateTime` in the local zone.

use chrono::{Local, NaiveDateTime, TimeDelta};
use tokio::time::Instant;

pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the operating system's local time on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Wall time derived from a fixed origin plus elapsed tokio time.
///
/// Under `tokio::time::pause` the elapsed part only moves when the runtime
/// advances its clock, which makes tick sequences reproducible.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    wall_origin: NaiveDateTime,
    origin: Instant,
}

impl MonotonicClock {
    pub fn anchored_at(wall_origin: NaiveDateTime) -> Self {
        Self {
            wall_origin,
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> NaiveDateTime {
        let elapsed = TimeDelta::from_std(self.origin.elapsed()).unwrap_or_else(|_| TimeDelta::zero());
        self.wall_origin + elapsed
    }
}
