use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

const MS_PER_HOUR: u64 = 60 * 60 * 1000;
const MS_PER_MINUTE: u64 = 60 * 1000;
const MS_PER_SECOND: u64 = 1000;

/// Time left before a target, floored to whole seconds. Hours are not capped
/// at a day; `total_hours` carries the full span for display decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Remaining {
    pub hours: u64,
    pub minutes: u8,
    pub seconds: u8,
    pub total_hours: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CountdownState {
    Remaining(Remaining),
    Expired,
}

impl CountdownState {
    pub fn between(now: NaiveDateTime, target: NaiveDateTime) -> Self {
        let diff_ms = (target - now).num_milliseconds();
        if diff_ms <= 0 {
            return CountdownState::Expired;
        }

        let diff_ms = diff_ms as u64;
        let hours = diff_ms / MS_PER_HOUR;
        let minutes = ((diff_ms % MS_PER_HOUR) / MS_PER_MINUTE) as u8;
        let seconds = ((diff_ms % MS_PER_MINUTE) / MS_PER_SECOND) as u8;

        CountdownState::Remaining(Remaining {
            hours,
            minutes,
            seconds,
            total_hours: hours,
        })
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, CountdownState::Expired)
    }

    pub fn remaining(&self) -> Option<Remaining> {
        match self {
            CountdownState::Remaining(remaining) => Some(*remaining),
            CountdownState::Expired => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum CountdownStatus {
    #[default]
    Idle,
    Running,
    Expired,
}
