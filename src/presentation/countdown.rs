use std::fmt::Write;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{settings::DisplaySettings, timer::CountdownState};

/// At or beyond this many hours out, a class shows its date instead of a ticking clock.
pub const ABSOLUTE_DISPLAY_THRESHOLD_HOURS: u64 = 24;

const PASSED_LABEL: &str = "Class time passed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CountdownDisplay {
    Passed,
    StartsOn { at: NaiveDateTime },
    StartsIn { hours: u64, minutes: u8, seconds: u8 },
}

impl CountdownDisplay {
    pub fn select(state: CountdownState, target: NaiveDateTime) -> Self {
        match state {
            CountdownState::Expired => CountdownDisplay::Passed,
            CountdownState::Remaining(remaining)
                if remaining.total_hours >= ABSOLUTE_DISPLAY_THRESHOLD_HOURS =>
            {
                CountdownDisplay::StartsOn { at: target }
            }
            CountdownState::Remaining(remaining) => CountdownDisplay::StartsIn {
                hours: remaining.hours,
                minutes: remaining.minutes,
                seconds: remaining.seconds,
            },
        }
    }

    pub fn render(&self, settings: &DisplaySettings) -> String {
        match self {
            CountdownDisplay::Passed => PASSED_LABEL.to_string(),
            CountdownDisplay::StartsOn { at } => {
                let defaults = DisplaySettings::default();
                format!(
                    "Class starts on {} at {}",
                    format_or(*at, &settings.date_format, &defaults.date_format),
                    format_or(*at, &settings.time_format, &defaults.time_format)
                )
            }
            CountdownDisplay::StartsIn {
                hours,
                minutes,
                seconds,
            } => format!("Starts in {hours:02}:{minutes:02}:{seconds:02}"),
        }
    }
}

/// Long form used on schedule lists, e.g. `Jan 15, 2024, 10:00 AM`.
pub fn format_date_time(at: NaiveDateTime, settings: &DisplaySettings) -> String {
    format_or(
        at,
        &settings.date_time_format,
        &DisplaySettings::default().date_time_format,
    )
}

// An unrenderable format falls back to the default one instead of panicking.
fn format_or(at: NaiveDateTime, format: &str, fallback: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", at.format(format)).is_err() {
        out.clear();
        let _ = write!(out, "{}", at.format(fallback));
    }
    out
}
