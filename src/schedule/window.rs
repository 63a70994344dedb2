use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::Serialize;

use super::{error::ScheduleError, status::ClassStatus};

/// Every class is assumed to run for one hour after its start.
pub const LIVE_WINDOW_MINUTES: i64 = 60;

const TIME_FORMATS: [&str; 5] = ["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M:%S %p", "%I:%M%p"];

pub fn live_window() -> TimeDelta {
    TimeDelta::minutes(LIVE_WINDOW_MINUTES)
}

/// Accepts `YYYY-MM-DD` or a full ISO/RFC 3339 datetime, keeping only the date
/// as written (no timezone conversion).
pub fn parse_class_date(value: &str) -> Result<NaiveDate, ScheduleError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ScheduleError::MissingField { field: "class_date" });
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = trimmed.parse::<NaiveDateTime>() {
        return Ok(datetime.date());
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.date_naive());
    }

    Err(ScheduleError::InvalidDate {
        value: value.to_string(),
    })
}

/// Accepts 24-hour (`14:30`, `14:30:00`) and 12-hour (`02:30 PM`) wall times.
pub fn parse_class_time(value: &str) -> Result<NaiveTime, ScheduleError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ScheduleError::MissingField { field: "class_time" });
    }

    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| ScheduleError::InvalidTime {
            value: value.to_string(),
        })
}

/// Joins a class date and time into one local instant, rejecting anything
/// that does not parse.
pub fn combine(date: &str, time: &str) -> Result<NaiveDateTime, ScheduleError> {
    let date = parse_class_date(date)?;
    let time = parse_class_time(time)?;
    Ok(date.and_time(time))
}

/// The closed interval during which a class counts as live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn starting_at(start: NaiveDateTime) -> Self {
        Self {
            start,
            end: start + live_window(),
        }
    }

    pub fn for_class(date: NaiveDate, time: NaiveTime) -> Self {
        Self::starting_at(date.and_time(time))
    }

    pub fn contains(&self, now: NaiveDateTime) -> bool {
        self.start <= now && now <= self.end
    }

    pub fn status_at(&self, now: NaiveDateTime) -> ClassStatus {
        if self.contains(now) {
            ClassStatus::Live
        } else if now > self.end {
            ClassStatus::Completed
        } else {
            ClassStatus::Upcoming
        }
    }
}
