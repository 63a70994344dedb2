use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::schedule::ScheduleStatus;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
/// Lexicographic order matches chronological order, so `starts_at` sorts in SQL.
const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn format_date(value: NaiveDate) -> String {
    value.format(DATE_FORMAT).to_string()
}

pub fn format_time(value: NaiveTime) -> String {
    value.format(TIME_FORMAT).to_string()
}

pub fn format_local_datetime(value: NaiveDateTime) -> String {
    value.format(LOCAL_DATETIME_FORMAT).to_string()
}

pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).with_context(|| format!("failed to parse {field}"))
}

pub fn parse_time(value: &str, field: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).with_context(|| format!("failed to parse {field}"))
}

pub fn parse_schedule_status(value: &str) -> Result<ScheduleStatus> {
    value
        .parse()
        .map_err(|err| anyhow!("unknown schedule status in store: {err}"))
}
