use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    error::ScheduleError,
    status::ClassStatus,
    window::{parse_class_date, parse_class_time, TimeWindow},
};

const ENABLE_LOGS: bool = true;

use crate::log_warn;

/// Administrative status set by the scheduling API, independent of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    Rescheduled,
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Scheduled => "scheduled",
            ScheduleStatus::Completed => "completed",
            ScheduleStatus::Cancelled => "cancelled",
            ScheduleStatus::Rescheduled => "rescheduled",
        }
    }
}

impl FromStr for ScheduleStatus {
    type Err = ScheduleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Ok(ScheduleStatus::Scheduled),
            "completed" => Ok(ScheduleStatus::Completed),
            "cancelled" => Ok(ScheduleStatus::Cancelled),
            "rescheduled" => Ok(ScheduleStatus::Rescheduled),
            _ => Err(ScheduleError::UnknownStatus {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A class record as returned by `GET /classes`, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassScheduleRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub batch_id: String,
    #[serde(default)]
    pub batch_name: Option<String>,
    pub class_date: String,
    pub class_time: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A validated class occurrence. Only constructed through ingestion, so the
/// date and time always combine into a real instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSession {
    pub id: String,
    pub batch_id: String,
    pub batch_name: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub topic: Option<String>,
    pub schedule_status: ScheduleStatus,
    pub notes: Option<String>,
}

impl ClassSession {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::for_class(self.date, self.time)
    }

    pub fn status_at(&self, now: NaiveDateTime) -> ClassStatus {
        self.window().status_at(now)
    }

    pub fn can_join_at(&self, now: NaiveDateTime) -> bool {
        self.status_at(now) == ClassStatus::Live
    }

    /// Cancelled or administratively completed classes never count as next.
    pub fn is_attendable(&self) -> bool {
        !matches!(
            self.schedule_status,
            ScheduleStatus::Cancelled | ScheduleStatus::Completed
        )
    }

    pub fn display_name(&self) -> &str {
        self.batch_name.as_deref().unwrap_or(&self.batch_id)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TryFrom<ClassScheduleRecord> for ClassSession {
    type Error = ScheduleError;

    fn try_from(record: ClassScheduleRecord) -> Result<Self, Self::Error> {
        if record.batch_id.trim().is_empty() {
            return Err(ScheduleError::MissingField { field: "batch_id" });
        }

        let date = parse_class_date(&record.class_date)?;
        let time = parse_class_time(&record.class_time)?;
        let schedule_status = match non_blank(record.status) {
            Some(raw) => raw.parse()?,
            None => ScheduleStatus::default(),
        };

        Ok(ClassSession {
            id: non_blank(record.id).unwrap_or_else(|| Uuid::new_v4().to_string()),
            batch_id: record.batch_id,
            batch_name: non_blank(record.batch_name),
            date,
            time,
            topic: non_blank(record.topic),
            schedule_status,
            notes: non_blank(record.notes),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRecord {
    pub index: usize,
    pub id: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    pub accepted: Vec<ClassSession>,
    pub rejected: Vec<RejectedRecord>,
}

/// Validates a batch of API records. Malformed records are dropped here so
/// they never reach the classifier.
pub fn ingest<I>(records: I) -> IngestReport
where
    I: IntoIterator<Item = ClassScheduleRecord>,
{
    let mut report = IngestReport::default();

    for (index, record) in records.into_iter().enumerate() {
        let id = record.id.clone();
        match ClassSession::try_from(record) {
            Ok(session) => report.accepted.push(session),
            Err(err) => {
                log_warn!(
                    "Rejected class record #{index} ({}): {err}",
                    id.as_deref().unwrap_or("no id")
                );
                report.rejected.push(RejectedRecord {
                    index,
                    id,
                    reason: err.to_string(),
                });
            }
        }
    }

    report
}

/// The class a dashboard should point at: the earliest attendable session
/// that is live now or still ahead.
pub fn next_class(sessions: &[ClassSession], now: NaiveDateTime) -> Option<&ClassSession> {
    sessions
        .iter()
        .filter(|session| session.is_attendable())
        .filter(|session| session.status_at(now) != ClassStatus::Completed)
        .min_by_key(|session| session.starts_at())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use pretty_assertions::assert_eq;

    fn record(id: &str, date: &str, time: &str) -> ClassScheduleRecord {
        ClassScheduleRecord {
            id: Some(id.into()),
            batch_id: "batch-1".into(),
            batch_name: Some("Physics XI".into()),
            class_date: date.into(),
            class_time: time.into(),
            topic: Some("Kinematics".into()),
            status: None,
            notes: None,
        }
    }

    fn at(date: &str, time: &str) -> NaiveDateTime {
        super::super::window::combine(date, time).unwrap()
    }

    #[test]
    fn record_converts_with_defaults() {
        let mut raw = record("", "2024-01-15", "10:00 AM");
        raw.topic = Some("   ".into());

        let session = ClassSession::try_from(raw).unwrap();

        assert!(Uuid::parse_str(&session.id).is_ok());
        assert_eq!(session.schedule_status, ScheduleStatus::Scheduled);
        assert_eq!(session.topic, None);
        assert_eq!(session.starts_at(), at("2024-01-15", "10:00"));
    }

    #[test]
    fn status_parses_case_insensitively() {
        let mut raw = record("c1", "2024-01-15", "10:00");
        raw.status = Some("CANCELLED".into());
        let session = ClassSession::try_from(raw).unwrap();
        assert_eq!(session.schedule_status, ScheduleStatus::Cancelled);

        let mut raw = record("c2", "2024-01-15", "10:00");
        raw.status = Some("postponed".into());
        assert_eq!(
            ClassSession::try_from(raw),
            Err(ScheduleError::UnknownStatus {
                value: "postponed".into()
            })
        );
    }

    #[test]
    fn ingest_splits_accepted_and_rejected() {
        let mut missing_batch = record("c3", "2024-01-17", "14:00");
        missing_batch.batch_id = String::new();

        let report = ingest(vec![
            record("c1", "2024-01-15", "10:00"),
            record("c2", "not-a-date", "10:00"),
            missing_batch,
        ]);

        assert_eq!(report.accepted.len(), 1);
        assert_eq!(report.accepted[0].id, "c1");
        assert_eq!(
            report.rejected,
            vec![
                RejectedRecord {
                    index: 1,
                    id: Some("c2".into()),
                    reason: "invalid class date 'not-a-date'".into(),
                },
                RejectedRecord {
                    index: 2,
                    id: Some("c3".into()),
                    reason: "batch_id is required".into(),
                },
            ]
        );
    }

    #[test]
    fn next_class_prefers_live_then_earliest_upcoming() {
        let mut cancelled = record("cancelled", "2024-01-15", "11:00");
        cancelled.status = Some("cancelled".into());

        let sessions = ingest(vec![
            record("later", "2024-01-16", "09:00"),
            record("finished", "2024-01-15", "08:00"),
            cancelled,
            record("live", "2024-01-15", "10:00"),
        ])
        .accepted;

        let now = at("2024-01-15", "10:30");
        assert_eq!(next_class(&sessions, now).map(|s| s.id.as_str()), Some("live"));

        let after_live = now + TimeDelta::minutes(31);
        assert_eq!(
            next_class(&sessions, after_live).map(|s| s.id.as_str()),
            Some("later")
        );

        let much_later = at("2024-02-01", "00:00");
        assert_eq!(next_class(&sessions, much_later), None);
    }
}
