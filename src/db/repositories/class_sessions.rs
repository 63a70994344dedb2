use anyhow::{bail, Result};
use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};

use crate::{
    db::{
        helpers::{
            format_date, format_local_datetime, format_time, parse_date, parse_schedule_status,
            parse_time,
        },
        Database,
    },
    schedule::{live_window, ClassSession, ScheduleStatus},
};

const SESSION_COLUMNS: &str =
    "id, batch_id, batch_name, class_date, class_time, topic, schedule_status, notes";

fn row_to_session(row: &Row) -> Result<ClassSession> {
    let class_date: String = row.get("class_date")?;
    let class_time: String = row.get("class_time")?;
    let schedule_status: String = row.get("schedule_status")?;

    Ok(ClassSession {
        id: row.get("id")?,
        batch_id: row.get("batch_id")?,
        batch_name: row.get("batch_name")?,
        date: parse_date(&class_date, "class_date")?,
        time: parse_time(&class_time, "class_time")?,
        topic: row.get("topic")?,
        schedule_status: parse_schedule_status(&schedule_status)?,
        notes: row.get("notes")?,
    })
}

fn collect_sessions(rows: &mut rusqlite::Rows<'_>) -> Result<Vec<ClassSession>> {
    let mut sessions = Vec::new();
    while let Some(row) = rows.next()? {
        sessions.push(row_to_session(row)?);
    }
    Ok(sessions)
}

impl Database {
    /// Inserts new sessions and overwrites existing ones with the same id.
    pub async fn upsert_class_sessions(&self, sessions: &[ClassSession]) -> Result<usize> {
        let records = sessions.to_vec();
        self.execute(move |conn| {
            let synced_at = Utc::now().to_rfc3339();
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO class_sessions
                        (id, batch_id, batch_name, class_date, class_time, starts_at, topic, schedule_status, notes, synced_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                     ON CONFLICT(id) DO UPDATE SET
                        batch_id = excluded.batch_id,
                        batch_name = excluded.batch_name,
                        class_date = excluded.class_date,
                        class_time = excluded.class_time,
                        starts_at = excluded.starts_at,
                        topic = excluded.topic,
                        schedule_status = excluded.schedule_status,
                        notes = excluded.notes,
                        synced_at = excluded.synced_at",
                )?;

                for record in &records {
                    stmt.execute(params![
                        record.id,
                        record.batch_id,
                        record.batch_name,
                        format_date(record.date),
                        format_time(record.time),
                        format_local_datetime(record.starts_at()),
                        record.topic,
                        record.schedule_status.as_str(),
                        record.notes,
                        synced_at,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(records.len())
        })
        .await
    }

    pub async fn get_class_session(&self, session_id: &str) -> Result<Option<ClassSession>> {
        let session_id = session_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SESSION_COLUMNS} FROM class_sessions WHERE id = ?1"
            ))?;
            let row = stmt
                .query_row(params![session_id], |row| Ok(row_to_session(row)))
                .optional()?;
            row.transpose()
        })
        .await
    }

    /// All stored sessions, optionally for one batch, earliest first.
    pub async fn list_class_sessions(&self, batch_id: Option<String>) -> Result<Vec<ClassSession>> {
        self.execute(move |conn| match batch_id {
            Some(batch_id) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {SESSION_COLUMNS} FROM class_sessions
                     WHERE batch_id = ?1
                     ORDER BY starts_at ASC"
                ))?;
                let mut rows = stmt.query(params![batch_id])?;
                collect_sessions(&mut rows)
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {SESSION_COLUMNS} FROM class_sessions ORDER BY starts_at ASC"
                ))?;
                let mut rows = stmt.query([])?;
                collect_sessions(&mut rows)
            }
        })
        .await
    }

    /// Sessions whose live window has not closed by `from`.
    pub async fn list_sessions_from(&self, from: NaiveDateTime) -> Result<Vec<ClassSession>> {
        let earliest_start = format_local_datetime(from - live_window());
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SESSION_COLUMNS} FROM class_sessions
                 WHERE starts_at >= ?1
                 ORDER BY starts_at ASC"
            ))?;
            let mut rows = stmt.query(params![earliest_start])?;
            collect_sessions(&mut rows)
        })
        .await
    }

    pub async fn update_schedule_status(
        &self,
        session_id: &str,
        status: ScheduleStatus,
    ) -> Result<()> {
        let session_id = session_id.to_string();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE class_sessions SET schedule_status = ?1 WHERE id = ?2",
                params![status.as_str(), session_id],
            )?;
            if rows_affected == 0 {
                bail!("class session {session_id} not found");
            }
            Ok(())
        })
        .await
    }

    /// Returns whether a row was removed.
    pub async fn delete_class_session(&self, session_id: &str) -> Result<bool> {
        let session_id = session_id.to_string();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "DELETE FROM class_sessions WHERE id = ?1",
                params![session_id],
            )?;
            Ok(rows_affected > 0)
        })
        .await
    }
}
