use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tutorhub_lib::{
    clock::MonotonicClock,
    db::Database,
    schedule::{
        ingest, refresh_schedule, ClassScheduleRecord, ClassSession, JsonFileSource,
        ScheduleStatus,
    },
    AppState,
};

fn record(id: &str, batch_id: &str, date: &str, time: &str) -> ClassScheduleRecord {
    ClassScheduleRecord {
        id: Some(id.into()),
        batch_id: batch_id.into(),
        batch_name: Some(format!("Batch {batch_id}")),
        class_date: date.into(),
        class_time: time.into(),
        ..Default::default()
    }
}

fn sessions(records: Vec<ClassScheduleRecord>) -> Vec<ClassSession> {
    let report = ingest(records);
    assert!(report.rejected.is_empty());
    report.accepted
}

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn open_db() -> (TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(dir.path().join("tutorhub.sqlite3")).unwrap();
    (dir, db)
}

fn ids(sessions: &[ClassSession]) -> Vec<&str> {
    sessions.iter().map(|s| s.id.as_str()).collect()
}

#[tokio::test]
async fn upserted_sessions_round_trip() {
    let (_dir, db) = open_db();
    let mut stored = sessions(vec![record("c1", "b1", "2024-01-15", "10:30")]);
    stored[0].topic = Some("Kinematics".into());
    stored[0].notes = Some("Bring graph paper".into());

    assert_eq!(db.upsert_class_sessions(&stored).await.unwrap(), 1);

    let loaded = db.get_class_session("c1").await.unwrap();
    assert_eq!(loaded.as_ref(), Some(&stored[0]));
    assert_eq!(db.get_class_session("missing").await.unwrap(), None);
}

#[tokio::test]
async fn upsert_overwrites_by_id() {
    let (_dir, db) = open_db();
    db.upsert_class_sessions(&sessions(vec![record("c1", "b1", "2024-01-15", "10:00")]))
        .await
        .unwrap();
    db.upsert_class_sessions(&sessions(vec![record("c1", "b1", "2024-01-16", "11:00")]))
        .await
        .unwrap();

    let all = db.list_class_sessions(None).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].starts_at(), at(11, 0) + TimeDelta::days(1));
}

#[tokio::test]
async fn lists_are_ordered_and_filtered_by_batch() {
    let (_dir, db) = open_db();
    db.upsert_class_sessions(&sessions(vec![
        record("late", "b1", "2024-01-15", "16:00"),
        record("other", "b2", "2024-01-15", "12:00"),
        record("early", "b1", "2024-01-15", "08:00"),
    ]))
    .await
    .unwrap();

    let all = db.list_class_sessions(None).await.unwrap();
    assert_eq!(ids(&all), vec!["early", "other", "late"]);

    let batch = db.list_class_sessions(Some("b1".into())).await.unwrap();
    assert_eq!(ids(&batch), vec!["early", "late"]);
}

#[tokio::test]
async fn sessions_from_keep_classes_still_live() {
    let (_dir, db) = open_db();
    db.upsert_class_sessions(&sessions(vec![
        record("morning", "b1", "2024-01-15", "08:00"),
        record("mid", "b1", "2024-01-15", "10:00"),
        record("noon", "b1", "2024-01-15", "12:00"),
    ]))
    .await
    .unwrap();

    let from_half_past = db.list_sessions_from(at(10, 30)).await.unwrap();
    assert_eq!(ids(&from_half_past), vec!["mid", "noon"]);

    // the live window's closing instant still counts
    let at_window_end = db.list_sessions_from(at(11, 0)).await.unwrap();
    assert_eq!(ids(&at_window_end), vec!["mid", "noon"]);

    let after_window = db.list_sessions_from(at(11, 1)).await.unwrap();
    assert_eq!(ids(&after_window), vec!["noon"]);
}

#[tokio::test]
async fn schedule_status_updates_and_deletes() {
    let (_dir, db) = open_db();
    db.upsert_class_sessions(&sessions(vec![record("c1", "b1", "2024-01-15", "10:00")]))
        .await
        .unwrap();

    db.update_schedule_status("c1", ScheduleStatus::Cancelled)
        .await
        .unwrap();
    let updated = db.get_class_session("c1").await.unwrap().unwrap();
    assert_eq!(updated.schedule_status, ScheduleStatus::Cancelled);

    assert!(db
        .update_schedule_status("missing", ScheduleStatus::Completed)
        .await
        .is_err());

    assert!(db.delete_class_session("c1").await.unwrap());
    assert!(!db.delete_class_session("c1").await.unwrap());
    assert!(db.list_class_sessions(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn refresh_imports_valid_records_and_reports_the_rest() {
    let (dir, db) = open_db();
    let export = dir.path().join("classes.json");
    std::fs::write(
        &export,
        r#"[
            {"id": "c1", "batch_id": "b1", "batch_name": "Chemistry", "class_date": "2024-01-15T00:00:00", "class_time": "09:30:00", "status": "scheduled"},
            {"id": "c2", "batch_id": "b1", "class_date": "2024-01-16", "class_time": "04:15 PM", "topic": "Moles"},
            {"id": "c3", "batch_id": "b1", "class_date": "sometime", "class_time": "10:00"}
        ]"#,
    )
    .unwrap();

    let report = refresh_schedule(&JsonFileSource::new(&export), &db)
        .await
        .unwrap();

    assert_eq!(ids(&report.accepted), vec!["c1", "c2"]);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].index, 2);
    assert_eq!(report.rejected[0].id.as_deref(), Some("c3"));

    let stored = db.list_class_sessions(None).await.unwrap();
    assert_eq!(ids(&stored), vec!["c1", "c2"]);
    assert_eq!(stored[1].starts_at(), at(16, 15) + TimeDelta::days(1));
}

#[tokio::test]
async fn refresh_surfaces_unreadable_exports() {
    let (dir, db) = open_db();

    let missing = refresh_schedule(&JsonFileSource::new(dir.path().join("nope.json")), &db).await;
    assert!(missing.is_err());

    let garbled = dir.path().join("garbled.json");
    std::fs::write(&garbled, "{ not json").unwrap();
    assert!(refresh_schedule(&JsonFileSource::new(&garbled), &db)
        .await
        .is_err());

    assert!(db.list_class_sessions(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn app_state_picks_the_next_attendable_class() {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(MonotonicClock::anchored_at(at(10, 30)));
    let state = AppState::open(dir.path(), clock).unwrap();

    assert_eq!(state.next_class().await.unwrap(), None);

    state
        .db
        .upsert_class_sessions(&sessions(vec![
            record("finished", "b1", "2024-01-15", "08:00"),
            record("live", "b1", "2024-01-15", "10:00"),
            record("later", "b1", "2024-01-15", "14:00"),
        ]))
        .await
        .unwrap();

    let next = state.next_class().await.unwrap().unwrap();
    assert_eq!(next.id, "live");

    state
        .db
        .update_schedule_status("live", ScheduleStatus::Cancelled)
        .await
        .unwrap();
    let next = state.next_class().await.unwrap().unwrap();
    assert_eq!(next.id, "later");
}
