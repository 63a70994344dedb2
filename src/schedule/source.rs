use std::{future::Future, path::PathBuf};

use anyhow::{Context, Result};

use crate::db::Database;

use super::session::{ingest, ClassScheduleRecord, IngestReport};

const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Where class records come from. The production API client lives outside
/// this crate; anything that can hand back `/classes` records plugs in here.
pub trait ScheduleSource {
    fn fetch_classes(&self) -> impl Future<Output = Result<Vec<ClassScheduleRecord>>> + Send;
}

/// Reads an exported `/classes` response (a JSON array) from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScheduleSource for JsonFileSource {
    fn fetch_classes(&self) -> impl Future<Output = Result<Vec<ClassScheduleRecord>>> + Send {
        let path = self.path.clone();
        async move {
            let contents = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read class export {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse class export {}", path.display()))
        }
    }
}

/// Fetches, validates and stores the current schedule. Fetch errors are
/// returned untouched; the caller decides how to surface them.
pub async fn refresh_schedule<S>(source: &S, db: &Database) -> Result<IngestReport>
where
    S: ScheduleSource + Sync,
{
    let records = source.fetch_classes().await?;
    let report = ingest(records);

    let stored = db.upsert_class_sessions(&report.accepted).await?;
    log_info!(
        "Schedule refreshed: {} stored, {} rejected",
        stored,
        report.rejected.len()
    );

    Ok(report)
}
