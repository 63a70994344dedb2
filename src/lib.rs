pub mod clock;
pub mod db;
pub mod models;
pub mod presentation;
pub mod schedule;
pub mod settings;
pub mod timer;
mod utils;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use log::{error, info};

use clock::{Clock, SystemClock};
use db::Database;
use presentation::{format_date_time, CountdownDisplay, NextClassCard, EMPTY_MESSAGE, JOIN_LABEL};
use schedule::{next_class, refresh_schedule, ClassSession, JsonFileSource};
use settings::SettingsStore;
use timer::{CountdownController, CountdownStatus};

/// Everything a schedule surface needs, opened from one data directory.
pub struct AppState {
    pub db: Database,
    pub countdown: CountdownController,
    pub settings: SettingsStore,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn open(data_dir: &Path, clock: Arc<dyn Clock>) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let settings = SettingsStore::new(data_dir.join("settings.json"))?;
        let db = Database::new(data_dir.join("tutorhub.sqlite3"))?;
        let countdown = CountdownController::new(clock.clone(), settings.countdown().tick_interval());

        Ok(Self {
            db,
            countdown,
            settings,
            clock,
        })
    }

    /// The next attendable class from the local store, if any.
    pub async fn next_class(&self) -> Result<Option<ClassSession>> {
        let now = self.clock.now();
        let sessions = self.db.list_sessions_from(now).await?;
        Ok(next_class(&sessions, now).cloned())
    }
}

fn data_dir() -> PathBuf {
    std::env::var_os("TUTORHUB_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".tutorhub"))
}

pub fn run() -> Result<()> {
    // RUST_LOG overrides the default level
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("TutorHub starting up...");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(follow_next_class(std::env::args().nth(1)))
}

async fn follow_next_class(import_path: Option<String>) -> Result<()> {
    let state = AppState::open(&data_dir(), Arc::new(SystemClock))?;

    if let Some(path) = import_path {
        // Keep going with whatever is already cached.
        if let Err(err) = refresh_schedule(&JsonFileSource::new(path), &state.db).await {
            error!("Failed to fetch classes: {err:#}");
        }
    }

    let Some(session) = state.next_class().await? else {
        println!("{EMPTY_MESSAGE}");
        return Ok(());
    };

    let display = state.settings.display();
    if let NextClassCard::Scheduled(card) = NextClassCard::build(Some(&session), state.clock.now()) {
        println!("Next class: {}", card.batch_name);
        if let Some(topic) = &card.topic {
            println!("Topic: {topic}");
        }
        println!("Starts: {}", format_date_time(card.starts_at, &display));
        println!("Status: {}", card.badge.label);
    }

    state.countdown.watch_class(&session).await;
    let mut updates = state.countdown.subscribe();

    loop {
        let snapshot = updates.borrow_and_update().clone();

        if let (Some(countdown), Some(target)) = (snapshot.state, snapshot.target) {
            println!("{}", CountdownDisplay::select(countdown, target).render(&display));
        }
        if snapshot.status == CountdownStatus::Expired {
            if session.can_join_at(state.clock.now()) {
                println!("{JOIN_LABEL}");
            }
            break;
        }

        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping countdown");
                break;
            }
        }
    }

    state.countdown.clear().await;
    Ok(())
}
