use std::{sync::Arc, time::Duration};

use chrono::NaiveDateTime;
use serde::Serialize;
use tokio::sync::{watch, Mutex};

use crate::{clock::Clock, schedule::ClassSession};

use super::{
    state::{CountdownState, CountdownStatus},
    ticker::{start_countdown, CountdownHandle},
};

const ENABLE_LOGS: bool = true;

use crate::log_info;

/// What a surface following the next class needs to render its countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownSnapshot {
    /// Bumped on every retarget; ticks from an older generation are ignored.
    pub generation: u64,
    pub status: CountdownStatus,
    pub class_id: Option<String>,
    pub target: Option<NaiveDateTime>,
    pub state: Option<CountdownState>,
}

impl CountdownSnapshot {
    fn idle(generation: u64) -> Self {
        Self {
            generation,
            status: CountdownStatus::Idle,
            class_id: None,
            target: None,
            state: None,
        }
    }
}

/// Keeps at most one countdown alive, pointed at the class a surface shows.
#[derive(Clone)]
pub struct CountdownController {
    clock: Arc<dyn Clock>,
    tick_interval: Duration,
    ticker: Arc<Mutex<Option<CountdownHandle>>>,
    snapshots: Arc<watch::Sender<CountdownSnapshot>>,
    log_ticks: bool,
}

impl CountdownController {
    pub fn new(clock: Arc<dyn Clock>, tick_interval: Duration) -> Self {
        let debug_mode = std::env::var("TUTORHUB_DEBUG")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let (snapshots, _) = watch::channel(CountdownSnapshot::idle(0));

        Self {
            clock,
            tick_interval,
            ticker: Arc::new(Mutex::new(None)),
            snapshots: Arc::new(snapshots),
            log_ticks: debug_mode,
        }
    }

    pub fn snapshot(&self) -> CountdownSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CountdownSnapshot> {
        self.snapshots.subscribe()
    }

    /// Points the countdown at `session`'s start. Any previous ticker is
    /// cancelled first, so a changed target never races a stale one.
    pub async fn watch_class(&self, session: &ClassSession) {
        let target = session.starts_at();
        let mut ticker_guard = self.ticker.lock().await;

        {
            let current = self.snapshots.borrow();
            if current.status == CountdownStatus::Running
                && current.class_id.as_deref() == Some(session.id.as_str())
                && current.target == Some(target)
            {
                return;
            }
        }

        if let Some(handle) = ticker_guard.take() {
            handle.cancel();
        }

        let mut generation = 0;
        self.snapshots.send_modify(|snapshot| {
            generation = snapshot.generation + 1;
            *snapshot = CountdownSnapshot {
                generation,
                status: CountdownStatus::Running,
                class_id: Some(session.id.clone()),
                target: Some(target),
                state: None,
            };
        });

        log_info!("Counting down to class {} at {}", session.id, target);

        let tick_sender = self.snapshots.clone();
        let expire_sender = self.snapshots.clone();
        let class_id = session.id.clone();
        let log_ticks = self.log_ticks;

        let handle = start_countdown(
            target,
            self.clock.clone(),
            self.tick_interval,
            move |state| {
                if log_ticks {
                    log_info!("countdown generation {generation}: {state:?}");
                }
                tick_sender.send_if_modified(|snapshot| {
                    if snapshot.generation != generation {
                        return false;
                    }
                    snapshot.state = Some(state);
                    true
                });
            },
            move || {
                let current = expire_sender.send_if_modified(|snapshot| {
                    if snapshot.generation != generation {
                        return false;
                    }
                    snapshot.status = CountdownStatus::Expired;
                    true
                });
                if current {
                    log_info!("Class {class_id} has reached its start time");
                }
            },
        );

        *ticker_guard = Some(handle);
    }

    /// Stops the countdown and returns to idle.
    pub async fn clear(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        if let Some(handle) = ticker_guard.take() {
            handle.cancel();
        }

        self.snapshots.send_modify(|snapshot| {
            *snapshot = CountdownSnapshot::idle(snapshot.generation + 1);
        });
    }
}
