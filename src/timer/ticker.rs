use std::{sync::Arc, time::Duration};

use chrono::NaiveDateTime;
use tokio::{
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::clock::Clock;

use super::state::CountdownState;

// Set to true to enable countdown lifecycle logging
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_error};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Owns a running countdown. Cancelling, or simply dropping the handle, stops
/// the ticker task.
#[derive(Debug)]
pub struct CountdownHandle {
    cancel_token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl CountdownHandle {
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// True once the ticker has stopped, either by expiring or by cancellation.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Waits for the ticker to stop on its own (expiry) or via [`cancel`](Self::cancel).
    pub async fn join(mut self) {
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                log_error!("countdown task failed to join: {err}");
            }
        }
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

/// Starts counting down to `target`.
///
/// The current state is emitted before this returns; after that the state is
/// recomputed every `tick_interval`. The first tick at or past `target` emits
/// [`CountdownState::Expired`], fires `on_expire` and ends the ticker, so a
/// countdown expires exactly once. Must be called inside a tokio runtime.
pub fn start_countdown<T, E>(
    target: NaiveDateTime,
    clock: Arc<dyn Clock>,
    tick_interval: Duration,
    mut on_tick: T,
    on_expire: E,
) -> CountdownHandle
where
    T: FnMut(CountdownState) + Send + 'static,
    E: FnOnce() + Send + 'static,
{
    let cancel_token = CancellationToken::new();

    let initial = CountdownState::between(clock.now(), target);
    on_tick(initial);
    if initial.is_expired() {
        log_debug!("countdown to {target} already expired at start");
        on_expire();
        return CountdownHandle {
            cancel_token,
            task: None,
        };
    }

    let tick_interval = tick_interval.max(MIN_TICK_INTERVAL);
    let first_tick = Instant::now() + tick_interval;
    let token = cancel_token.clone();

    let task = tokio::spawn(async move {
        let mut ticker = time::interval_at(first_tick, tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut on_expire = Some(on_expire);

        loop {
            tokio::select! {
                biased;

                _ = token.cancelled() => {
                    log_debug!("countdown to {target} cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    let state = CountdownState::between(clock.now(), target);
                    on_tick(state);

                    if state.is_expired() {
                        log_debug!("countdown to {target} expired");
                        if let Some(expire) = on_expire.take() {
                            expire();
                        }
                        break;
                    }
                }
            }
        }
    });

    CountdownHandle {
        cancel_token,
        task: Some(task),
    }
}
