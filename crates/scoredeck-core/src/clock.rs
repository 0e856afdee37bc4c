//! Wall-clock access and the one-second tick source.
//!
//! The countdown timer itself is a pure state machine driven by `tick()`
//! calls; this module supplies the ticks. [`tick_stream`] spawns a tokio
//! task that emits once per period into a channel and returns a guard that
//! aborts the task when dropped, so stopping a run is idempotent and at
//! most one tick source survives a start/stop cycle.

use chrono::{DateTime, Local, Utc};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Current wall-clock time.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Human-facing local timestamp used for submission stamps and exports.
pub fn now_local_string() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Milliseconds since the Unix epoch, used for unique export filenames.
pub fn epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Handle to a running tick task. Dropping it (or calling [`cancel`])
/// aborts the task; cancelling twice is harmless.
///
/// [`cancel`]: TickGuard::cancel
pub struct TickGuard {
    handle: JoinHandle<()>,
}

impl TickGuard {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TickGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn a repeating tick source.
///
/// Emits the current time into the returned channel once per `period`,
/// starting one period from now. The stream ends when the guard is
/// cancelled/dropped or the receiver is closed.
pub fn tick_stream(period: Duration) -> (TickGuard, mpsc::Receiver<DateTime<Utc>>) {
    let (tx, rx) = mpsc::channel(1);
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // interval fires immediately on the first call; discard that one.
        interval.tick().await;
        loop {
            interval.tick().await;
            if tx.send(Utc::now()).await.is_err() {
                break;
            }
        }
    });
    (TickGuard { handle }, rx)
}
