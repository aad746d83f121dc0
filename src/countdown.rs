//! Countdown to a release's prerelease date.
//!
//! [`tick`] is a pure function of the zero point and "now". A
//! [`CountdownTicker`] drives it once per period on a background thread and
//! is stopped by [`CountdownTicker::cancel`] or by dropping it.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Time remaining, broken into whole units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Countdown {
    pub days: u64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Countdown {
    /// Everything zero: the prerelease has started.
    pub fn is_finished(&self) -> bool {
        *self == Countdown::default()
    }
}

/// Remaining time until `prerelease`, clamped at zero.
pub fn tick(prerelease: DateTime<Utc>, now: DateTime<Utc>) -> Countdown {
    if now >= prerelease {
        return Countdown::default();
    }
    let ms = (prerelease - now).num_milliseconds();
    Countdown {
        days: (ms / MS_PER_DAY) as u64,
        hours: ((ms % MS_PER_DAY) / MS_PER_HOUR) as u32,
        minutes: ((ms % MS_PER_HOUR) / MS_PER_MINUTE) as u32,
        seconds: ((ms % MS_PER_MINUTE) / MS_PER_SECOND) as u32,
    }
}

// ---------------------------------------------------------------------------
// CountdownTicker
// ---------------------------------------------------------------------------

/// A running, cancellable countdown schedule.
///
/// Calls `on_tick` immediately and then once per period until cancelled,
/// dropped, or the countdown reaches zero (the zero value is delivered
/// once before the ticker stops).
pub struct CountdownTicker {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl CountdownTicker {
    /// Tick once per second against the system clock.
    pub fn start<F>(prerelease: DateTime<Utc>, on_tick: F) -> Self
    where
        F: FnMut(Countdown) + Send + 'static,
    {
        Self::start_with_clock(prerelease, Duration::from_secs(1), Utc::now, on_tick)
    }

    /// Tick every `period` against `clock`.
    pub fn start_with_clock<C, F>(
        prerelease: DateTime<Utc>,
        period: Duration,
        clock: C,
        mut on_tick: F,
    ) -> Self
    where
        C: Fn() -> DateTime<Utc> + Send + 'static,
        F: FnMut(Countdown) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || loop {
            let remaining = tick(prerelease, clock());
            on_tick(remaining);
            if remaining.is_finished() {
                debug!("countdown reached zero");
                break;
            }
            match rx.recv_timeout(period) {
                Err(RecvTimeoutError::Timeout) => continue,
                // Explicit stop or the ticker was dropped.
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });
        Self {
            stop: Some(tx),
            handle: Some(handle),
        }
    }

    /// Whether the schedule is still firing.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the schedule and wait for the worker thread to exit.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}
