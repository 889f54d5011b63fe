use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use crate::types::SessionId;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// One second elapsed for the given session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTick(pub SessionId);

/// Handle to a running one-second timer. Dropping it stops the timer.
pub struct Ticker {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Ticker {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A ticker with nothing behind it; ticks are driven by hand.
    pub fn detached() -> Self {
        Self { cancel: None }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ticker")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

/// Time source for the session engine.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Arms a timer delivering one tick per second for `session`.
    fn start_ticker(&self, session: SessionId) -> Ticker;
}

/// Wall clock whose ticks arrive on a tokio channel.
pub struct TokioClock {
    ticks: UnboundedSender<SessionTick>,
}

impl TokioClock {
    pub fn new(ticks: UnboundedSender<SessionTick>) -> Self {
        Self { ticks }
    }
}

impl Clock for TokioClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn start_ticker(&self, session: SessionId) -> Ticker {
        let tx = self.ticks.clone();
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                trace!(session, "tick");
                if tx.send(SessionTick(session)).is_err() {
                    break;
                }
            }
        });
        debug!(session, "Started session timer");

        let abort = handle.abort_handle();
        Ticker::new(move || {
            abort.abort();
            debug!(session, "Cancelled session timer");
        })
    }
}
