//! Clock-driven periodic scheduling.
//!
//! The host calls [`Ticker::poll`] as often as it likes (every frame, every
//! loop iteration) with the current sim time.  The ticker fires on the first
//! poll, then once per `interval` after each fire.  A late poll fires once
//! and re-bases from that moment; missed intervals are not replayed.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Debug)]
pub struct Ticker {
    interval: f64,
    next_due: Option<f64>,
}

impl Ticker {
    /// `interval` must be positive; the sampler validates it before building
    /// a ticker.
    pub fn new(interval: f64) -> Self {
        Self { interval, next_due: None }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Sim time of the next fire, or `None` if the ticker has not fired yet.
    pub fn next_due(&self) -> Option<f64> {
        self.next_due
    }

    /// Returns `true` if a tick is due at `now`, and schedules the next one.
    pub fn poll(&mut self, now: f64) -> bool {
        match self.next_due {
            Some(due) if now < due => false,
            _ => {
                self.next_due = Some(now + self.interval);
                true
            }
        }
    }
}

/// Shared stop intent for a running sampler.
///
/// Checked at the top of every poll; a tick already in progress finishes its
/// writes before the flag is seen.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
