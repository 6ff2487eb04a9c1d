//! Simulation and wall-clock time sources.
//!
//! The sampler reads two clocks on every tick:
//!
//!   sim_secs  — monotonically increasing simulation seconds (charges dwell time)
//!   wall_now  — local calendar time (stamps rows and names output files)
//!
//! Both come from one [`Clock`] so tests can drive them together with
//! [`ManualClock`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use chrono::{Local, NaiveDateTime, TimeDelta};

/// `2026-04-20 19:10:27`, used in the raw log's wall-clock column.
pub const WALL_CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `20260420_191027`, used in output file names.
pub const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// A source of simulation seconds and wall-clock timestamps.
pub trait Clock {
    /// Seconds since the simulation started.  Never decreases.
    fn sim_secs(&self) -> f64;

    /// Current local wall-clock time.
    fn wall_now(&self) -> NaiveDateTime;
}

/// Render `t` for the raw log's `wall_clock_datetime` column.
pub fn format_wall_clock(t: NaiveDateTime) -> String {
    t.format(WALL_CLOCK_FORMAT).to_string()
}

/// Render `t` for a `<prefix>_<stamp>.csv` file name.
pub fn format_file_stamp(t: NaiveDateTime) -> String {
    t.format(FILE_STAMP_FORMAT).to_string()
}

// ── SystemClock ───────────────────────────────────────────────────────────────

/// Real time: sim seconds are measured from construction with `Instant`.
#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn sim_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn wall_now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

// ── ManualClock ───────────────────────────────────────────────────────────────

/// A hand-advanced clock for tests and deterministic replays.
///
/// Clones share the same time, so a test can keep one clone while the
/// sampler owns another.  Wall time is `wall_origin + sim_secs`.
#[derive(Clone, Debug)]
pub struct ManualClock {
    /// `f64` bit pattern of the current sim seconds.
    secs_bits:   Arc<AtomicU64>,
    wall_origin: NaiveDateTime,
}

impl ManualClock {
    /// Start at sim time 0 with the given wall-clock origin.
    pub fn new(wall_origin: NaiveDateTime) -> Self {
        Self {
            secs_bits: Arc::new(AtomicU64::new(0f64.to_bits())),
            wall_origin,
        }
    }

    /// Move time forward by `secs`.  Negative values are ignored so the clock
    /// stays monotonic.
    pub fn advance(&self, secs: f64) {
        if secs.is_nan() || secs <= 0.0 {
            return;
        }
        let _ = self.secs_bits.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |bits| {
            Some((f64::from_bits(bits) + secs).to_bits())
        });
    }

    /// Jump to an absolute sim time.  Ignored if it would move backwards.
    pub fn set(&self, secs: f64) {
        let now = self.sim_secs();
        if secs > now {
            self.advance(secs - now);
        }
    }
}

impl Clock for ManualClock {
    fn sim_secs(&self) -> f64 {
        f64::from_bits(self.secs_bits.load(Ordering::SeqCst))
    }

    fn wall_now(&self) -> NaiveDateTime {
        let millis = (self.sim_secs() * 1_000.0).round() as i64;
        self.wall_origin + TimeDelta::milliseconds(millis)
    }
}
