//! `vt-sampler` — the periodic position sampler.
//!
//! # One tick
//!
//! ```text
//! pump(entities, zones):
//!   ① Due?      — Ticker::poll(clock.sim_secs()); skip unless an interval has passed.
//!   ② Identify  — IdentityRegistry::resolve(handle, name); excluded names skipped.
//!   ③ Classify  — ZoneSet::zone_name_at(position); first-loaded zone wins.
//!   ④ Dwell     — DwellAccumulator::update(id, zone, now).
//!   ⑤ Persist   — RawLog::append(row); a failed row is logged and dropped.
//! ```
//!
//! At process exit [`SamplerSlot::shutdown`] writes the dwell-time summary.
//! When the last [`EntityPresence`] drops, the sampler is cleaned up without
//! a summary.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vt_core::{AppPaths, SamplerConfig, SystemClock};
//! use vt_sampler::{PositionSampler, SamplerSlot};
//!
//! let slot = SamplerSlot::new();
//! let mut sampler = PositionSampler::new(SamplerConfig::default(), AppPaths::from_env("venue"), SystemClock::new());
//! sampler.start()?;
//! slot.install(sampler).ok();
//!
//! loop {
//!     slot.pump(&entities, &zones);
//!     // ... rest of the frame ...
//! }
//! slot.shutdown();
//! ```

pub mod error;
pub mod lifecycle;
pub mod sampler;
pub mod slot;
pub mod source;
pub mod ticker;


pub use error::{SamplerError, SamplerResult};
pub use lifecycle::{EntityPresence, LifecycleTracker};
pub use sampler::{PositionSampler, SamplerState, TickFrame, TickReport};
pub use slot::SamplerSlot;
pub use source::{EntitySource, Trackable, TrackedEntity};
pub use ticker::{StopHandle, Ticker};
