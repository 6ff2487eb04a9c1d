//! `vt-core` — foundational types for the venue telemetry sampler.
//!
//! Every other `vt-*` crate depends on this one.  It has no `vt-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`ids`]      | `EntityHandle` (volatile), `EntityId` (`Player_<N>`)     |
//! | [`time`]     | `Clock` trait, `SystemClock`, `ManualClock`, formats     |
//! | [`config`]   | `SamplerConfig`, `AppPaths`                              |
//! | [`error`]    | `CoreError`, `CoreResult`                                |
//!
//! Positions and rotations are `glam` types, re-exported here so downstream
//! crates agree on a single math library.

pub mod config;
pub mod error;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AppPaths, SamplerConfig};
pub use error::{CoreError, CoreResult};
pub use glam::{Quat, Vec3};
pub use ids::{EntityHandle, EntityId};
pub use time::{Clock, ManualClock, SystemClock};
