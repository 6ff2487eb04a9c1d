//! `vt-zone` — named spatial zones and zone lookup.
//!
//! # Crate layout
//!
//! | Module   | Contents                                                     |
//! |----------|--------------------------------------------------------------|
//! | [`zone`] | `Zone` (oriented box, point containment), `Transform`        |
//! | [`set`]  | `ZoneSet` (load-ordered zones + R-tree), `ZoneSetBuilder`    |
//! | [`error`]| `ZoneError`, `ZoneResult<T>`                                 |
//!
//! # Overlapping zones
//!
//! A point inside several zones is classified into the one loaded first.
//! The R-tree only narrows the candidates; it never changes the winner.

pub mod error;
pub mod set;
pub mod zone;


pub use error::{ZoneError, ZoneResult};
pub use set::{ZoneSet, ZoneSetBuilder};
pub use zone::{Transform, Zone};
