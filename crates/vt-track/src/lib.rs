//! `vt-track` — who is where, and for how long.
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`identity`] | `IdentityRegistry`, `ExclusionPolicy`                   |
//! | [`dwell`]    | `DwellAccumulator`, `DwellSnapshot`, `EntityDwell`      |
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | Uses FxHash instead of SipHash for the internal maps.   |

pub mod dwell;
pub mod identity;

#[cfg(test)]
mod tests;

pub use dwell::{DwellAccumulator, DwellSnapshot, EntityDwell, NO_ZONE};
pub use identity::{ExclusionPolicy, IdentityRegistry};

#[cfg(not(feature = "fx-hash"))]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V>;

#[cfg(feature = "fx-hash")]
pub(crate) type Map<K, V> = rustc_hash::FxHashMap<K, V>;
