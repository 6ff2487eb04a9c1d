//! Entity identifiers.
//!
//! Two kinds of identity exist side by side:
//!
//! - [`EntityHandle`] is whatever the host hands us for a live object (an
//!   instance id, a slot index, a pointer value).  Hosts recycle these freely.
//! - [`EntityId`] is the stable label written to every output file.  It is
//!   allocated once per handle by the identity registry and rendered as
//!   `Player_<N>`.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Volatile per-process handle for a live entity, as reported by the host.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct EntityHandle(pub u64);

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityHandle({})", self.0)
    }
}

impl From<u64> for EntityHandle {
    #[inline(always)]
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Stable, human-readable entity label.  `EntityId(3)` renders as `Player_3`.
///
/// Sequence numbers start at 1 and are never reused within a process.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Prefix shared by every rendered id.
    pub const PREFIX: &'static str = "Player_";

    /// The sequence number behind the label.
    #[inline(always)]
    pub fn seq(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for EntityId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .strip_prefix(Self::PREFIX)
            .and_then(|n| n.parse::<u32>().ok())
            .map(EntityId)
            .ok_or_else(|| CoreError::Parse(format!("invalid entity id {s:?}: expected \"Player_<N>\"")))
    }
}
