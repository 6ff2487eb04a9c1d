//! `IdentityRegistry` — stable `Player_<N>` labels for volatile host handles.
//!
//! The first time a handle is seen it gets the next sequence number; later
//! lookups return the cached id.  Sequence numbers only ever grow, so an id
//! is never handed out twice in one process, not even after
//! [`release`](IdentityRegistry::release) or [`clear`](IdentityRegistry::clear).

use vt_core::{EntityHandle, EntityId};

use crate::Map;

// ── ExclusionPolicy ───────────────────────────────────────────────────────────

/// Decides which entities are never tracked, by name.
///
/// An entity is excluded when its name contains any configured fragment.
/// Used to keep the sampler's own host object and UI plumbing out of the
/// samples.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExclusionPolicy {
    fragments: Vec<String>,
}

impl ExclusionPolicy {
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments
                .into_iter()
                .map(Into::into)
                .filter(|f: &String| !f.is_empty())
                .collect(),
        }
    }

    /// A policy that excludes nothing.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn excludes(&self, name: &str) -> bool {
        self.fragments.iter().any(|f| name.contains(f.as_str()))
    }
}

// ── IdentityRegistry ──────────────────────────────────────────────────────────

/// Maps volatile [`EntityHandle`]s to stable [`EntityId`]s.
///
/// Single-threaded: the sampler calls it from its tick only.
#[derive(Debug)]
pub struct IdentityRegistry {
    ids:      Map<EntityHandle, EntityId>,
    /// Sequence number of the next id to allocate.  Starts at 1.
    next_seq: u32,
    policy:   ExclusionPolicy,
}

impl IdentityRegistry {
    pub fn new(policy: ExclusionPolicy) -> Self {
        Self {
            ids: Map::default(),
            next_seq: 1,
            policy,
        }
    }

    /// Return the stable id for `handle`, allocating one on first sight.
    ///
    /// Returns `None` if `name` is excluded by the policy; excluded entities
    /// never consume a sequence number.
    pub fn resolve(&mut self, handle: EntityHandle, name: &str) -> Option<EntityId> {
        if self.policy.excludes(name) {
            return None;
        }
        if let Some(&id) = self.ids.get(&handle) {
            return Some(id);
        }

        let id = EntityId(self.next_seq);
        self.next_seq += 1;
        self.ids.insert(handle, id);
        tracing::debug!(entity = name, %handle, %id, "assigned entity id");
        Some(id)
    }

    /// The cached id for `handle`, without allocating.
    pub fn get(&self, handle: EntityHandle) -> Option<EntityId> {
        self.ids.get(&handle).copied()
    }

    /// Forget `handle` (its entity was destroyed).  If the host later reuses
    /// the same handle value, the new entity gets a fresh id.
    pub fn release(&mut self, handle: EntityHandle) -> Option<EntityId> {
        self.ids.remove(&handle)
    }

    /// Forget every handle.  The sequence counter is kept.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Number of handles currently mapped.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Total ids handed out so far in this registry.
    pub fn allocated(&self) -> u32 {
        self.next_seq - 1
    }

    pub fn policy(&self) -> &ExclusionPolicy {
        &self.policy
    }
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self::new(ExclusionPolicy::none())
    }
}
