//! `DwellAccumulator` — per-entity zone residency and cumulative dwell time.
//!
//! # Charging rule
//!
//! Each call to [`update`](DwellAccumulator::update) closes the interval since
//! the entity's previous update and charges it to the zone the entity was in
//! *at the start* of that interval:
//!
//! ```text
//! t=0  Arena   → state created, nothing charged
//! t=5  Arena   → Arena += 5
//! t=10 (none)  → Arena += 5
//! t=15 Arena   → nothing charged (previous zone was none)
//! ```
//!
//! The last open interval stays uncharged until a later update closes it.
//! Entering "no zone" pauses accumulation but keeps every total.

use std::collections::{BTreeMap, BTreeSet};

use vt_core::EntityId;

use crate::Map;

/// Label written for "in no zone".  Never appears as a key in any totals map.
pub const NO_ZONE: &str = "None";

/// Running state for one entity.
#[derive(Clone, Debug)]
struct DwellState {
    current_zone:    Option<String>,
    last_transition: f64,
    totals:          BTreeMap<String, f64>,
}

/// Accumulates per-entity, per-zone dwell time from periodic samples.
///
/// State for an entity is created on its first sample and kept until
/// [`clear`](Self::clear), so totals survive the entity despawning.
#[derive(Debug, Default)]
pub struct DwellAccumulator {
    states: Map<EntityId, DwellState>,
    /// Entities in first-seen order, for stable export ordering.
    order:  Vec<EntityId>,
}

impl DwellAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `entity` is in `zone` (`None` = no zone) at `now_secs`.
    ///
    /// A zone literally named [`NO_ZONE`] is treated as no zone.  A clock that
    /// went backwards charges nothing for that interval.
    pub fn update(&mut self, entity: EntityId, zone: Option<&str>, now_secs: f64) {
        let zone = zone.filter(|z| *z != NO_ZONE);

        let Some(state) = self.states.get_mut(&entity) else {
            self.states.insert(entity, DwellState {
                current_zone:    zone.map(str::to_owned),
                last_transition: now_secs,
                totals:          BTreeMap::new(),
            });
            self.order.push(entity);
            return;
        };

        let elapsed = (now_secs - state.last_transition).max(0.0);
        if let Some(previous) = state.current_zone.as_deref() {
            *state.totals.entry(previous.to_owned()).or_insert(0.0) += elapsed;
        }

        // Re-base on every sample, zone change or not.
        if state.current_zone.as_deref() != zone {
            state.current_zone = zone.map(str::to_owned);
        }
        state.last_transition = now_secs;
    }

    /// The zone `entity` was in at its latest sample.  `None` if the entity
    /// is unknown or was in no zone.
    pub fn current_zone(&self, entity: EntityId) -> Option<&str> {
        self.states.get(&entity)?.current_zone.as_deref()
    }

    /// Cumulative seconds `entity` has been charged in `zone`.
    pub fn total(&self, entity: EntityId, zone: &str) -> f64 {
        self.states
            .get(&entity)
            .and_then(|s| s.totals.get(zone))
            .copied()
            .unwrap_or(0.0)
    }

    /// Number of entities with state.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Copy out all totals in first-seen entity order.  Does not reset state.
    pub fn snapshot(&self) -> DwellSnapshot {
        let entries = self
            .order
            .iter()
            .filter_map(|id| {
                self.states.get(id).map(|s| EntityDwell {
                    entity: *id,
                    totals: s.totals.clone(),
                })
            })
            .collect();
        DwellSnapshot { entries }
    }

    /// Drop every entity's state.
    pub fn clear(&mut self) {
        self.states.clear();
        self.order.clear();
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// Totals for one entity: zone name → cumulative seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityDwell {
    pub entity: EntityId,
    pub totals: BTreeMap<String, f64>,
}

/// Read-only copy of every entity's dwell totals.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DwellSnapshot {
    /// One entry per observed entity, in first-seen order.
    pub entries: Vec<EntityDwell>,
}

impl DwellSnapshot {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` once any entity has been charged time in any zone.
    pub fn has_charges(&self) -> bool {
        self.entries.iter().any(|e| !e.totals.is_empty())
    }

    /// Entries with at least one zone total, in first-seen order.
    pub fn charged(&self) -> impl Iterator<Item = &EntityDwell> + '_ {
        self.entries.iter().filter(|e| !e.totals.is_empty())
    }

    /// Every zone name charged to any entity, sorted lexicographically.
    pub fn zone_names(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .flat_map(|e| e.totals.keys().map(String::as_str))
            .collect()
    }

    /// Seconds `entity` spent in `zone`; `0.0` if either is absent.
    pub fn get(&self, entity: EntityId, zone: &str) -> f64 {
        self.entries
            .iter()
            .find(|e| e.entity == entity)
            .and_then(|e| e.totals.get(zone))
            .copied()
            .unwrap_or(0.0)
    }
}
