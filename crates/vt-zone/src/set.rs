//! `ZoneSet` — the zones currently loaded in the environment.
//!
//! # Lookup
//!
//! An R-tree (via `rstar`) holds each zone's world-space bounding box.  A
//! point query returns the candidate boxes; each candidate is then tested
//! with the exact oriented-box check and the lowest load index wins.  With
//! no zones loaded every lookup is `None`.

use rstar::{Envelope, PointDistance, RTree, RTreeObject, AABB};

use vt_core::Vec3;

use crate::Zone;

/// Bounding boxes are grown by this much so float error in the rotated
/// bounds never rejects a point the exact test would accept.
const BOUNDS_SLACK: f32 = 1e-3;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// World-space AABB of one zone plus its load index.
#[derive(Clone)]
struct ZoneEntry {
    bounds: AABB<[f32; 3]>,
    index:  usize,
}

impl RTreeObject for ZoneEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        self.bounds
    }
}

impl PointDistance for ZoneEntry {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        self.bounds.distance_2(point)
    }

    fn contains_point(&self, point: &[f32; 3]) -> bool {
        self.bounds.contains_point(point)
    }
}

// ── ZoneSet ───────────────────────────────────────────────────────────────────

/// Load-ordered zones with an R-tree prefilter.  Build with [`ZoneSetBuilder`].
pub struct ZoneSet {
    zones: Vec<Zone>,
    index: RTree<ZoneEntry>,
}

impl ZoneSet {
    /// A set with no zones; every point classifies as "no zone".
    pub fn empty() -> Self {
        Self { zones: Vec::new(), index: RTree::new() }
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Zones in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Zone> + '_ {
        self.zones.iter()
    }

    /// The first-loaded zone containing `point`, if any.
    pub fn find(&self, point: Vec3) -> Option<&Zone> {
        self.index
            .locate_all_at_point(&point.to_array())
            .map(|e| e.index)
            .filter(|&i| self.zones[i].contains(point))
            .min()
            .map(|i| &self.zones[i])
    }

    /// Name of the zone containing `point`, if any.
    pub fn zone_name_at(&self, point: Vec3) -> Option<&str> {
        self.find(point).map(Zone::name)
    }
}

impl Default for ZoneSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<Zone> for ZoneSet {
    fn from_iter<I: IntoIterator<Item = Zone>>(iter: I) -> Self {
        let mut b = ZoneSetBuilder::new();
        for zone in iter {
            b.add(zone);
        }
        b.build()
    }
}

// ── ZoneSetBuilder ────────────────────────────────────────────────────────────

/// Collect zones in load order, then call [`build`](Self::build).
#[derive(Default)]
pub struct ZoneSetBuilder {
    zones: Vec<Zone>,
}

impl ZoneSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a zone.  Earlier zones win ties against later ones.
    pub fn add(&mut self, zone: Zone) -> &mut Self {
        if self.zones.iter().any(|z| z.name() == zone.name()) {
            tracing::warn!(zone = zone.name(), "duplicate zone name; later zone only wins where earlier ones do not overlap");
        }
        self.zones.push(zone);
        self
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Bulk-load the R-tree and return the finished set.
    pub fn build(self) -> ZoneSet {
        let entries: Vec<ZoneEntry> = self
            .zones
            .iter()
            .enumerate()
            .map(|(index, zone)| {
                let (min, max) = zone.world_bounds();
                let slack = Vec3::splat(BOUNDS_SLACK);
                ZoneEntry {
                    bounds: AABB::from_corners((min - slack).to_array(), (max + slack).to_array()),
                    index,
                }
            })
            .collect();

        ZoneSet {
            zones: self.zones,
            index: RTree::bulk_load(entries),
        }
    }
}
