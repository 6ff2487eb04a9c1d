//! `SampleRecord` — one observation of one entity at one tick.

use vt_core::{EntityId, Vec3};
use vt_track::NO_ZONE;

/// An immutable (entity, position, time, zone) observation.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    pub entity_id:  EntityId,
    pub position:   Vec3,
    /// Simulation clock seconds at the tick.
    pub sim_secs:   f64,
    /// Wall-clock time at the tick, already formatted (`YYYY-MM-DD HH:MM:SS`).
    pub wall_clock: String,
    /// Zone the entity was in; `None` outside every zone.
    pub zone:       Option<String>,
}

impl SampleRecord {
    pub fn new(
        entity_id:  EntityId,
        position:   Vec3,
        sim_secs:   f64,
        wall_clock: impl Into<String>,
        zone:       Option<&str>,
    ) -> Self {
        Self {
            entity_id,
            position,
            sim_secs,
            wall_clock: wall_clock.into(),
            zone: zone.map(str::to_owned),
        }
    }

    /// The zone column value: the zone name, or the literal `None`.
    pub fn zone_label(&self) -> &str {
        self.zone.as_deref().unwrap_or(NO_ZONE)
    }

    /// The row's fields in raw-log column order, numbers at two decimals.
    pub fn to_fields(&self) -> [String; 7] {
        [
            format!("{:.2}", self.sim_secs),
            self.wall_clock.clone(),
            self.entity_id.to_string(),
            format!("{:.2}", self.position.x),
            format!("{:.2}", self.position.y),
            format!("{:.2}", self.position.z),
            self.zone_label().to_owned(),
        ]
    }
}
