//! Raw log reader.
//!
//! Parses a raw log written by [`RawLog`][crate::RawLog] back into
//! [`SampleRecord`]s.  Numbers come back at the two-decimal precision they
//! were written with.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use vt_core::{EntityId, Vec3};
use vt_track::NO_ZONE;

use crate::{OutputError, OutputResult, SampleRecord};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawLogRecord {
    recorded_time:       f64,
    wall_clock_datetime: String,
    entity_id:           String,
    position_x:          f32,
    position_y:          f32,
    position_z:          f32,
    zone_name:           String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load every sample from a raw log file.
pub fn load_samples_csv(path: &Path) -> OutputResult<Vec<SampleRecord>> {
    let file = std::fs::File::open(path)?;
    load_samples_reader(file)
}

/// Like [`load_samples_csv`] but accepts any `Read` source.
pub fn load_samples_reader<R: Read>(reader: R) -> OutputResult<Vec<SampleRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<RawLogRecord>()
        .map(|result| {
            let row = result?;
            let entity_id: EntityId = row
                .entity_id
                .parse()
                .map_err(|e: vt_core::CoreError| OutputError::Parse(e.to_string()))?;
            let zone = (row.zone_name != NO_ZONE).then_some(row.zone_name);
            Ok(SampleRecord {
                entity_id,
                position:   Vec3::new(row.position_x, row.position_y, row.position_z),
                sim_secs:   row.recorded_time,
                wall_clock: row.wall_clock_datetime,
                zone,
            })
        })
        .collect()
}
