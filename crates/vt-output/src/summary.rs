//! Dwell-time summary: one pivoted CSV written at shutdown.
//!
//! ```csv
//! entity_id,Arena停留時間(秒),Stage停留時間(秒)
//! Player_1,10.00,0.00
//! Player_2,0.00,35.00
//! ```
//!
//! Zone columns are every zone charged to any entity, sorted
//! lexicographically.  Missing entity/zone pairs are `0.00`.  Entities never
//! charged in any zone get no row.

use std::path::Path;

use csv::Writer;
use vt_track::DwellSnapshot;

use crate::OutputResult;

/// Appended to each zone name to form its column header.
pub const SUMMARY_COLUMN_SUFFIX: &str = "停留時間(秒)";

/// The summary header row for `snapshot`.
pub fn summary_header(snapshot: &DwellSnapshot) -> Vec<String> {
    std::iter::once("entity_id".to_owned())
        .chain(
            snapshot
                .zone_names()
                .into_iter()
                .map(|z| format!("{z}{SUMMARY_COLUMN_SUFFIX}")),
        )
        .collect()
}

/// Write the pivoted summary of `snapshot` to `path`, replacing any existing
/// file.
pub fn write_summary_csv(path: &Path, snapshot: &DwellSnapshot) -> OutputResult<()> {
    let zones = snapshot.zone_names();
    let mut w = Writer::from_path(path)?;
    w.write_record(summary_header(snapshot))?;

    for entry in snapshot.charged() {
        let mut row = Vec::with_capacity(zones.len() + 1);
        row.push(entry.entity.to_string());
        for zone in &zones {
            let secs = entry.totals.get(*zone).copied().unwrap_or(0.0);
            row.push(format!("{secs:.2}"));
        }
        w.write_record(&row)?;
    }

    w.flush()?;
    Ok(())
}
