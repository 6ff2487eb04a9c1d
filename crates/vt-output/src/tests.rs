//! Integration tests for vt-output.

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;
use vt_core::{EntityId, Vec3};

use crate::SampleRecord;

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn stamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 4, 20)
        .unwrap()
        .and_hms_opt(19, 10, 27)
        .unwrap()
}

fn sample(id: u32, t: f64, zone: Option<&str>) -> SampleRecord {
    SampleRecord::new(
        EntityId(id),
        Vec3::new(1.234, -0.5, 10.0),
        t,
        "2025-04-20 19:10:27",
        zone,
    )
}

// ── SampleRecord ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod row_tests {
    use super::*;

    #[test]
    fn fields_in_column_order() {
        let fields = sample(3, 12.346, Some("Arena")).to_fields();
        assert_eq!(
            fields,
            ["12.35", "2025-04-20 19:10:27", "Player_3", "1.23", "-0.50", "10.00", "Arena"]
        );
    }

    #[test]
    fn no_zone_writes_literal_none() {
        let r = sample(1, 0.0, None);
        assert_eq!(r.zone_label(), "None");
        assert_eq!(r.to_fields()[6], "None");
    }
}

// ── Raw log ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod raw_log_tests {
    use super::*;
    use crate::{RAW_LOG_HEADER, RawLog, load_samples_csv, load_samples_reader};

    #[test]
    fn header_written_on_create() {
        let dir = tmp();
        let log = RawLog::new(dir.path().join("raw.csv"));
        log.write_header().unwrap();

        let mut rdr = csv::Reader::from_path(log.path()).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, RAW_LOG_HEADER);
        assert_eq!(rdr.records().count(), 0);
    }

    #[test]
    fn appended_rows_follow_header() {
        let dir = tmp();
        let log = RawLog::new(dir.path().join("raw.csv"));
        log.write_header().unwrap();
        log.append(&sample(1, 0.0, Some("Arena"))).unwrap();
        log.append(&sample(2, 0.0, None)).unwrap();

        let text = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "recorded_time,wall_clock_datetime,entity_id,position_x,position_y,position_z,zone_name"
        );
        assert_eq!(lines[1], "0.00,2025-04-20 19:10:27,Player_1,1.23,-0.50,10.00,Arena");
        assert_eq!(lines[2], "0.00,2025-04-20 19:10:27,Player_2,1.23,-0.50,10.00,None");
    }

    #[test]
    fn split_on_commas_recovers_id_and_zone() {
        let dir = tmp();
        let log = RawLog::new(dir.path().join("raw.csv"));
        log.write_header().unwrap();
        for (id, zone) in [(1, "Arena"), (2, "Main Hall"), (3, "None")] {
            let z = (zone != "None").then_some(zone);
            log.append(&sample(id, 5.0, z)).unwrap();
        }

        let text = std::fs::read_to_string(log.path()).unwrap();
        let parsed: Vec<(String, String)> = text
            .lines()
            .skip(1)
            .map(|l| {
                let cols: Vec<&str> = l.split(',').collect();
                (cols[2].to_owned(), cols[6].to_owned())
            })
            .collect();
        assert_eq!(
            parsed,
            [
                ("Player_1".to_owned(), "Arena".to_owned()),
                ("Player_2".to_owned(), "Main Hall".to_owned()),
                ("Player_3".to_owned(), "None".to_owned()),
            ]
        );
    }

    #[test]
    fn reader_loads_what_was_written() {
        let dir = tmp();
        let log = RawLog::new(dir.path().join("raw.csv"));
        log.write_header().unwrap();
        log.append(&sample(1, 5.0, Some("Arena"))).unwrap();
        log.append(&sample(2, 5.0, None)).unwrap();

        let rows = load_samples_csv(log.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].entity_id, EntityId(1));
        assert_eq!(rows[0].zone.as_deref(), Some("Arena"));
        assert_eq!(rows[0].sim_secs, 5.0);
        assert!((rows[0].position.x - 1.23).abs() < 1e-6);
        assert_eq!(rows[1].zone, None);
    }

    #[test]
    fn reader_rejects_foreign_entity_ids() {
        let text = "recorded_time,wall_clock_datetime,entity_id,position_x,position_y,position_z,zone_name\n\
                    0.00,2025-04-20 19:10:27,Bot_1,0.00,0.00,0.00,None\n";
        assert!(load_samples_reader(text.as_bytes()).is_err());
    }

    #[test]
    fn append_into_missing_directory_fails() {
        let dir = tmp();
        let log = RawLog::new(dir.path().join("gone").join("raw.csv"));
        assert!(log.append(&sample(1, 0.0, None)).is_err());
    }
}

// ── Summary ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod summary_tests {
    use vt_track::{DwellAccumulator, DwellSnapshot};

    use super::*;
    use crate::{summary_header, write_summary_csv};

    #[test]
    fn pivoted_sorted_and_zero_filled() {
        let mut acc = DwellAccumulator::new();
        acc.update(EntityId(1), Some("Stage"), 0.0);
        acc.update(EntityId(2), Some("Arena"), 0.0);
        acc.update(EntityId(1), Some("Stage"), 5.0);
        acc.update(EntityId(2), Some("Arena"), 7.5);
        let snap = acc.snapshot();

        let dir = tmp();
        let path = dir.path().join("summary.csv");
        write_summary_csv(&path, &snap).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, [
            "entity_id,Arena停留時間(秒),Stage停留時間(秒)",
            "Player_1,0.00,5.00",
            "Player_2,7.50,0.00",
        ]);
    }

    #[test]
    fn never_charged_entities_get_no_row() {
        let mut acc = DwellAccumulator::new();
        acc.update(EntityId(1), None, 0.0);
        acc.update(EntityId(2), Some("Arena"), 0.0);
        acc.update(EntityId(3), Some("Arena"), 4.0);
        acc.update(EntityId(1), None, 5.0);
        acc.update(EntityId(2), Some("Arena"), 5.0);

        let dir = tmp();
        let path = dir.path().join("summary.csv");
        write_summary_csv(&path, &acc.snapshot()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, ["entity_id,Arena停留時間(秒)", "Player_2,5.00"]);
    }

    #[test]
    fn header_only_entity_column_without_zones() {
        let snap = DwellSnapshot::default();
        assert_eq!(summary_header(&snap), ["entity_id"]);
    }
}

// ── Paths ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod path_tests {
    use std::path::Path;

    use vt_core::{AppPaths, SamplerConfig};

    use super::*;
    use crate::{ensure_dir_or_fallback, resolve_output_dir, timestamped_file};

    fn app_paths() -> AppPaths {
        AppPaths::new("/srv/app", "/var/data/app")
    }

    #[test]
    fn unset_uses_persistent_dir() {
        let cfg = SamplerConfig::default();
        assert_eq!(resolve_output_dir(&cfg, &app_paths()), Path::new("/var/data/app"));
    }

    #[test]
    fn relative_joins_app_root() {
        let cfg = SamplerConfig { output_dir: Some("TrackData".into()), ..Default::default() };
        assert_eq!(resolve_output_dir(&cfg, &app_paths()), Path::new("/srv/app/TrackData"));
    }

    #[test]
    fn absolute_used_as_is() {
        let dir = tmp();
        let cfg = SamplerConfig { output_dir: Some(dir.path().to_path_buf()), ..Default::default() };
        assert_eq!(resolve_output_dir(&cfg, &app_paths()), dir.path());
    }

    #[test]
    fn ensure_creates_missing_dir() {
        let dir = tmp();
        let target = dir.path().join("a").join("b");
        let fallback = dir.path().join("fallback");
        assert_eq!(ensure_dir_or_fallback(&target, &fallback), target);
        assert!(target.is_dir());
        assert!(!fallback.exists());
    }

    #[test]
    fn ensure_falls_back_when_creation_fails() {
        let dir = tmp();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let target = blocker.join("sub");
        let fallback = dir.path().join("fallback");

        assert_eq!(ensure_dir_or_fallback(&target, &fallback), fallback);
        assert!(fallback.is_dir());
    }

    #[test]
    fn file_name_uses_prefix_and_stamp() {
        let p = timestamped_file(Path::new("/out"), "player_positions", stamp());
        assert_eq!(p, Path::new("/out/player_positions_20250420_191027.csv"));
    }
}
