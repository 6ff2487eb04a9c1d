//! Unit tests for vt-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EntityHandle, EntityId};

    #[test]
    fn entity_id_renders_player_label() {
        assert_eq!(EntityId(1).to_string(), "Player_1");
        assert_eq!(EntityId(42).to_string(), "Player_42");
    }

    #[test]
    fn entity_id_parses_its_own_label() {
        let id: EntityId = "Player_17".parse().unwrap();
        assert_eq!(id, EntityId(17));
        assert_eq!(id.seq(), 17);
    }

    #[test]
    fn entity_id_rejects_foreign_labels() {
        assert!("Agent_3".parse::<EntityId>().is_err());
        assert!("Player_".parse::<EntityId>().is_err());
        assert!("Player_x".parse::<EntityId>().is_err());
    }

    #[test]
    fn ordering_follows_sequence() {
        assert!(EntityId(2) < EntityId(10));
        assert!(EntityHandle(5) > EntityHandle(4));
    }
}

#[cfg(test)]
mod time {
    use chrono::NaiveDate;

    use crate::time::{format_file_stamp, format_wall_clock};
    use crate::{Clock, ManualClock};

    fn origin() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 20)
            .unwrap()
            .and_hms_opt(19, 10, 27)
            .unwrap()
    }

    #[test]
    fn manual_clock_starts_at_zero() {
        let clock = ManualClock::new(origin());
        assert_eq!(clock.sim_secs(), 0.0);
        assert_eq!(clock.wall_now(), origin());
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(origin());
        let other = clock.clone();
        clock.advance(5.0);
        assert_eq!(other.sim_secs(), 5.0);
        assert_eq!(format_wall_clock(other.wall_now()), "2025-04-20 19:10:32");
    }

    #[test]
    fn manual_clock_never_runs_backwards() {
        let clock = ManualClock::new(origin());
        clock.set(10.0);
        clock.set(3.0);
        clock.advance(-4.0);
        assert_eq!(clock.sim_secs(), 10.0);
    }

    #[test]
    fn formats() {
        assert_eq!(format_wall_clock(origin()), "2025-04-20 19:10:27");
        assert_eq!(format_file_stamp(origin()), "20250420_191027");
    }
}

#[cfg(test)]
mod config {
    use std::path::Path;

    use crate::{AppPaths, SamplerConfig};

    #[test]
    fn defaults() {
        let cfg = SamplerConfig::default();
        assert_eq!(cfg.sampling_interval_secs, 5.0);
        assert!(cfg.configured_output_dir().is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_and_negative_intervals_rejected() {
        for secs in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cfg = SamplerConfig { sampling_interval_secs: secs, ..Default::default() };
            assert!(cfg.validate().is_err(), "interval {secs} should be rejected");
        }
    }

    #[test]
    fn empty_output_dir_counts_as_unset() {
        let cfg = SamplerConfig { output_dir: Some("".into()), ..Default::default() };
        assert!(cfg.configured_output_dir().is_none());
    }

    #[test]
    fn json_partial_config_fills_defaults() {
        let cfg = SamplerConfig::from_json_str(r#"{ "sampling_interval_secs": 2.5, "output_dir": "TrackData" }"#)
            .unwrap();
        assert_eq!(cfg.sampling_interval_secs, 2.5);
        assert_eq!(cfg.configured_output_dir(), Some(Path::new("TrackData")));
        assert_eq!(cfg.raw_log_prefix, "player_positions");
    }

    #[test]
    fn json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sampler.json");
        std::fs::write(&path, r#"{ "raw_log_prefix": "positions" }"#).unwrap();
        let cfg = SamplerConfig::from_json_file(&path).unwrap();
        assert_eq!(cfg.raw_log_prefix, "positions");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SamplerConfig::from_json_str("{ not json").is_err());
    }

    #[test]
    fn app_paths_new() {
        let paths = AppPaths::new("/app", "/data");
        assert_eq!(paths.app_root, Path::new("/app"));
        assert_eq!(paths.persistent_data_dir, Path::new("/data"));
    }
}
