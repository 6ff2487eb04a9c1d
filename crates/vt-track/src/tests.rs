//! Unit tests for vt-track.

#[cfg(test)]
mod identity {
    use vt_core::{EntityHandle, EntityId};

    use crate::{ExclusionPolicy, IdentityRegistry};

    fn registry() -> IdentityRegistry {
        IdentityRegistry::new(ExclusionPolicy::new(["EventSystem", "PositionTracker"]))
    }

    #[test]
    fn first_id_is_player_1() {
        let mut reg = registry();
        let id = reg.resolve(EntityHandle(9001), "Player(Clone)").unwrap();
        assert_eq!(id, EntityId(1));
        assert_eq!(id.to_string(), "Player_1");
    }

    #[test]
    fn resolve_is_idempotent() {
        let mut reg = registry();
        let a = reg.resolve(EntityHandle(7), "Player").unwrap();
        let b = reg.resolve(EntityHandle(7), "Player").unwrap();
        assert_eq!(a, b);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.allocated(), 1);
    }

    #[test]
    fn distinct_handles_same_name_get_distinct_ids() {
        let mut reg = registry();
        let a = reg.resolve(EntityHandle(1), "Player(Clone)").unwrap();
        let b = reg.resolve(EntityHandle(2), "Player(Clone)").unwrap();
        assert_eq!(a.to_string(), "Player_1");
        assert_eq!(b.to_string(), "Player_2");
    }

    #[test]
    fn excluded_names_are_not_trackable() {
        let mut reg = registry();
        assert!(reg.resolve(EntityHandle(1), "EventSystem").is_none());
        assert!(reg.resolve(EntityHandle(2), "PlayerPositionTracker").is_none());
        // Exclusions do not burn sequence numbers.
        assert_eq!(reg.resolve(EntityHandle(3), "Player").unwrap(), EntityId(1));
    }

    #[test]
    fn released_handle_reused_gets_fresh_id() {
        let mut reg = registry();
        let first = reg.resolve(EntityHandle(42), "Player").unwrap();
        assert_eq!(reg.release(EntityHandle(42)), Some(first));
        let second = reg.resolve(EntityHandle(42), "Player").unwrap();
        assert_ne!(first, second);
        assert_eq!(second, EntityId(2));
    }

    #[test]
    fn clear_keeps_sequence_counter() {
        let mut reg = registry();
        reg.resolve(EntityHandle(1), "Player");
        reg.resolve(EntityHandle(2), "Player");
        reg.clear();
        assert!(reg.is_empty());
        assert!(reg.get(EntityHandle(1)).is_none());
        assert_eq!(reg.resolve(EntityHandle(1), "Player").unwrap(), EntityId(3));
    }

    #[test]
    fn empty_policy_excludes_nothing() {
        let policy = ExclusionPolicy::new(Vec::<String>::new());
        assert!(!policy.excludes("EventSystem"));
        assert!(!ExclusionPolicy::new([""]).excludes("anything"));
    }
}

#[cfg(test)]
mod dwell {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use vt_core::EntityId;

    use crate::{DwellAccumulator, NO_ZONE};

    const P1: EntityId = EntityId(1);
    const P2: EntityId = EntityId(2);

    #[test]
    fn first_update_charges_nothing() {
        let mut acc = DwellAccumulator::new();
        acc.update(P1, Some("Arena"), 3.0);
        assert_eq!(acc.total(P1, "Arena"), 0.0);
        assert_eq!(acc.current_zone(P1), Some("Arena"));
        assert_eq!(acc.len(), 1);
    }

    #[test]
    fn arena_in_out_in_scenario() {
        let mut acc = DwellAccumulator::new();
        acc.update(P1, Some("Arena"), 0.0);
        acc.update(P1, Some("Arena"), 5.0);
        acc.update(P1, None, 10.0);
        acc.update(P1, Some("Arena"), 15.0);
        assert!((acc.total(P1, "Arena") - 10.0).abs() < 1e-9);
        assert_eq!(acc.current_zone(P1), Some("Arena"));
    }

    #[test]
    fn zone_change_charges_previous_zone() {
        let mut acc = DwellAccumulator::new();
        acc.update(P1, Some("Lobby"), 0.0);
        acc.update(P1, Some("Stage"), 4.0);
        acc.update(P1, Some("Stage"), 9.0);
        assert_eq!(acc.total(P1, "Lobby"), 4.0);
        assert_eq!(acc.total(P1, "Stage"), 5.0);
    }

    #[test]
    fn sentinel_never_becomes_a_total() {
        let mut acc = DwellAccumulator::new();
        acc.update(P1, Some(NO_ZONE), 0.0);
        acc.update(P1, None, 5.0);
        acc.update(P1, Some("Arena"), 10.0);
        let snap = acc.snapshot();
        assert!(!snap.zone_names().contains(NO_ZONE));
        assert!(snap.entries[0].totals.is_empty());
    }

    #[test]
    fn backwards_clock_charges_nothing() {
        let mut acc = DwellAccumulator::new();
        acc.update(P1, Some("Arena"), 10.0);
        acc.update(P1, Some("Arena"), 8.0);
        assert_eq!(acc.total(P1, "Arena"), 0.0);
    }

    #[test]
    fn entities_are_independent() {
        let mut acc = DwellAccumulator::new();
        acc.update(P1, Some("Arena"), 0.0);
        acc.update(P2, Some("Stage"), 0.0);
        acc.update(P1, Some("Arena"), 5.0);
        acc.update(P2, None, 5.0);
        assert_eq!(acc.total(P1, "Arena"), 5.0);
        assert_eq!(acc.total(P2, "Stage"), 5.0);
        assert_eq!(acc.total(P2, "Arena"), 0.0);
    }

    #[test]
    fn snapshot_keeps_first_seen_order_and_does_not_reset() {
        let mut acc = DwellAccumulator::new();
        acc.update(EntityId(10), Some("B"), 0.0);
        acc.update(EntityId(2), Some("A"), 0.0);
        acc.update(EntityId(10), Some("B"), 1.0);
        let snap = acc.snapshot();
        let order: Vec<EntityId> = snap.entries.iter().map(|e| e.entity).collect();
        assert_eq!(order, [EntityId(10), EntityId(2)]);
        assert_eq!(snap.zone_names().into_iter().collect::<Vec<_>>(), ["B"]);
        assert_eq!(snap.get(EntityId(10), "B"), 1.0);
        assert_eq!(snap.get(EntityId(2), "B"), 0.0);
        assert_eq!(acc.total(EntityId(10), "B"), 1.0);
    }

    #[test]
    fn charged_skips_entities_without_totals() {
        let mut acc = DwellAccumulator::new();
        acc.update(P1, Some("Arena"), 0.0);
        acc.update(P2, None, 0.0);
        assert!(!acc.snapshot().has_charges());

        acc.update(P1, Some("Arena"), 5.0);
        acc.update(P2, None, 5.0);
        let snap = acc.snapshot();
        assert!(snap.has_charges());
        assert_eq!(snap.len(), 2);
        let charged: Vec<EntityId> = snap.charged().map(|e| e.entity).collect();
        assert_eq!(charged, [P1]);
    }

    #[test]
    fn clear_drops_state() {
        let mut acc = DwellAccumulator::new();
        acc.update(P1, Some("Arena"), 0.0);
        acc.clear();
        assert!(acc.is_empty());
        assert!(acc.snapshot().is_empty());
    }

    /// Charged time equals the sum of intervals that started inside a zone,
    /// and never exceeds the total elapsed time.
    #[test]
    fn charged_time_matches_in_zone_intervals() {
        let zones = [None, Some("Arena"), Some("Stage"), Some("Lobby")];
        for seed in 0..20u64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut acc = DwellAccumulator::new();
            let mut t = 0.0;
            let mut prev: Option<&str> = None;
            let mut expected = 0.0;
            let mut elapsed = 0.0;

            for step in 0..200 {
                let zone = zones[rng.gen_range(0..zones.len())];
                if step > 0 {
                    let dt: f64 = rng.gen_range(0.0..10.0);
                    t += dt;
                    elapsed += dt;
                    if prev.is_some() {
                        expected += dt;
                    }
                }
                acc.update(P1, zone, t);
                prev = zone;
            }

            let snap = acc.snapshot();
            let charged: f64 = snap.entries[0].totals.values().sum();
            assert!((charged - expected).abs() < 1e-6, "seed {seed}: {charged} vs {expected}");
            assert!(charged <= elapsed + 1e-6);
        }
    }
}
