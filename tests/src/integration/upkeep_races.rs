//! # Upkeep Races
//!
//! The check/apply split under interleaving: proposals computed by one
//! caller and committed after another caller already moved the entry, and
//! readers running `check_due` while a writer applies.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{random_submission, Harness, DAY, HOUR, T0};
    use shared_types::Phase;
    use std::sync::Arc;
    use std::thread;
    use tv_01_disclosure::{DisclosureApi, DisclosureConfig, UpkeepAction};

    #[test]
    fn test_second_keeper_proposals_are_stale() {
        let h = Harness::new();
        let id = h
            .service
            .add_entry(random_submission("Alice", "TestData", T0 + DAY))
            .unwrap();
        h.clock.set(T0 + DAY - HOUR);

        // Two keepers check at the same moment
        let first = h.service.check_due(h.service.now());
        let second = h.service.check_due(h.service.now());
        assert_eq!(first, second);

        let applied = h.service.apply(&first.proposals);
        let stale = h.service.apply(&second.proposals);

        assert_eq!(applied.applied, vec![UpkeepAction::RequestRelease(id)]);
        assert!(stale.applied.is_empty());
        assert_eq!(stale.skipped, vec![UpkeepAction::RequestRelease(id)]);
        assert_eq!(h.kinds(), vec!["KeyReleaseRequested"]);
    }

    #[test]
    fn test_finalize_proposal_after_clear_is_stale() {
        let h = Harness::new();
        h.service
            .add_entry(random_submission("Alice", "TestData", T0 + DAY))
            .unwrap();
        h.clock.set(T0 + DAY);
        h.service.run_upkeep();

        let check = h.service.check_due(h.service.now());
        assert_eq!(check.proposals, vec![UpkeepAction::FinalizeRelease(0)]);

        h.service.clear();
        let report = h.service.apply(&check.proposals);
        assert!(report.is_noop());
        assert_eq!(report.skipped.len(), 1);
    }

    #[test]
    fn test_clock_moving_backwards_invalidates_proposal() {
        let h = Harness::new();
        h.service
            .add_entry(random_submission("Alice", "TestData", T0 + DAY))
            .unwrap();

        h.clock.set(T0 + DAY);
        let check = h.service.check_due(h.service.now());
        h.clock.set(T0 + HOUR);

        let report = h.service.apply(&check.proposals);
        assert!(report.is_noop());
        assert_eq!(h.service.phase_of(0).unwrap(), Phase::Pending);
        assert!(h.log.is_empty());
    }

    #[test]
    fn test_batch_cap_drains_over_several_cycles() {
        let h = Harness::with_config(DisclosureConfig::default().with_max_batch(4));
        for i in 0..10 {
            h.service
                .add_entry(random_submission("Alice", &format!("data-{i}"), T0 + DAY))
                .unwrap();
        }
        h.clock.set(T0 + DAY - HOUR);

        let mut cycles = 0;
        while h.service.check_due(h.service.now()).upkeep_needed {
            let report = h.service.run_upkeep();
            assert!(report.applied.len() <= 4);
            cycles += 1;
        }

        assert_eq!(cycles, 3);
        assert!(h
            .service
            .list_all()
            .iter()
            .all(|e| e.phase() == Phase::ReleaseRequested));
        assert_eq!(h.log.len(), 10);
    }

    #[test]
    fn test_concurrent_keepers_apply_each_transition_once() {
        let h = Harness::new();
        for i in 0..50 {
            h.service
                .add_entry(random_submission("Alice", &format!("data-{i}"), T0 + DAY))
                .unwrap();
        }
        h.clock.set(T0 + DAY);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let service = Arc::clone(&h.service);
                thread::spawn(move || {
                    let mut applied = 0;
                    for _ in 0..4 {
                        applied += service.run_upkeep().applied.len();
                    }
                    applied
                })
            })
            .collect();

        let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

        // Two transitions per entry, each applied exactly once
        assert_eq!(total, 100);
        assert_eq!(h.log.len(), 100);
        assert!(h
            .service
            .list_all()
            .iter()
            .all(|e| e.phase() == Phase::Released));
    }

    #[test]
    fn test_readers_run_alongside_writer() {
        let h = Harness::new();
        for i in 0..20 {
            h.service
                .add_entry(random_submission("Alice", &format!("data-{i}"), T0 + DAY + i))
                .unwrap();
        }
        h.clock.set(T0 + 2 * DAY);

        let readers: Vec<_> = (0..3)
            .map(|_| {
                let service = Arc::clone(&h.service);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let check = service.check_due(T0 + 2 * DAY);
                        // Proposals always come back in id order
                        let ids: Vec<u64> = check.proposals.iter().map(UpkeepAction::id).collect();
                        let mut sorted = ids.clone();
                        sorted.sort_unstable();
                        assert_eq!(ids, sorted);
                        let _ = service.get_public_view("data-0", "Alice");
                    }
                })
            })
            .collect();

        let writer = {
            let service = Arc::clone(&h.service);
            thread::spawn(move || {
                while service.check_due(T0 + 2 * DAY).upkeep_needed {
                    service.run_upkeep();
                }
            })
        };

        for reader in readers {
            reader.join().unwrap();
        }
        writer.join().unwrap();

        assert!(!h.service.check_due(T0 + 2 * DAY).upkeep_needed);
        assert_eq!(h.log.len(), 40);
    }

    #[test]
    fn test_event_order_matches_commit_order() {
        let h = Harness::new();
        for i in 0..5 {
            h.service
                .add_entry(random_submission("Alice", &format!("data-{i}"), T0 + DAY))
                .unwrap();
        }
        h.clock.set(T0 + DAY);
        h.service.run_upkeep();
        h.service.run_upkeep();

        let ids: Vec<u64> = h
            .log
            .events()
            .iter()
            .filter_map(|e| e.entry_id())
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 0, 1, 2, 3, 4]);

        let sequences: Vec<u64> = h.log.snapshot().iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, (1..=10).collect::<Vec<_>>());
    }
}
