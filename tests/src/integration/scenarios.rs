//! # End-to-End Scenarios
//!
//! Full entry lifecycles driven by a manual clock: submission, upkeep
//! through both phases, and gate pulls.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{random_submission, submission, Harness, DAY, HOUR, T0};
    use shared_bus::DisclosureEvent;
    use shared_crypto::{keccak256, IntegrityValidator};
    use shared_types::Phase;
    use tv_01_disclosure::{
        DisclosureApi, DisclosureConfig, DisclosureError, UpkeepAction, ValidationError,
    };

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    #[test]
    fn test_two_phase_release_with_events() {
        let h = Harness::new();
        let id = h
            .service
            .add_entry(submission("Alice", "TestData", b"EncryptedHello", b"key", T0 + DAY))
            .unwrap();

        h.clock.set(T0 + 43_201);
        let check = h.service.check_due(h.service.now());
        assert!(check.upkeep_needed);
        assert_eq!(check.proposals, vec![UpkeepAction::RequestRelease(id)]);
        h.service.apply(&check.proposals);
        assert_eq!(h.service.phase_of(id).unwrap(), Phase::ReleaseRequested);
        assert_eq!(
            h.log.events().last(),
            Some(&DisclosureEvent::KeyReleaseRequested {
                id,
                owner: "Alice".into(),
                data_name: "TestData".into()
            })
        );

        h.clock.set(T0 + 86_401);
        let check = h.service.check_due(h.service.now());
        assert_eq!(check.proposals, vec![UpkeepAction::FinalizeRelease(id)]);
        h.service.apply(&check.proposals);
        assert_eq!(h.service.phase_of(id).unwrap(), Phase::Released);
        assert_eq!(
            h.log.events().last(),
            Some(&DisclosureEvent::KeyReleased {
                id,
                owner: "Alice".into(),
                data_name: "TestData".into()
            })
        );

        assert_eq!(h.kinds(), vec!["KeyReleaseRequested", "KeyReleased"]);
        assert!(h.service.get_public_view("TestData", "Alice").unwrap().key_released);
    }

    #[test]
    fn test_empty_owner_rejected_store_untouched() {
        let h = Harness::new();

        let err = h
            .service
            .add_entry(submission("", "TestData", b"EncryptedHello", b"key", T0 + DAY))
            .unwrap_err();

        assert_eq!(err, DisclosureError::Validation(ValidationError::OwnerRequired));
        assert_eq!(err.to_string(), "Owner is required");
        assert_eq!(h.service.entry_count(), 0);
        assert!(h.service.list_all().is_empty());
        assert!(h.log.is_empty());
    }

    #[test]
    fn test_payload_pull_waits_for_release_time() {
        let h = Harness::new();
        let id = h
            .service
            .add_entry(submission("Alice", "TestData", b"EncryptedHello", b"key", T0 + DAY))
            .unwrap();

        assert!(matches!(
            h.service.send_payload(id),
            Err(DisclosureError::NotYetReleasable { .. })
        ));
        assert!(h.log.is_empty());

        h.clock.set(T0 + DAY + 1);
        let payload = h.service.send_payload(id).unwrap();
        assert_eq!(payload, b"EncryptedHello");
        let stored = h.service.get_entry(id).unwrap();
        assert!(IntegrityValidator::new().verify(&payload, stored.content_hash()));
        assert_eq!(
            h.log.events(),
            vec![DisclosureEvent::PushEncryptedData {
                payload: b"EncryptedHello".to_vec(),
                owner: "Alice".into(),
                data_name: "TestData".into(),
                hash: keccak256(b"EncryptedHello"),
            }]
        );
    }

    // =========================================================================
    // INDEPENDENT PATHS
    // =========================================================================

    #[test]
    fn test_gate_does_not_depend_on_upkeep() {
        let h = Harness::new();
        let id = h
            .service
            .add_entry(submission("Alice", "TestData", b"EncryptedHello", b"key", T0 + DAY))
            .unwrap();

        // No upkeep has run: still Pending, yet the key is available
        h.clock.set(T0 + DAY);
        assert_eq!(h.service.send_decryption_key(id).unwrap(), b"key");
        assert_eq!(h.service.phase_of(id).unwrap(), Phase::Pending);
        assert!(!h.service.get_public_view("TestData", "Alice").unwrap().key_released);
    }

    #[test]
    fn test_phase_does_not_unlock_gate_early() {
        let h = Harness::new();
        let id = h
            .service
            .add_entry(submission("Alice", "TestData", b"EncryptedHello", b"key", T0 + DAY))
            .unwrap();

        h.clock.set(T0 + DAY - HOUR);
        h.service.run_upkeep();
        assert_eq!(h.service.phase_of(id).unwrap(), Phase::ReleaseRequested);
        assert!(h.service.send_decryption_key(id).is_err());
    }

    // =========================================================================
    // STORE SEMANTICS
    // =========================================================================

    #[test]
    fn test_validation_order_first_failure_wins() {
        let h = Harness::new();
        let mut bad = submission("", "", b"", b"", T0);
        let err = h.service.add_entry(bad.clone()).unwrap_err();
        assert_eq!(err, DisclosureError::Validation(ValidationError::OwnerRequired));

        bad.owner = "Alice".into();
        let err = h.service.add_entry(bad.clone()).unwrap_err();
        assert_eq!(err, DisclosureError::Validation(ValidationError::DataNameRequired));

        bad.data_name = "TestData".into();
        let err = h.service.add_entry(bad.clone()).unwrap_err();
        assert_eq!(err, DisclosureError::Validation(ValidationError::PayloadRequired));

        bad.encrypted_payload = b"x".to_vec();
        let err = h.service.add_entry(bad.clone()).unwrap_err();
        assert_eq!(err, DisclosureError::Validation(ValidationError::KeyRequired));

        bad.decryption_key = b"k".to_vec();
        let err = h.service.add_entry(bad).unwrap_err();
        assert!(matches!(
            err,
            DisclosureError::Validation(ValidationError::ReleaseTimeInPast { .. })
        ));
        assert_eq!(h.service.entry_count(), 0);
    }

    #[test]
    fn test_duplicate_names_first_match_wins() {
        let h = Harness::new();
        h.service
            .add_entry(submission("Alice", "TestData", b"first", b"k1", T0 + DAY))
            .unwrap();
        h.service
            .add_entry(submission("Alice", "TestData", b"second", b"k2", T0 + 2 * DAY))
            .unwrap();

        let view = h.service.get_public_view("TestData", "Alice").unwrap();
        assert_eq!(view.encrypted_payload, b"first");
        assert!(matches!(
            h.service.get_public_view("TestData", "Bob"),
            Err(DisclosureError::NotFound(_))
        ));
    }

    #[test]
    fn test_ids_survive_clear() {
        let h = Harness::new();
        for i in 0..3 {
            let id = h
                .service
                .add_entry(random_submission("Alice", &format!("data-{i}"), T0 + DAY))
                .unwrap();
            assert_eq!(id, i);
        }

        h.service.clear();
        assert_eq!(h.service.entry_count(), 0);
        assert!(h.service.check_due(u64::MAX).proposals.is_empty());

        let id = h
            .service
            .add_entry(random_submission("Alice", "after-clear", T0 + DAY))
            .unwrap();
        assert_eq!(id, 3);
        assert!(matches!(h.service.phase_of(0), Err(DisclosureError::NotFound(_))));
    }

    #[test]
    fn test_mismatched_hash_rejected_at_submission() {
        let h = Harness::new();
        let mut tampered = submission("Alice", "TestData", b"EncryptedHello", b"key", T0 + DAY);
        tampered.content_hash = keccak256(b"something else");
        assert!(matches!(
            h.service.add_entry(tampered),
            Err(DisclosureError::IntegrityMismatch { id: 0, .. })
        ));
        assert_eq!(h.service.entry_count(), 0);

        h.clock.set(T0 + DAY);
        assert!(h.service.run_upkeep().is_noop());
        assert!(h.log.is_empty());

        // Same entry with both checks switched off is stored and released as is
        let lenient = Harness::with_config(DisclosureConfig {
            verify_on_add: false,
            verify_on_disclosure: false,
            ..DisclosureConfig::default()
        });
        let mut tampered = submission("Alice", "TestData", b"EncryptedHello", b"key", T0 + DAY);
        tampered.content_hash = keccak256(b"something else");
        let id = lenient.service.add_entry(tampered).unwrap();
        lenient.clock.set(T0 + DAY);
        assert_eq!(lenient.service.send_payload(id).unwrap(), b"EncryptedHello");
    }

    #[test]
    fn test_accepted_entry_always_disclosable_at_release() {
        for config in [
            DisclosureConfig::default(),
            DisclosureConfig {
                verify_on_add: false,
                ..DisclosureConfig::default()
            },
        ] {
            let h = Harness::with_config(config);
            let id = h
                .service
                .add_entry(submission("Alice", "TestData", b"EncryptedHello", b"key", T0 + DAY))
                .unwrap();

            h.clock.set(T0 + DAY);
            h.service.run_upkeep();
            h.service.run_upkeep();
            assert_eq!(h.service.phase_of(id).unwrap(), Phase::Released);
            assert!(h.service.get_public_view("TestData", "Alice").unwrap().key_released);

            assert_eq!(h.service.send_decryption_key(id).unwrap(), b"key");
            assert_eq!(h.service.send_payload(id).unwrap(), b"EncryptedHello");
        }
    }

    #[test]
    fn test_list_all_returns_full_records_in_id_order() {
        let h = Harness::new();
        h.service
            .add_entry(submission("Alice", "a", b"pa", b"ka", T0 + 2 * DAY))
            .unwrap();
        h.service
            .add_entry(submission("Bob", "b", b"pb", b"kb", T0 + DAY))
            .unwrap();

        let all = h.service.list_all();
        let ids: Vec<u64> = all.iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(all[1].decryption_key(), b"kb");
        assert_eq!(all[1].owner(), "Bob");
    }
}
