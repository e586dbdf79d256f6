// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property tests for scenario state chain construction
//!
//! Any sequence of configurator calls must yield a script whose
//! state-threaded rules form one continuous chain from `Started`, so
//! validation can never fail on configurator-built scripts.

mod fixtures;

use proptest::prelude::*;
use secapi_mock::sequence::{state_label, StubConfigurator};

proptest! {
    #[test]
    fn configurator_scripts_always_validate(ops in prop::collection::vec(0u8..5, 1..20)) {
        let mut cfg = StubConfigurator::new("prop-scenario", "tok");
        let mut ws = fixtures::test_workspace("ws-1");
        let url = ws.metadata.resource_path().unwrap();

        for op in &ops {
            match op {
                0 => cfg.configure_put(&url, &mut ws).unwrap(),
                1 => cfg.configure_get(&url, &mut ws).unwrap(),
                2 => cfg.configure_post(&url, &mut ws).unwrap(),
                3 => cfg.configure_delete(&url).unwrap(),
                _ => cfg.configure_get_not_found(&url).unwrap(),
            }
        }

        let script = cfg.into_script();
        prop_assert!(script.validate().is_ok());
        prop_assert_eq!(script.len(), ops.len());

        for (i, rule) in script.rules().iter().enumerate() {
            let required = state_label(i as u32);
            let advanced = state_label(i as u32 + 1);
            prop_assert_eq!(
                rule.required_scenario_state.as_deref(),
                Some(required.as_str())
            );
            prop_assert_eq!(rule.new_scenario_state.as_deref(), Some(advanced.as_str()));
        }
    }

    #[test]
    fn interleaved_list_rules_never_break_the_chain(
        ops in prop::collection::vec(0u8..2, 1..20)
    ) {
        let mut cfg = StubConfigurator::new("prop-scenario", "tok");
        let mut ws = fixtures::test_workspace("ws-1");
        let url = ws.metadata.resource_path().unwrap();
        let collection = ws.metadata.collection_path().unwrap();

        let mut threaded = 0u32;
        for (i, op) in ops.iter().enumerate() {
            match op {
                0 => {
                    cfg.configure_get(&url, &mut ws).unwrap();
                    threaded += 1;
                }
                _ => {
                    // Distinct query value per call keeps matcher sets unique
                    let value = i.to_string();
                    cfg.configure_get_json(
                        &collection,
                        &[("limit", value.as_str())],
                        &serde_json::json!({ "items": [] }),
                    )
                    .unwrap();
                }
            }
        }

        let script = cfg.into_script();
        prop_assert!(script.validate().is_ok());

        let chained: Vec<_> = script
            .rules()
            .iter()
            .filter(|r| r.is_state_threaded())
            .collect();
        prop_assert_eq!(chained.len() as u32, threaded);
        for (i, rule) in chained.iter().enumerate() {
            let required = state_label(i as u32);
            prop_assert_eq!(
                rule.required_scenario_state.as_deref(),
                Some(required.as_str())
            );
        }
    }
}
