//! Property-based tests using proptest
//!
//! These tests check target rendering, `name=value` parsing and selection
//! cursor handling against randomized inputs.

use crossterm::event::{KeyCode, KeyModifiers};
use hal::link::{extract_target_name, TargetCandidate, TargetCatalog};
use hal::operation::env::{parse_env_pairs, parse_pair};
use hal::ui::select::{parse_answer, SelectAction, SelectState};
use hal::HalError;
use proptest::prelude::*;

fn arb_catalog() -> impl Strategy<Value = TargetCatalog> {
    prop_oneof![Just(TargetCatalog::Capability), Just(TargetCatalog::Component)]
}

/// Names may themselves contain the separator
fn arb_target_name() -> impl Strategy<Value = String> {
    "[a-z0-9][a-z0-9: .-]{0,40}"
}

fn arb_env_name() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,30}"
}

fn arb_key() -> impl Strategy<Value = KeyCode> {
    prop_oneof![
        Just(KeyCode::Down),
        Just(KeyCode::Up),
        Just(KeyCode::Tab),
        Just(KeyCode::BackTab),
        Just(KeyCode::Home),
        Just(KeyCode::End),
        Just(KeyCode::Char('j')),
        Just(KeyCode::Char('k')),
        Just(KeyCode::Char('G')),
        (1u8..=9).prop_map(|d| KeyCode::Char((b'0' + d) as char)),
    ]
}

proptest! {
    #[test]
    fn rendered_target_extracts_to_name(catalog in arb_catalog(), name in arb_target_name()) {
        let candidate = TargetCandidate { catalog, name: name.clone() };
        let rendered = candidate.render();
        prop_assert!(rendered.starts_with(catalog.prefix()));
        prop_assert_eq!(extract_target_name(&rendered), name.as_str());
    }

    #[test]
    fn bare_name_without_separator_is_unchanged(name in "[a-z0-9-]{1,40}") {
        prop_assert_eq!(extract_target_name(&name), name.as_str());
    }

    #[test]
    fn pair_splits_on_first_equals(name in arb_env_name(), value in "[ -~]{0,40}") {
        let pair = format!("{}={}", name, value);
        let (parsed_name, parsed_value) = parse_pair(&pair, "environment variable").unwrap();
        prop_assert_eq!(parsed_name, name);
        prop_assert_eq!(parsed_value, value);
    }

    #[test]
    fn pair_without_equals_is_invalid(pair in "[A-Za-z0-9_ :.-]{0,40}") {
        match parse_pair(&pair, "environment variable") {
            Err(HalError::InvalidInput(msg)) => prop_assert!(msg.contains(&pair)),
            other => prop_assert!(false, "unexpected result: {:?}", other),
        }
    }

    #[test]
    fn env_pairs_keep_order(names in prop::collection::vec(arb_env_name(), 0..10)) {
        let pairs: Vec<String> = names.iter().enumerate().map(|(i, n)| format!("{}={}", n, i)).collect();
        let envs = parse_env_pairs(&pairs).unwrap();
        prop_assert_eq!(envs.len(), names.len());
        for (i, env) in envs.iter().enumerate() {
            prop_assert_eq!(&env.name, &names[i]);
            prop_assert_eq!(env.value.clone(), i.to_string());
        }
    }

    #[test]
    fn one_bad_pair_fails_the_batch(
        good in prop::collection::vec(arb_env_name(), 0..5),
        bad in "[A-Za-z_]{1,10}",
    ) {
        let mut pairs: Vec<String> = good.iter().map(|n| format!("{}=v", n)).collect();
        pairs.push(bad);
        prop_assert!(parse_env_pairs(&pairs).is_err());
    }

    #[test]
    fn selection_cursor_stays_in_bounds(
        len in 1usize..20,
        keys in prop::collection::vec(arb_key(), 0..50),
    ) {
        let mut state = SelectState::new(len);
        for key in keys {
            prop_assert_eq!(state.handle_key(key, KeyModifiers::NONE), SelectAction::Continue);
            prop_assert!(state.selected < len);
        }
        prop_assert_eq!(
            state.handle_key(KeyCode::Enter, KeyModifiers::NONE),
            SelectAction::Chosen(state.selected)
        );
    }

    #[test]
    fn numeric_answer_selects_by_position(
        candidates in prop::collection::vec("[a-z]{1,10}", 1..10),
        pick in any::<prop::sample::Index>(),
    ) {
        let index = pick.index(candidates.len());
        prop_assert_eq!(parse_answer(&(index + 1).to_string(), &candidates), Some(index));
    }
}
