//! Property-based tests for the navigator
//!
//! These tests verify key invariants hold across all possible inputs.

use super::*;
use proptest::prelude::*;
use serde_json::{json, Value};

// ============================================================================
// Test Helpers
// ============================================================================

fn apply(state: &NavigatorState, update: &StateUpdate) -> NavigatorState {
    NavigatorState {
        step_index: update.step_index.unwrap_or(state.step_index),
        last_step_text: update
            .last_step_text
            .clone()
            .or_else(|| state.last_step_text.clone()),
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![Just(Intent::Start), Just(Intent::Repeat), Just(Intent::Next)]
}

fn arb_step() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => ("[a-zA-Z ]{1,20}[a-z]", 1u32..20, proptest::option::of(0u32..60)).prop_map(
            |(instruction, index, timer)| {
                json!({"index": index, "instruction": instruction, "timer_min": timer})
            }
        ),
        1 => Just(json!({"index": 1, "instruction": ""})),
        1 => Just(json!({"instruction": 42})),
        1 => Just(Value::Null),
    ]
}

fn arb_steps() -> impl Strategy<Value = Vec<Value>> {
    proptest::collection::vec(arb_step(), 1..8)
}

fn arb_state() -> impl Strategy<Value = NavigatorState> {
    (0usize..12, proptest::option::of("[A-Za-z: ]{1,20}")).prop_map(
        |(step_index, last_step_text)| NavigatorState {
            step_index,
            last_step_text,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Invariant 1: step_index never exceeds the number of steps
    #[test]
    fn prop_index_stays_in_bounds(
        steps in arb_steps(),
        intents in proptest::collection::vec(arb_intent(), 0..30),
    ) {
        let mut state = NavigatorState::default();
        for intent in intents {
            let result = transition(intent, &state, Some(&steps));
            state = apply(&state, &result.update);
            prop_assert!(state.step_index <= steps.len(), "Out of bounds: {:?}", state);
        }
    }

    // Invariant 2: repeat with a cached text mutates nothing and replays it,
    // with or without a step list
    #[test]
    fn prop_repeat_with_cache_is_pure(
        steps in proptest::option::of(arb_steps()),
        state in arb_state(),
    ) {
        prop_assume!(state.last_step_text.is_some());
        let result = transition(Intent::Repeat, &state, steps.as_deref());
        prop_assert!(result.update.is_empty());
        prop_assert_eq!(Some(result.narration.text()), state.last_step_text.as_deref());
    }

    // Invariant 3: start always targets the first step
    #[test]
    fn prop_start_resets(steps in arb_steps(), state in arb_state()) {
        let result = transition(Intent::Start, &state, Some(&steps));
        prop_assert_eq!(result.update.step_index, Some(1));
    }

    // Invariant 4: once past the end, next is idempotent
    #[test]
    fn prop_finished_is_idempotent(steps in arb_steps(), extra in 0usize..5) {
        let state = NavigatorState { step_index: steps.len() + extra, last_step_text: None };
        let first = transition(Intent::Next, &state, Some(&steps));
        prop_assert_eq!(&first.narration, &Narration::Finished);
        let again = transition(Intent::Next, &apply(&state, &first.update), Some(&steps));
        prop_assert_eq!(first, again);
    }

    // Invariant 5: next always makes progress until the end
    #[test]
    fn prop_next_always_advances(steps in arb_steps(), index in 0usize..8) {
        prop_assume!(index < steps.len());
        let state = NavigatorState { step_index: index, last_step_text: None };
        let result = transition(Intent::Next, &state, Some(&steps));
        prop_assert_eq!(result.update.step_index, Some(index + 1));
        match result.narration {
            Narration::Step(text) => {
                prop_assert!(text.starts_with("Étape "));
                prop_assert_eq!(result.update.last_step_text, Some(text));
            }
            Narration::Unreadable => prop_assert_eq!(result.update.last_step_text, None),
            other => prop_assert!(false, "Unexpected narration: {:?}", other),
        }
    }

    // Invariant 6: no steps means no writes. Everything but a cached repeat
    // says there is no recipe.
    #[test]
    fn prop_no_recipe_never_mutates(intent in arb_intent(), state in arb_state()) {
        let result = transition(intent, &state, None);
        prop_assert!(result.update.is_empty());
        if intent != Intent::Repeat || state.last_step_text.is_none() {
            prop_assert_eq!(result.narration, Narration::NoRecipe);
        }
    }
}
