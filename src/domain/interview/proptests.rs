//! Property-based tests for the interview flow
//!
//! These tests verify key invariants hold across arbitrary turn sequences.

use super::*;
use crate::domain::foundation::{QuestionId, SessionId, Timestamp};
use proptest::prelude::*;
use std::collections::HashSet;

// ============================================================================
// Arbitrary Generators
// ============================================================================

#[derive(Debug, Clone)]
enum Action {
    /// Pick the n-th option (modulo), or type text on free-text questions.
    Pick(usize),
    Skip,
    Garbage(String),
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (0usize..8).prop_map(Action::Pick),
        2 => Just(Action::Skip),
        1 => "[a-z]{0,6}".prop_map(Action::Garbage),
    ]
}

fn message_for(action: &Action, state: &ConversationState, catalog: &QuestionCatalog) -> String {
    match action {
        Action::Pick(n) => {
            let question = state
                .current_question_id()
                .and_then(|id| catalog.get(id));
            match question {
                Some(q) if q.kind() == QuestionKind::Choice => {
                    let options = q.option_list();
                    options[n % options.len()].clone()
                }
                _ => format!("answer {}", n),
            }
        }
        Action::Skip => "skip".to_string(),
        Action::Garbage(s) => s.clone(),
    }
}

fn assert_disjoint_buckets(state: &ConversationState) -> Result<(), TestCaseError> {
    let deferred: HashSet<&QuestionId> = state.deferred.iter().collect();
    let dismissed: HashSet<&QuestionId> = state.dismissed.iter().collect();
    prop_assert_eq!(deferred.len(), state.deferred.len(), "deferred has duplicates");
    for id in state.answers.keys() {
        prop_assert!(!deferred.contains(id) && !dismissed.contains(id));
    }
    prop_assert!(deferred.is_disjoint(&dismissed));
    if let Some(current) = state.current_question_id() {
        prop_assert!(!deferred.contains(current), "current question is still deferred");
        prop_assert!(!state.answers.contains_key(current));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_progress_is_bounded(actions in proptest::collection::vec(arb_action(), 0..40)) {
        let catalog = QuestionCatalog::builtin();
        let mut state = ConversationState::new(SessionId::generate(), &catalog, Timestamp::now());

        for action in actions {
            let msg = message_for(&action, &state, &catalog);
            if let Ok(result) = transition(&state, &catalog, TurnInput::parse(msg), Timestamp::now()) {
                prop_assert!(result.reply.progress.current <= result.reply.progress.total);
                prop_assert_eq!(result.reply.progress.total, catalog.required_count());
                state = result.new_state;
            }
        }
    }

    #[test]
    fn prop_answers_only_for_presented_questions(actions in proptest::collection::vec(arb_action(), 0..40)) {
        let catalog = QuestionCatalog::builtin();
        let mut state = ConversationState::new(SessionId::generate(), &catalog, Timestamp::now());
        let mut presented: HashSet<QuestionId> = HashSet::new();
        presented.insert(catalog.first().id.clone());

        for action in actions {
            let msg = message_for(&action, &state, &catalog);
            if let Ok(result) = transition(&state, &catalog, TurnInput::parse(msg), Timestamp::now()) {
                state = result.new_state;
                if let Some(id) = state.current_question_id() {
                    presented.insert(id.clone());
                }
            }
            for id in state.answers.keys() {
                prop_assert!(presented.contains(id), "{} answered but never presented", id);
            }
            assert_disjoint_buckets(&state)?;
        }
    }

    #[test]
    fn prop_rejected_turns_do_not_change_state(actions in proptest::collection::vec(arb_action(), 0..30)) {
        let catalog = QuestionCatalog::builtin();
        let mut state = ConversationState::new(SessionId::generate(), &catalog, Timestamp::now());

        for action in actions {
            let msg = message_for(&action, &state, &catalog);
            match transition(&state, &catalog, TurnInput::parse(msg), Timestamp::now()) {
                Ok(result) => state = result.new_state,
                Err(FlowError::InvalidAnswer { question_id, .. }) => {
                    prop_assert_eq!(Some(&question_id), state.current_question_id());
                }
                Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
            }
        }
    }

    #[test]
    fn prop_completion_is_terminal(actions in proptest::collection::vec(arb_action(), 0..40)) {
        let catalog = QuestionCatalog::builtin();
        let mut state = ConversationState::new(SessionId::generate(), &catalog, Timestamp::now());

        for action in actions {
            let was_completed = state.is_completed();
            let before = state.clone();
            let msg = message_for(&action, &state, &catalog);
            if let Ok(result) = transition(&state, &catalog, TurnInput::parse(msg), Timestamp::now()) {
                if was_completed {
                    prop_assert!(!result.changed);
                    prop_assert_eq!(&result.new_state, &before);
                }
                state = result.new_state;
            }
        }
    }

    #[test]
    fn prop_valid_answers_always_finish(actions in proptest::collection::vec(arb_action(), 0..30)) {
        let catalog = QuestionCatalog::builtin();
        let mut state = ConversationState::new(SessionId::generate(), &catalog, Timestamp::now());

        for action in actions {
            let msg = message_for(&action, &state, &catalog);
            if let Ok(result) = transition(&state, &catalog, TurnInput::parse(msg), Timestamp::now()) {
                state = result.new_state;
            }
        }

        // Answering whatever is asked must finish within one pass over the catalog.
        for _ in 0..catalog.len() {
            if state.is_completed() {
                break;
            }
            let msg = message_for(&Action::Pick(0), &state, &catalog);
            state = transition(&state, &catalog, TurnInput::parse(msg), Timestamp::now())
                .map_err(|e| TestCaseError::fail(e.to_string()))?
                .new_state;
        }
        prop_assert!(state.is_completed());
        let progress = state.progress(&catalog);
        prop_assert_eq!(progress.current, progress.total);
    }
}
