//! Property-based tests for the todo store.
//!
//! Random sequences of intents must never break the list invariants.

#![allow(clippy::unwrap_used)] // Test code can unwrap

use proptest::prelude::*;
use std::collections::HashSet;
use std::rc::Rc;
use todoflow::{Intent, TimestampFormat, TodoEnvironment, TodoError, TodoId, TodoStore};
use todoflow_testing::test_clock;

fn store() -> TodoStore {
    TodoStore::new(TodoEnvironment::new(
        Rc::new(test_clock()),
        TimestampFormat::utc(),
    ))
}

/// Intents over a small id range so that hits and misses both happen
fn intent() -> impl Strategy<Value = Intent> {
    let id = (1_u64..12).prop_map(TodoId::new);
    prop_oneof![
        ("[a-z ]{0,8}", "[a-z\n]{0,8}").prop_map(|(title, description)| {
            Intent::SubmitAdd { title, description }
        }),
        id.clone().prop_map(|id| Intent::RequestComplete { id }),
        id.clone().prop_map(|id| Intent::RequestUndo { id }),
        id.prop_map(|id| Intent::RequestDelete { id }),
    ]
}

proptest! {
    #[test]
    fn prop_add_ids_count_up_from_one(count in 1_usize..40) {
        let mut todos = store();
        for expected in 1..=count as u64 {
            prop_assert_eq!(todos.add("t", ""), TodoId::new(expected));
        }
    }

    #[test]
    fn prop_invariants_hold_after_every_intent(intents in prop::collection::vec(intent(), 0..60)) {
        let mut todos = store();
        let mut issued = Vec::new();

        for intent in intents {
            let before = todos.state().clone();
            match todos.dispatch(intent) {
                Ok(Some(id)) => issued.push(id),
                Ok(None) => {}
                Err(TodoError::NotFound { .. }) => prop_assert_eq!(todos.state(), &before),
                Err(other) => prop_assert!(false, "unexpected error {}", other),
            }

            prop_assert!(todos.state().is_consistent());

            let pending: HashSet<_> = todos.pending().iter().map(|r| r.id).collect();
            let completed: HashSet<_> = todos.completed().iter().map(|r| r.id).collect();
            prop_assert!(pending.is_disjoint(&completed));
            prop_assert!(todos.pending().iter().all(|r| !r.done));
            prop_assert!(todos.completed().iter().all(|r| r.done));
        }

        // Ids are handed out once, in order
        let expected: Vec<_> = (1..=issued.len() as u64).map(TodoId::new).collect();
        prop_assert_eq!(issued, expected);
    }

    #[test]
    fn prop_complete_then_undo_restores_front(pending_count in 1_usize..10, pick in 0_usize..10) {
        let mut todos = store();
        let ids: Vec<_> = (0..pending_count).map(|n| todos.add(format!("t{n}"), "")).collect();
        let id = ids[pick % pending_count];

        todos.complete(id).unwrap();
        todos.undo(id).unwrap();

        prop_assert_eq!(todos.pending()[0].id, id);
        prop_assert!(!todos.pending()[0].done);
        prop_assert_eq!(todos.pending().len(), pending_count);
    }

    #[test]
    fn prop_delete_is_idempotent(count in 1_usize..8, pick in 0_usize..8, complete_first in any::<bool>()) {
        let mut todos = store();
        let ids: Vec<_> = (0..count).map(|_| todos.add("t", "")).collect();
        let id = ids[pick % count];
        if complete_first {
            todos.complete(id).unwrap();
        }

        prop_assert!(todos.delete(id));
        let after_first = todos.state().clone();
        prop_assert!(!todos.delete(id));
        prop_assert_eq!(todos.state(), &after_first);
        prop_assert_eq!(todos.len(), count - 1);
    }
}
