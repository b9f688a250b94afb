//! Reducer logic for the todo list.
//!
//! Commands are validated against the current state, turned into an event,
//! applied, and the event is published for subscribers. Sending an event
//! directly only applies it.

use crate::config::TimestampFormat;
use crate::error::TodoError;
use crate::types::{Collection, TodoAction, TodoId, TodoRecord, TodoState};
use std::rc::Rc;
use todoflow_core::{
    SmallVec, effect::Effect, environment::Clock, reducer::Reducer, smallvec,
};

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for the `created` timestamp
    pub clock: Rc<dyn Clock>,
    /// How the timestamp is rendered
    pub timestamps: TimestampFormat,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(clock: Rc<dyn Clock>, timestamps: TimestampFormat) -> Self {
        Self { clock, timestamps }
    }

    /// Current time, formatted for display
    #[must_use]
    pub fn created_now(&self) -> String {
        self.timestamps.format(self.clock.now())
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment")
            .field("clock", &"<clock>")
            .field("timestamps", &self.timestamps)
            .finish()
    }
}

/// Reducer for the todo list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Checks that `id` is in `collection`
    fn require(state: &TodoState, collection: Collection, id: TodoId) -> Result<(), TodoError> {
        match state.position(collection, id) {
            Some(_) => Ok(()),
            None => Err(TodoError::NotFound { id, collection }),
        }
    }

    /// Moves `id` from the front of one collection to the other, rebuilding
    /// the record with the flag that matches its new home
    fn transfer(
        state: &mut TodoState,
        id: TodoId,
        from: Collection,
        to: Collection,
    ) -> Result<(), TodoError> {
        let record = state
            .take(from, id)
            .ok_or(TodoError::NotFound { id, collection: from })?;
        state.push_front(to, record.with_done(to == Collection::Completed));
        Ok(())
    }

    /// Applies an event to state
    ///
    /// Either the whole event applies or the state is left untouched.
    fn apply_event(state: &mut TodoState, action: &TodoAction) -> Result<(), TodoError> {
        match action {
            TodoAction::TodoAdded { record } => {
                // Ids below the counter were handed out before, even if deleted since
                if record.id < state.next_id() {
                    return Err(TodoError::DuplicateId { id: record.id });
                }
                let next_id = record
                    .id
                    .next()
                    .ok_or(TodoError::IdsExhausted { id: record.id })?;
                state.append_pending(record.clone().with_done(false), next_id);
            },
            TodoAction::TodoCompleted { id } => {
                Self::transfer(state, *id, Collection::Pending, Collection::Completed)?;
            },
            TodoAction::TodoRestored { id } => {
                Self::transfer(state, *id, Collection::Completed, Collection::Pending)?;
            },
            TodoAction::TodoDeleted { id, from } => {
                state.take(*from, *id).ok_or(TodoError::NotFound {
                    id: *id,
                    collection: *from,
                })?;
            },
            // Commands are not applied to state
            TodoAction::Add { .. }
            | TodoAction::Complete { .. }
            | TodoAction::Undo { .. }
            | TodoAction::Delete { .. } => {},
        }

        debug_assert!(state.is_consistent(), "todo state became inconsistent");
        Ok(())
    }

    /// Applies the event a command produced and publishes it
    fn commit(
        state: &mut TodoState,
        event: TodoAction,
    ) -> Result<SmallVec<[Effect<TodoAction>; 4]>, TodoError> {
        Self::apply_event(state, &event)?;
        tracing::debug!(?event, "todo event applied");
        Ok(smallvec![Effect::Publish(event)])
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;
    type Error = TodoError;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Result<SmallVec<[Effect<Self::Action>; 4]>, Self::Error> {
        match action {
            // ========== Commands ==========
            TodoAction::Add { title, description } => {
                let record =
                    TodoRecord::new(state.next_id(), title, description, env.created_now());
                Self::commit(state, TodoAction::TodoAdded { record })
            },

            TodoAction::Complete { id } => {
                Self::require(state, Collection::Pending, id)?;
                Self::commit(state, TodoAction::TodoCompleted { id })
            },

            TodoAction::Undo { id } => {
                Self::require(state, Collection::Completed, id)?;
                Self::commit(state, TodoAction::TodoRestored { id })
            },

            TodoAction::Delete { id } => match state.locate(id) {
                Some(from) => Self::commit(state, TodoAction::TodoDeleted { id, from }),
                None => {
                    tracing::debug!(%id, "delete of unknown todo ignored");
                    Ok(smallvec![Effect::None])
                },
            },

            // ========== Events ==========
            TodoAction::TodoAdded { .. }
            | TodoAction::TodoCompleted { .. }
            | TodoAction::TodoRestored { .. }
            | TodoAction::TodoDeleted { .. } => {
                Self::apply_event(state, &action)?;
                Ok(SmallVec::new())
            },
        }
    }
}
