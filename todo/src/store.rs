//! The todo store: the one owner of todo state.
//!
//! [`TodoStore`] wraps the runtime [`Store`] with direct methods for the four
//! transitions. UI code reads the lists through it and reports what the user
//! asked for as an [`Intent`].

use crate::config::TimestampFormat;
use crate::error::TodoError;
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{TodoAction, TodoId, TodoRecord, TodoState};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use todoflow_core::environment::SystemClock;
use todoflow_runtime::Store;

/// Something the user asked for on a screen
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "kebab-case")]
pub enum Intent {
    /// The add form was submitted
    SubmitAdd {
        /// Entered title
        title: String,
        /// Entered description
        description: String,
    },
    /// The delete button was pressed on a todo
    RequestDelete {
        /// Todo to delete
        id: TodoId,
    },
    /// A pending todo was marked done
    RequestComplete {
        /// Todo to complete
        id: TodoId,
    },
    /// A done todo was marked not done
    RequestUndo {
        /// Todo to restore
        id: TodoId,
    },
}

/// Owner of the pending and completed todo lists
///
/// # Example
///
/// ```
/// use todoflow::{TodoError, TodoStore, TimestampFormat};
///
/// let mut todos = TodoStore::with_system_clock(TimestampFormat::utc());
/// let id = todos.add("Buy milk", "2%");
///
/// todos.complete(id)?;
/// assert_eq!(todos.completed()[0].title, "Buy milk");
///
/// todos.delete(id);
/// assert!(matches!(todos.complete(id), Err(TodoError::NotFound { .. })));
/// # Ok::<(), TodoError>(())
/// ```
pub struct TodoStore {
    inner: Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>,
}

impl TodoStore {
    /// Creates an empty store
    #[must_use]
    pub fn new(env: TodoEnvironment) -> Self {
        Self::with_state(TodoState::new(), env)
    }

    /// Creates a store from existing state
    #[must_use]
    pub const fn with_state(state: TodoState, env: TodoEnvironment) -> Self {
        Self {
            inner: Store::new(state, TodoReducer::new(), env),
        }
    }

    /// Creates an empty store that stamps todos with the system time
    #[must_use]
    pub fn with_system_clock(timestamps: TimestampFormat) -> Self {
        Self::new(TodoEnvironment::new(Rc::new(SystemClock), timestamps))
    }

    /// Adds a todo at the end of the pending list and returns its id
    ///
    /// The `created` timestamp is taken now. Empty text is accepted.
    ///
    /// Ids only run out for a store rebuilt from state whose counter sits at
    /// `u64::MAX`. The todo is then not stored and the error is logged.
    pub fn add(&mut self, title: impl Into<String>, description: impl Into<String>) -> TodoId {
        let id = self.inner.state(TodoState::next_id);
        if let Err(error) = self.inner.send(TodoAction::Add {
            title: title.into(),
            description: description.into(),
        }) {
            tracing::error!(%id, %error, "todo was not added");
        }
        id
    }

    /// Marks a pending todo done and moves it to the front of the completed list
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] if `id` is not pending. Nothing changes.
    pub fn complete(&mut self, id: TodoId) -> Result<(), TodoError> {
        self.inner.send(TodoAction::Complete { id }).map(drop)
    }

    /// Marks a done todo not done and moves it to the front of the pending list
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] if `id` is not completed. Nothing changes.
    pub fn undo(&mut self, id: TodoId) -> Result<(), TodoError> {
        self.inner.send(TodoAction::Undo { id }).map(drop)
    }

    /// Deletes a todo from whichever list holds it
    ///
    /// Returns `false` if no todo had that id; that is not an error.
    pub fn delete(&mut self, id: TodoId) -> bool {
        self.inner
            .send(TodoAction::Delete { id })
            .is_ok_and(|published| !published.is_empty())
    }

    /// Applies an intent coming from a screen
    ///
    /// Returns the new id for [`Intent::SubmitAdd`], `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] when completing or undoing a todo that
    /// is not in the expected list.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Option<TodoId>, TodoError> {
        tracing::debug!(?intent, "dispatching intent");
        match intent {
            Intent::SubmitAdd { title, description } => Ok(Some(self.add(title, description))),
            Intent::RequestDelete { id } => {
                self.delete(id);
                Ok(None)
            },
            Intent::RequestComplete { id } => self.complete(id).map(|()| None),
            Intent::RequestUndo { id } => self.undo(id).map(|()| None),
        }
    }

    /// Registers an observer for every todo event
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&TodoAction) + 'static,
    {
        self.inner.subscribe(listener);
    }

    /// Todos not yet done
    #[must_use]
    pub fn pending(&self) -> &[TodoRecord] {
        self.inner.state_ref().pending()
    }

    /// Done todos, newest first
    #[must_use]
    pub fn completed(&self) -> &[TodoRecord] {
        self.inner.state_ref().completed()
    }

    /// Looks a todo up in either list
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoRecord> {
        self.inner.state_ref().get(id)
    }

    /// Total number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.state(TodoState::len)
    }

    /// Returns `true` if there are no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.state(TodoState::is_empty)
    }

    /// Number of done todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.inner.state(TodoState::completed_count)
    }

    /// The whole state, for rendering or serialization
    #[must_use]
    pub const fn state(&self) -> &TodoState {
        self.inner.state_ref()
    }
}
