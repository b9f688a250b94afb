//! Domain types for the todo list.
//!
//! A todo lives in exactly one of two ordered collections: `pending` or
//! `completed`. The `done` flag on each record mirrors that membership.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a todo, assigned by the store starting at 1
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// The first identifier a fresh store hands out
    pub const FIRST: Self = Self(1);

    /// Creates a `TodoId` from its numeric value
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the identifier that follows this one, or `None` at the top
    /// of the id range
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two collections a todo can belong to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// Not yet done, shown first
    Pending,
    /// Done, shown under the completed heading
    Completed,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    /// Unique identifier, never reused
    pub id: TodoId,
    /// Title shown in the list
    pub title: String,
    /// Free text, may span several lines
    pub description: String,
    /// Display timestamp captured when the todo was added
    pub created: String,
    /// Whether the todo sits in the completed collection
    pub done: bool,
}

impl TodoRecord {
    /// Creates a new pending todo
    #[must_use]
    pub const fn new(id: TodoId, title: String, description: String, created: String) -> Self {
        Self {
            id,
            title,
            description,
            created,
            done: false,
        }
    }

    /// Rebuilds the record with a new `done` flag
    #[must_use]
    pub fn with_done(self, done: bool) -> Self {
        Self { done, ..self }
    }
}

/// State of the todo list
///
/// Mutation goes through the reducer only; everything public here is
/// read-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TodoState {
    pending: Vec<TodoRecord>,
    completed: Vec<TodoRecord>,
    next_id: TodoId,
}

impl Default for TodoState {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoState {
    /// Creates an empty list whose first todo will get id 1
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
            completed: Vec::new(),
            next_id: TodoId::FIRST,
        }
    }

    /// Todos not yet done, in display order
    #[must_use]
    pub fn pending(&self) -> &[TodoRecord] {
        &self.pending
    }

    /// Done todos, most recently completed first
    #[must_use]
    pub fn completed(&self) -> &[TodoRecord] {
        &self.completed
    }

    /// The id the next added todo will receive
    #[must_use]
    pub const fn next_id(&self) -> TodoId {
        self.next_id
    }

    /// Total number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len() + self.completed.len()
    }

    /// Returns `true` if there are no todos at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.completed.is_empty()
    }

    /// Number of done todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Returns a todo by id from either collection
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoRecord> {
        self.pending
            .iter()
            .chain(&self.completed)
            .find(|record| record.id == id)
    }

    /// Returns which collection holds `id`, pending first
    #[must_use]
    pub fn locate(&self, id: TodoId) -> Option<Collection> {
        if self.position(Collection::Pending, id).is_some() {
            Some(Collection::Pending)
        } else if self.position(Collection::Completed, id).is_some() {
            Some(Collection::Completed)
        } else {
            None
        }
    }

    /// Index of `id` inside `collection`
    #[must_use]
    pub fn position(&self, collection: Collection, id: TodoId) -> Option<usize> {
        self.records(collection)
            .iter()
            .position(|record| record.id == id)
    }

    /// Checks that no id appears twice, every `done` flag matches its
    /// collection, and every id is below `next_id`
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        let flags_match = self.pending.iter().all(|record| !record.done)
            && self.completed.iter().all(|record| record.done);

        flags_match
            && self
                .pending
                .iter()
                .chain(&self.completed)
                .all(|record| record.id < self.next_id && seen.insert(record.id))
    }

    fn records(&self, collection: Collection) -> &Vec<TodoRecord> {
        match collection {
            Collection::Pending => &self.pending,
            Collection::Completed => &self.completed,
        }
    }

    fn records_mut(&mut self, collection: Collection) -> &mut Vec<TodoRecord> {
        match collection {
            Collection::Pending => &mut self.pending,
            Collection::Completed => &mut self.completed,
        }
    }

    /// Appends a new record to the end of `pending` and moves the id
    /// counter past it
    ///
    /// `next_id` must follow `record.id`, which must not have been handed out.
    pub(crate) fn append_pending(&mut self, record: TodoRecord, next_id: TodoId) {
        debug_assert!(record.id >= self.next_id && next_id > record.id);
        self.next_id = next_id;
        self.pending.push(record);
    }

    /// Removes `id` from `collection` and returns it
    pub(crate) fn take(&mut self, collection: Collection, id: TodoId) -> Option<TodoRecord> {
        let index = self.position(collection, id)?;
        Some(self.records_mut(collection).remove(index))
    }

    /// Inserts a record at the front of `collection`
    pub(crate) fn push_front(&mut self, collection: Collection, record: TodoRecord) {
        self.records_mut(collection).insert(0, record);
    }
}

/// Actions representing commands and events for todos
///
/// Commands express what a user asked for. The reducer validates them and
/// publishes the matching event. Sending an event directly re-applies it,
/// which is how a recorded session can be replayed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Command: Add a new todo at the end of the pending list
    Add {
        /// Title of the todo
        title: String,
        /// Description of the todo
        description: String,
    },

    /// Command: Move a pending todo to the front of the completed list
    Complete {
        /// Todo to complete
        id: TodoId,
    },

    /// Command: Move a completed todo back to the front of the pending list
    Undo {
        /// Todo to restore
        id: TodoId,
    },

    /// Command: Remove a todo from whichever list holds it
    Delete {
        /// Todo to delete
        id: TodoId,
    },

    // ========== Events ==========
    /// Event: Todo was added
    TodoAdded {
        /// The new record, including its assigned id
        record: TodoRecord,
    },

    /// Event: Todo was completed
    TodoCompleted {
        /// Todo identifier
        id: TodoId,
    },

    /// Event: Completed todo was moved back to pending
    TodoRestored {
        /// Todo identifier
        id: TodoId,
    },

    /// Event: Todo was deleted
    TodoDeleted {
        /// Todo identifier
        id: TodoId,
        /// Where the todo was removed from
        from: Collection,
    },
}

impl TodoAction {
    /// Returns `true` for actions that express user intent
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(
            self,
            Self::Add { .. } | Self::Complete { .. } | Self::Undo { .. } | Self::Delete { .. }
        )
    }

    /// Returns `true` for actions that record something that happened
    #[must_use]
    pub const fn is_event(&self) -> bool {
        !self.is_command()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, title: &str) -> TodoRecord {
        TodoRecord::new(
            TodoId::new(id),
            title.to_string(),
            String::new(),
            "2025-01-01 00:00:00".to_string(),
        )
    }

    #[test]
    fn todo_id_display() {
        assert_eq!(TodoId::new(42).to_string(), "42");
        assert_eq!(TodoId::FIRST.next(), Some(TodoId::new(2)));
    }

    #[test]
    fn todo_id_next_stops_at_top_of_range() {
        assert_eq!(TodoId::new(u64::MAX).next(), None);
        assert_eq!(TodoId::new(u64::MAX - 1).next(), Some(TodoId::new(u64::MAX)));
    }

    #[test]
    fn todo_record_new_is_pending() {
        let item = record(1, "Test todo");

        assert_eq!(item.id, TodoId::FIRST);
        assert_eq!(item.title, "Test todo");
        assert!(!item.done);
    }

    #[test]
    fn with_done_keeps_everything_else() {
        let item = record(3, "Walk dog");
        let done = item.clone().with_done(true);

        assert!(done.done);
        assert_eq!(done.id, item.id);
        assert_eq!(done.created, item.created);
        assert_eq!(done.clone().with_done(false), item);
    }

    #[test]
    fn append_moves_counter_and_keeps_order() {
        let mut state = TodoState::new();
        state.append_pending(record(1, "A"), TodoId::new(2));
        state.append_pending(record(2, "B"), TodoId::new(3));

        assert_eq!(state.next_id(), TodoId::new(3));
        assert_eq!(state.pending()[0].title, "A");
        assert_eq!(state.pending()[1].title, "B");
        assert!(state.is_consistent());
    }

    #[test]
    fn take_and_push_front() {
        let mut state = TodoState::new();
        state.append_pending(record(1, "A"), TodoId::new(2));
        state.append_pending(record(2, "B"), TodoId::new(3));

        let taken = state.take(Collection::Pending, TodoId::new(2));
        assert_eq!(taken.as_ref().map(|r| r.id), Some(TodoId::new(2)));
        assert_eq!(state.take(Collection::Pending, TodoId::new(2)), None);

        if let Some(taken) = taken {
            state.push_front(Collection::Completed, taken.with_done(true));
        }
        assert_eq!(state.locate(TodoId::new(2)), Some(Collection::Completed));
        assert_eq!(state.locate(TodoId::new(1)), Some(Collection::Pending));
        assert_eq!(state.locate(TodoId::new(9)), None);
        assert_eq!(state.completed_count(), 1);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn inconsistent_flag_is_detected() {
        let mut state = TodoState::new();
        state.append_pending(record(1, "A").with_done(true), TodoId::new(2));

        assert!(!state.is_consistent());
    }

    #[test]
    fn duplicate_id_is_detected() {
        let mut state = TodoState::new();
        state.append_pending(record(1, "A"), TodoId::new(2));
        state.push_front(Collection::Completed, record(1, "A").with_done(true));

        assert!(!state.is_consistent());
    }

    #[test]
    fn todo_action_kinds() {
        assert!(TodoAction::Complete { id: TodoId::FIRST }.is_command());
        assert!(TodoAction::TodoCompleted { id: TodoId::FIRST }.is_event());
        assert!(!TodoAction::TodoDeleted {
            id: TodoId::FIRST,
            from: Collection::Pending
        }
        .is_command());
    }
}
