//! Errors returned by todo transitions.

use crate::types::{Collection, TodoId};
use thiserror::Error;

/// Why a todo action was rejected
///
/// Rejected actions leave the list unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// The id is not in the collection the transition moves it out of
    ///
    /// Returned by complete (expects pending) and undo (expects completed).
    /// Deleting an unknown id is not an error.
    #[error("todo {id} not found among {collection} todos")]
    NotFound {
        /// The requested id
        id: TodoId,
        /// The collection that was searched
        collection: Collection,
    },

    /// A replayed `TodoAdded` event carried an id that was already handed
    /// out, whether or not that todo still exists
    #[error("todo id {id} was already handed out")]
    DuplicateId {
        /// The conflicting id
        id: TodoId,
    },

    /// The id is the last one available, so no id could follow it
    #[error("todo id {id} leaves no id for the next todo")]
    IdsExhausted {
        /// The id that has no successor
        id: TodoId,
    },
}
