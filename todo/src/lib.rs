//! A pending/completed todo list built on the Todoflow reducer architecture.
//!
//! Todos are added to the end of the pending list, completed to the front of
//! the completed list, restored to the front of the pending list, and deleted
//! from wherever they are. Ids start at 1 and are never reused. Everything
//! lives in memory for one session.
//!
//! - [`TodoStore`]: the owner of all todo state, with `add`, `complete`,
//!   `undo` and `delete`
//! - [`TodoReducer`]: the transition rules behind the store
//! - [`screens`]: terminal Home, Details and Add screens
//! - [`config`]: environment-based configuration
//!
//! # Quick Start
//!
//! ```
//! use todoflow::{TimestampFormat, TodoStore};
//!
//! let mut todos = TodoStore::with_system_clock(TimestampFormat::utc());
//! let milk = todos.add("Buy milk", "2%");
//! let docs = todos.add("Write documentation", "");
//!
//! todos.complete(milk).expect("milk is pending");
//! todos.undo(milk).expect("milk is completed");
//!
//! let pending: Vec<_> = todos.pending().iter().map(|t| t.id).collect();
//! assert_eq!(pending, vec![milk, docs]);
//! ```

pub mod config;
pub mod error;
pub mod reducer;
pub mod screens;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, ConfigError, TimestampFormat};
pub use error::TodoError;
pub use reducer::{TodoEnvironment, TodoReducer};
pub use store::{Intent, TodoStore};
pub use types::{Collection, TodoAction, TodoId, TodoRecord, TodoState};
