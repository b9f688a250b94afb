//! # Todoflow Core
//!
//! Core traits and types for the Todoflow reducer architecture.
//!
//! A feature is described by four pieces:
//!
//! - **State**: owned domain data
//! - **Action**: every input a reducer accepts (commands and the events they produce)
//! - **Reducer**: `(State, Action, Environment) → Result<Effects, Error>`
//! - **Effect**: a description of what should happen after the state changed
//!
//! Reducers never perform I/O. Anything that depends on the outside world
//! (the current time, for instance) is injected through the environment.
//!
//! ## Example
//!
//! ```
//! use todoflow_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: u32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//!     Incremented { count: u32 },
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!     type Error = std::convert::Infallible;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> Result<SmallVec<[Effect<CounterAction>; 4]>, Self::Error> {
//!         match action {
//!             CounterAction::Increment => {
//!                 state.count += 1;
//!                 Ok(smallvec![Effect::Publish(CounterAction::Incremented {
//!                     count: state.count,
//!                 })])
//!             }
//!             CounterAction::Incremented { .. } => Ok(SmallVec::new()),
//!         }
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - The core trait for business logic
///
/// Reducers validate an action against the current state, mutate the state
/// in place, and describe follow-up work as effects.
pub mod reducer {
    use super::SmallVec;
    use super::effect::Effect;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    /// - `Error`: Why an action was rejected
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// The error returned when an action is rejected
        type Error;

        /// Reduce an action into state changes and effects
        ///
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed by the store
        ///
        /// # Errors
        ///
        /// Returns `Self::Error` when the action is not valid for the current
        /// state. Implementations must leave the state untouched in that case.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Result<SmallVec<[Effect<Self::Action>; 4]>, Self::Error>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects are values, not execution. The store decides how to run them.
pub mod effect {
    /// Effect type - describes work to do after a reducer ran
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type effects carry
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Deliver an action to every store subscriber
        ///
        /// Reducers publish the event a command produced so observers
        /// (screens, logs, tests) learn what happened.
        Publish(Action),

        /// Run effects in order
        Sequential(Vec<Effect<Action>>),
    }

    impl<Action> Effect<Action> {
        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Returns `true` if this effect does nothing when executed
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Publish(_) => false,
                Effect::Sequential(effects) => effects.iter().all(Effect::is_none),
            }
        }

        /// Flatten this effect into the actions it publishes, in order
        #[must_use]
        pub fn published(&self) -> Vec<&Action> {
            match self {
                Effect::None => Vec::new(),
                Effect::Publish(action) => vec![action],
                Effect::Sequential(effects) => {
                    effects.iter().flat_map(Effect::published).collect()
                },
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Test - fixed time for deterministic tests
    /// struct FixedClock { time: DateTime<Utc> }
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         self.time
    ///     }
    /// }
    /// ```
    pub trait Clock {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;
    use super::environment::{Clock, SystemClock};

    #[test]
    fn effect_none_is_none() {
        assert!(Effect::<u8>::None.is_none());
        assert!(Effect::<u8>::chain(vec![Effect::None, Effect::None]).is_none());
        assert!(!Effect::Publish(1_u8).is_none());
    }

    #[test]
    fn effect_published_flattens_in_order() {
        let effect = Effect::chain(vec![
            Effect::Publish(1_u8),
            Effect::None,
            Effect::chain(vec![Effect::Publish(2), Effect::Publish(3)]),
        ]);

        assert_eq!(effect.published(), vec![&1, &2, &3]);
    }

    #[test]
    fn system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
