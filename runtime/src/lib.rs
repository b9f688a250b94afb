//! # Todoflow Runtime
//!
//! Runtime implementation for the Todoflow reducer architecture.
//!
//! This crate provides the [`Store`] that owns a feature's state, runs its
//! reducer and executes the effects the reducer returns.
//!
//! ## Core Components
//!
//! - **Store**: Owns state, reducer and environment; the only place state changes
//! - **Effect execution**: Delivers published actions to subscribers, in order
//! - **Metrics**: Action and effect counters recorded through the `metrics` facade
//!
//! The store is synchronous. Every `send` runs to completion before it
//! returns, so callers observe the new state immediately.
//!
//! ## Example
//!
//! ```ignore
//! use todoflow_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action; published actions come back to the caller
//! let published = store.send(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

use todoflow_core::{effect::Effect, reducer::Reducer};

/// Counters for store activity
pub mod metrics;

pub use store::Store;

/// The Store module
pub mod store {
    use super::metrics::StoreMetrics;
    use super::{Effect, Reducer};

    /// Observer callback registered with [`Store::subscribe`]
    type Subscriber<A> = Box<dyn FnMut(&A)>;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (exclusively owned, mutated only by the reducer)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (published actions go to subscribers)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: S,
        reducer: R,
        environment: E,
        subscribers: Vec<Subscriber<A>>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        R::Error: std::fmt::Display,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub const fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                subscribers: Vec::new(),
            }
        }

        /// Send an action through the reducer and execute its effects
        ///
        /// Returns every action published by the resulting effects, in the
        /// order subscribers saw them.
        ///
        /// # Errors
        ///
        /// Returns the reducer's error when the action is rejected. The state
        /// is left as it was and no subscriber is notified.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&mut self, action: A) -> Result<Vec<A>, R::Error> {
            StoreMetrics::record_action();

            let effects = match self
                .reducer
                .reduce(&mut self.state, action, &self.environment)
            {
                Ok(effects) => effects,
                Err(error) => {
                    StoreMetrics::record_rejection();
                    tracing::warn!(%error, "action rejected");
                    return Err(error);
                },
            };

            let mut published = Vec::new();
            for effect in effects {
                self.execute(effect, &mut published);
            }

            tracing::trace!(published = published.len(), "action processed");
            Ok(published)
        }

        fn execute(&mut self, effect: Effect<A>, published: &mut Vec<A>) {
            match effect {
                Effect::None => {},
                Effect::Publish(action) => {
                    StoreMetrics::record_publish();
                    for subscriber in &mut self.subscribers {
                        subscriber(&action);
                    }
                    published.push(action);
                },
                Effect::Sequential(effects) => {
                    for effect in effects {
                        self.execute(effect, published);
                    }
                },
            }
        }

        /// Register an observer for every published action
        pub fn subscribe<F>(&mut self, subscriber: F)
        where
            F: FnMut(&A) + 'static,
        {
            self.subscribers.push(Box::new(subscriber));
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let order_count = store.state(|s| s.orders.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.state)
        }

        /// Borrow the current state
        #[must_use]
        pub const fn state_ref(&self) -> &S {
            &self.state
        }

        /// Borrow the injected environment
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// Consume the store and return its final state
        #[must_use]
        pub fn into_state(self) -> S {
            self.state
        }
    }
}
