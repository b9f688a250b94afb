//! Metrics for store activity.
//!
//! Counters are recorded through the `metrics` facade. Nothing is exported
//! unless the host application installs a recorder; without one every call
//! is a no-op.

use metrics::{counter, describe_counter};

/// Total actions sent to any store.
pub const ACTIONS_TOTAL: &str = "store_actions_total";

/// Actions a reducer rejected.
pub const ACTIONS_REJECTED_TOTAL: &str = "store_actions_rejected_total";

/// Actions delivered to subscribers through `Effect::Publish`.
pub const ACTIONS_PUBLISHED_TOTAL: &str = "store_actions_published_total";

/// Register all metric descriptions.
///
/// Call once after installing a recorder so exporters can show help text.
pub fn register_metrics() {
    describe_counter!(ACTIONS_TOTAL, "Total number of actions sent to stores");
    describe_counter!(
        ACTIONS_REJECTED_TOTAL,
        "Total number of actions rejected by reducers"
    );
    describe_counter!(
        ACTIONS_PUBLISHED_TOTAL,
        "Total number of actions published to store subscribers"
    );
}

/// Store metrics recorder.
pub struct StoreMetrics;

impl StoreMetrics {
    /// Record an action entering the store.
    pub fn record_action() {
        counter!(ACTIONS_TOTAL).increment(1);
    }

    /// Record a rejected action.
    pub fn record_rejection() {
        counter!(ACTIONS_REJECTED_TOTAL).increment(1);
    }

    /// Record a published action.
    pub fn record_publish() {
        counter!(ACTIONS_PUBLISHED_TOTAL).increment(1);
    }
}
