//! Reduction of a profile into proportional-time metrics.
//!
//! This module computes:
//! - The global reference duration (slowest root node)
//! - Percentages and severity tiers relative to it
//! - Per-shard time totals

pub mod metrics;
pub mod reducer;

// Re-export main types and functions
pub use metrics::{
    bar_fill, format_millis, nanos_to_millis, percentage_of, shard_totals, Severity, ShardTotals,
};
pub use reducer::{reference_duration, root_nodes};
