//! Percentages, severity tiers and per-shard totals.
//!
//! All percentages are relative to the global reference duration
//! computed by `reducer::reference_duration`.

use crate::parser::ShardProfile;
use crate::utils::config::{
    CRITICAL_THRESHOLD_PERCENT, NANOS_PER_MILLI, WARNING_THRESHOLD_PERCENT,
};
use serde::Serialize;
use std::fmt;

/// Percentage of the reference duration
///
/// **Public** - returns 0.0 when the reference is zero instead of
/// dividing by zero. The value is not capped; severity is classified
/// from it, display goes through `bar_fill`.
pub fn percentage_of(time_in_nanos: u64, reference_nanos: u64) -> f64 {
    if reference_nanos == 0 {
        return 0.0;
    }
    (time_in_nanos as f64 / reference_nanos as f64) * 100.0
}

/// Displayed percentage and bar fill, capped at 100
pub fn bar_fill(percentage: f64) -> f64 {
    percentage.clamp(0.0, 100.0)
}

/// Convert nanoseconds to milliseconds
pub fn nanos_to_millis(nanos: u64) -> f64 {
    nanos as f64 / NANOS_PER_MILLI
}

/// Format nanoseconds as milliseconds with three decimals (e.g. "2.000ms")
pub fn format_millis(nanos: u64) -> String {
    format!("{:.3}ms", nanos_to_millis(nanos))
}

/// Visual severity of a proportional bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    /// Classify a percentage (strict thresholds: >50 critical, >20 warning)
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > CRITICAL_THRESHOLD_PERCENT {
            Severity::Critical
        } else if percentage > WARNING_THRESHOLD_PERCENT {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time totals for a single shard (informational, shown in the shard header)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShardTotals {
    /// Sum of root query times over all searches
    pub query_nanos: u64,

    /// Sum of rewrite times over all searches
    pub rewrite_nanos: u64,

    /// Sum of top-level collector times over all searches
    pub collector_nanos: u64,

    /// Sum of root aggregation times
    pub aggregation_nanos: u64,
}

impl ShardTotals {
    pub fn total_nanos(&self) -> u64 {
        self.query_nanos
            .saturating_add(self.rewrite_nanos)
            .saturating_add(self.collector_nanos)
            .saturating_add(self.aggregation_nanos)
    }

    /// Get human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "query {} | rewrite {} | collectors {} | aggs {}",
            format_millis(self.query_nanos),
            format_millis(self.rewrite_nanos),
            format_millis(self.collector_nanos),
            format_millis(self.aggregation_nanos)
        )
    }
}

/// Sum root-level timings for a shard
pub fn shard_totals(shard: &ShardProfile) -> ShardTotals {
    let mut totals = ShardTotals::default();

    for search in &shard.searches {
        for query in &search.query {
            totals.query_nanos = totals.query_nanos.saturating_add(query.time_in_nanos);
        }
        totals.rewrite_nanos = totals.rewrite_nanos.saturating_add(search.rewrite_time);
        for collector in &search.collector {
            totals.collector_nanos = totals
                .collector_nanos
                .saturating_add(collector.time_in_nanos);
        }
    }

    for agg in &shard.aggregations {
        totals.aggregation_nanos = totals.aggregation_nanos.saturating_add(agg.time_in_nanos);
    }

    totals
}
