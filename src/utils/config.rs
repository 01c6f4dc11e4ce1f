//! Configuration and constants for the CLI.

/// Nanoseconds per millisecond (all profile timings are reported in nanos)
pub const NANOS_PER_MILLI: f64 = 1_000_000.0;

// Severity tiers for the proportional bar.
// Boundaries are strict: exactly 50% is a warning, exactly 20% is normal.
pub const CRITICAL_THRESHOLD_PERCENT: f64 = 50.0;
pub const WARNING_THRESHOLD_PERCENT: f64 = 20.0;

/// Nodes shallower than this start expanded
pub const DEFAULT_EXPANDED_DEPTH: usize = 2;

/// Width of the text-mode bar in characters
pub const TEXT_BAR_WIDTH: usize = 30;

/// Width of the HTML bar track in pixels
pub const HTML_BAR_WIDTH_PX: usize = 200;

/// Field path that every profile response must carry
pub const REQUIRED_FIELD: &str = "profile.shards";

/// Shown in place of an empty aggregations section
pub const EMPTY_AGGREGATIONS_MESSAGE: &str = "No aggregations performed in this shard";

/// Shown when the model returns an empty reply
pub const EMPTY_ANALYSIS_FALLBACK: &str = "No analysis could be generated.";

/// Prefix for advisory failures surfaced to the user
pub const ANALYSIS_FAILED_PREFIX: &str = "AI Analysis failed: ";

// Advisory endpoint defaults (Gemini generateContent API)
pub const DEFAULT_ADVISOR_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_ADVISOR_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_THINKING_BUDGET: u32 = 4000;
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
