//! ES Profile Insight
//!
//! Time-proportional tree visualization of Elasticsearch query profiles
//! (`"profile": true` responses), with optional AI performance advice.
//!
//! Every node's bar is measured against a single reference duration: the
//! slowest root query or root aggregation across all shards. The dominant
//! operation anywhere in the tree is therefore visible at a glance.
//!
//! ## Getting Started
//!
//! ```bash
//! es-profile render --file response.json
//! es-profile html --file response.json --output report.html
//! es-profile explore --file response.json
//! ```

pub mod advisor;
pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod render;
pub mod utils;
