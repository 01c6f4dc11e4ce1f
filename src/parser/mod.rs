//! Profile parsing and schema definitions.
//!
//! This module handles:
//! - Parsing raw response text as JSON
//! - Checking for the required `profile.shards` field
//! - Defining the (lenient) profile model

pub mod profile;
pub mod schema;

// Re-export main types
pub use profile::parse_profile;
pub use schema::{
    coerce_nanos, CollectorNode, ProfileBody, ProfileNode, ProfileResponse, SearchProfile,
    ShardProfile,
};
