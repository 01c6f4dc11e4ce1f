//! Compute the global reference duration for a profile.
//!
//! Every percentage bar in the tree is normalized against one value:
//! the slowest root query or root aggregation across all shards. Nested
//! children are relative to this global value, not to their parent, so
//! the dominant leaf anywhere in the tree stands out.

use crate::parser::{ProfileNode, ProfileResponse};
use log::debug;

/// Compute the reference duration in nanoseconds
///
/// **Public** - computed once per model load
///
/// Only root query nodes (per search) and root aggregation nodes (per shard)
/// contribute. Nested children and collectors are ignored. Returns 0 when no
/// root exists.
pub fn reference_duration(response: &ProfileResponse) -> u64 {
    let reference = root_nodes(response)
        .map(|node| node.time_in_nanos)
        .max()
        .unwrap_or(0);

    debug!("Reference duration: {} ns", reference);

    reference
}

/// Iterate every root query and root aggregation node in source order
pub fn root_nodes(response: &ProfileResponse) -> impl Iterator<Item = &ProfileNode> {
    response.shards().iter().flat_map(|shard| {
        shard
            .searches
            .iter()
            .flat_map(|search| search.query.iter())
            .chain(shard.aggregations.iter())
    })
}
