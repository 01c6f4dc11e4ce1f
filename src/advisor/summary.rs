//! Size-reduced profile summary sent to the advisory model.
//!
//! Keeps only root-level timings: breakdowns, nested children and
//! collector reasons are dropped.

use crate::aggregator::nanos_to_millis;
use crate::parser::{ProfileNode, ProfileResponse, SearchProfile, ShardProfile};
use serde::{Deserialize, Serialize};

/// Summary of a whole response (one entry per shard)
pub type ProfileSummary = Vec<ShardSummary>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShardSummary {
    pub shard_id: String,
    pub searches: Vec<SearchSummary>,
    pub aggregations: Vec<NodeSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSummary {
    pub query: Vec<NodeSummary>,
    pub rewrite_time_ms: f64,
    pub collector: Vec<CollectorSummary>,
}

/// A root query or aggregation node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSummary {
    #[serde(rename = "type")]
    pub node_type: String,
    pub time_ms: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectorSummary {
    pub name: String,
    pub time_ms: f64,
}

/// Reduce a response to the summary payload
pub fn summarize(response: &ProfileResponse) -> ProfileSummary {
    response.shards().iter().map(summarize_shard).collect()
}

fn summarize_shard(shard: &ShardProfile) -> ShardSummary {
    ShardSummary {
        shard_id: shard.id.clone(),
        searches: shard.searches.iter().map(summarize_search).collect(),
        aggregations: shard.aggregations.iter().map(summarize_node).collect(),
    }
}

fn summarize_search(search: &SearchProfile) -> SearchSummary {
    SearchSummary {
        query: search.query.iter().map(summarize_node).collect(),
        rewrite_time_ms: nanos_to_millis(search.rewrite_time),
        collector: search
            .collector
            .iter()
            .map(|c| CollectorSummary {
                name: c.name.clone(),
                time_ms: nanos_to_millis(c.time_in_nanos),
            })
            .collect(),
    }
}

fn summarize_node(node: &ProfileNode) -> NodeSummary {
    NodeSummary {
        node_type: node.node_type.clone(),
        time_ms: nanos_to_millis(node.time_in_nanos),
        description: node.description.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_profile;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_summary_keeps_only_roots() {
        let response = parse_profile(
            &json!({ "profile": { "shards": [ {
                "id": "[node][idx][0]",
                "searches": [ {
                    "query": [ {
                        "type": "BooleanQuery", "description": "+a +b", "time_in_nanos": 2_000_000,
                        "breakdown": { "score": 5 },
                        "children": [ { "type": "TermQuery", "description": "a", "time_in_nanos": 1 } ]
                    } ],
                    "rewrite_time": 500_000,
                    "collector": [ { "name": "SimpleTopScoreDocCollector", "reason": "search_top_hits",
                                     "time_in_nanos": 250_000, "children": [] } ]
                } ],
                "aggregations": [ { "type": "TermsAggregator", "description": "tags",
                                    "time_in_nanos": 8_000_000, "breakdown": {} } ]
            } ] } })
            .to_string(),
        )
        .unwrap();

        let summary = serde_json::to_value(summarize(&response)).unwrap();

        assert_eq!(
            summary,
            json!([ {
                "shard_id": "[node][idx][0]",
                "searches": [ {
                    "query": [ { "type": "BooleanQuery", "time_ms": 2.0, "description": "+a +b" } ],
                    "rewrite_time_ms": 0.5,
                    "collector": [ { "name": "SimpleTopScoreDocCollector", "time_ms": 0.25 } ]
                } ],
                "aggregations": [ { "type": "TermsAggregator", "time_ms": 8.0, "description": "tags" } ]
            } ])
        );
    }
}
