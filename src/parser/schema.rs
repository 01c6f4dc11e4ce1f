//! Profile data model for Elasticsearch `"profile": true` responses.
//!
//! Every field is deserialized leniently: a missing or mistyped value
//! degrades to zero/empty instead of rejecting the whole document. Only
//! `profile.shards` is checked up front (see `profile::parse_profile`).

use log::warn;
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level response wrapper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub profile: ProfileBody,
}

/// The `profile` object of a search response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileBody {
    /// Shards in the order the cluster returned them
    #[serde(default, deserialize_with = "lenient_seq")]
    pub shards: Vec<ShardProfile>,
}

impl ProfileResponse {
    pub fn shards(&self) -> &[ShardProfile] {
        &self.profile.shards
    }
}

/// Profile for a single shard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShardProfile {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient_seq")]
    pub searches: Vec<SearchProfile>,

    /// One root node per top-level aggregation
    #[serde(default, deserialize_with = "lenient_seq")]
    pub aggregations: Vec<ProfileNode>,
}

/// One search phase executed on a shard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchProfile {
    /// Root query nodes (normally one)
    #[serde(default, deserialize_with = "lenient_seq")]
    pub query: Vec<ProfileNode>,

    /// Nanoseconds spent rewriting the query before execution
    #[serde(default, deserialize_with = "lenient_nanos")]
    pub rewrite_time: u64,

    #[serde(default, deserialize_with = "lenient_seq")]
    pub collector: Vec<CollectorNode>,
}

/// A timed query or aggregation node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileNode {
    /// Lucene query class or aggregator class name
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub node_type: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,

    /// Inclusive of all descendants
    #[serde(default, deserialize_with = "lenient_nanos")]
    pub time_in_nanos: u64,

    /// Fine-grained timing contributors, in source order
    #[serde(default, deserialize_with = "lenient_map")]
    pub breakdown: Map<String, Value>,

    #[serde(default, deserialize_with = "lenient_seq")]
    pub children: Vec<ProfileNode>,
}

impl ProfileNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Breakdown entries in source order, values coerced to nanoseconds
    pub fn breakdown_entries(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.breakdown
            .iter()
            .map(|(key, value)| (key.as_str(), coerce_nanos(value)))
    }
}

/// A document collector chosen for a search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectorNode {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    /// Why this collector was selected
    #[serde(default, deserialize_with = "lenient_string")]
    pub reason: String,

    #[serde(default, deserialize_with = "lenient_nanos")]
    pub time_in_nanos: u64,

    /// Parsed but only the top level is ever displayed
    #[serde(default, deserialize_with = "lenient_seq")]
    pub children: Vec<CollectorNode>,
}

/// Coerce a JSON value into a nanosecond count
///
/// Accepts integers, non-negative floats and numeric strings.
/// Anything else counts as zero.
pub fn coerce_nanos(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().and_then(float_to_nanos))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(float_to_nanos))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn float_to_nanos(f: f64) -> Option<u64> {
    if f.is_finite() && f >= 0.0 {
        Some(f as u64)
    } else {
        None
    }
}

fn lenient_nanos<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_nanos(&value))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}

/// Deserialize a sequence element by element, defaulting broken entries
/// so sibling positions (and therefore node paths) stay stable.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            warn!("Expected an array, found {}; treating as empty", type_name(&other));
            return Ok(Vec::new());
        }
    };

    Ok(items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item).unwrap_or_else(|e| {
                warn!("Malformed profile entry replaced with an empty one: {}", e);
                T::default()
            })
        })
        .collect())
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_deserializes_type_field() {
        let node: ProfileNode = serde_json::from_value(json!({
            "type": "TermQuery",
            "description": "title:elastic",
            "time_in_nanos": 1500,
            "breakdown": { "score": 10, "build_scorer": 20 }
        }))
        .unwrap();

        assert_eq!(node.node_type, "TermQuery");
        assert_eq!(node.time_in_nanos, 1500);
        assert!(!node.has_children());
    }

    #[test]
    fn test_breakdown_keeps_source_order() {
        let node: ProfileNode = serde_json::from_str(
            r#"{"breakdown": {"zeta": 1, "alpha": 2, "mid": 3}}"#,
        )
        .unwrap();

        let keys: Vec<&str> = node.breakdown_entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_missing_fields_default() {
        let node: ProfileNode = serde_json::from_value(json!({})).unwrap();
        assert_eq!(node, ProfileNode::default());
    }

    #[test]
    fn test_mistyped_fields_degrade() {
        let node: ProfileNode = serde_json::from_value(json!({
            "type": 42,
            "description": null,
            "time_in_nanos": "not a number",
            "breakdown": [1, 2],
            "children": "nope"
        }))
        .unwrap();

        assert_eq!(node.node_type, "42");
        assert_eq!(node.description, "");
        assert_eq!(node.time_in_nanos, 0);
        assert!(node.breakdown.is_empty());
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_broken_child_keeps_position() {
        let node: ProfileNode = serde_json::from_value(json!({
            "children": [7, { "type": "TermQuery", "time_in_nanos": 5 }]
        }))
        .unwrap();

        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0], ProfileNode::default());
        assert_eq!(node.children[1].node_type, "TermQuery");
    }

    #[test]
    fn test_coerce_nanos() {
        assert_eq!(coerce_nanos(&json!(1000)), 1000);
        assert_eq!(coerce_nanos(&json!(12.9)), 12);
        assert_eq!(coerce_nanos(&json!(-5)), 0);
        assert_eq!(coerce_nanos(&json!("2500")), 2500);
        assert_eq!(coerce_nanos(&json!(" 7.5 ")), 7);
        assert_eq!(coerce_nanos(&json!("abc")), 0);
        assert_eq!(coerce_nanos(&json!(true)), 0);
        assert_eq!(coerce_nanos(&Value::Null), 0);
    }
}
