//! Per-shard grouping of searches, collectors and aggregations.

use super::tree::{build_node_view, ExpansionState, NodePath, NodeView, Section};
use crate::aggregator::{nanos_to_millis, shard_totals, ShardTotals};
use crate::parser::{ProfileResponse, SearchProfile, ShardProfile};
use crate::utils::config::EMPTY_AGGREGATIONS_MESSAGE;
use log::debug;

/// Fully rendered profile
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub reference_nanos: u64,
    pub shards: Vec<ShardView>,
}

impl ReportView {
    /// Find any node in the report by path
    pub fn find(&self, path: &NodePath) -> Option<&NodeView> {
        let shard = self.shards.get(path.shard)?;
        let roots = match path.section {
            Section::Query { search } => &shard.searches.get(search)?.queries,
            Section::Aggregation => &shard.aggregations,
        };
        roots.get(*path.indices().first()?)?.find(path)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShardView {
    pub id: String,
    pub totals: ShardTotals,
    pub searches: Vec<SearchView>,
    pub aggregations: Vec<NodeView>,
}

impl ShardView {
    /// Message to show instead of an empty aggregations section
    pub fn aggregations_placeholder(&self) -> Option<&'static str> {
        if self.aggregations.is_empty() {
            Some(EMPTY_AGGREGATIONS_MESSAGE)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub queries: Vec<NodeView>,
    pub collectors: Vec<CollectorRow>,
    pub rewrite_time_ms: f64,
}

/// A top-level collector (nested collectors are not shown)
#[derive(Debug, Clone, PartialEq)]
pub struct CollectorRow {
    pub name: String,
    pub reason: String,
    pub time_ms: f64,
}

/// Build the report for every shard, in source order
///
/// **Public** - main entry point for rendering
///
/// # Arguments
/// * `response` - Parsed profile
/// * `reference_nanos` - Reference duration computed once at load time
/// * `state` - Expand/collapse state
pub fn build_report(
    response: &ProfileResponse,
    reference_nanos: u64,
    state: &ExpansionState,
) -> ReportView {
    debug!(
        "Building report for {} shards (reference {} ns)",
        response.shards().len(),
        reference_nanos
    );

    let shards = response
        .shards()
        .iter()
        .enumerate()
        .map(|(index, shard)| build_shard_view(index, shard, reference_nanos, state))
        .collect();

    ReportView {
        reference_nanos,
        shards,
    }
}

fn build_shard_view(
    shard_index: usize,
    shard: &ShardProfile,
    reference_nanos: u64,
    state: &ExpansionState,
) -> ShardView {
    let searches = shard
        .searches
        .iter()
        .enumerate()
        .map(|(search_index, search)| {
            build_search_view(shard_index, search_index, search, reference_nanos, state)
        })
        .collect();

    let aggregations = shard
        .aggregations
        .iter()
        .enumerate()
        .map(|(index, agg)| {
            let path = NodePath::root(shard_index, Section::Aggregation, index);
            build_node_view(agg, reference_nanos, 0, path, state)
        })
        .collect();

    ShardView {
        id: shard.id.clone(),
        totals: shard_totals(shard),
        searches,
        aggregations,
    }
}

fn build_search_view(
    shard_index: usize,
    search_index: usize,
    search: &SearchProfile,
    reference_nanos: u64,
    state: &ExpansionState,
) -> SearchView {
    let section = Section::Query {
        search: search_index,
    };

    let queries = search
        .query
        .iter()
        .enumerate()
        .map(|(index, query)| {
            let path = NodePath::root(shard_index, section, index);
            build_node_view(query, reference_nanos, 0, path, state)
        })
        .collect();

    let collectors = search
        .collector
        .iter()
        .map(|c| CollectorRow {
            name: c.name.clone(),
            reason: c.reason.clone(),
            time_ms: nanos_to_millis(c.time_in_nanos),
        })
        .collect();

    SearchView {
        queries,
        collectors,
        rewrite_time_ms: nanos_to_millis(search.rewrite_time),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::reference_duration;
    use crate::parser::parse_profile;

    const PROFILE: &str = r#"{
        "profile": { "shards": [
            { "id": "b", "searches": [], "aggregations": [] },
            { "id": "a", "searches": [
                { "query": [ { "type": "TermQuery", "description": "f:x", "time_in_nanos": 10,
                               "breakdown": {}, "children": [] } ],
                  "rewrite_time": 4000,
                  "collector": [ { "name": "SimpleTopScoreDocCollector", "reason": "search_top_hits",
                                   "time_in_nanos": 3000,
                                   "children": [ { "name": "inner", "reason": "x", "time_in_nanos": 1 } ] } ] }
              ],
              "aggregations": [ { "type": "TermsAggregator", "description": "by_tag", "time_in_nanos": 40,
                                  "breakdown": {} } ] }
        ] }
    }"#;

    #[test]
    fn test_shards_keep_source_order() {
        let response = parse_profile(PROFILE).unwrap();
        let report = build_report(&response, reference_duration(&response), &ExpansionState::new());

        let ids: Vec<&str> = report.shards.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(report.reference_nanos, 40);
    }

    #[test]
    fn test_collectors_rewrite_and_placeholder() {
        let response = parse_profile(PROFILE).unwrap();
        let report = build_report(&response, 40, &ExpansionState::new());

        assert_eq!(
            report.shards[0].aggregations_placeholder(),
            Some(EMPTY_AGGREGATIONS_MESSAGE)
        );
        assert_eq!(report.shards[1].aggregations_placeholder(), None);

        let search = &report.shards[1].searches[0];
        assert_eq!(search.collectors.len(), 1);
        assert_eq!(search.collectors[0].name, "SimpleTopScoreDocCollector");
        assert_eq!(search.collectors[0].reason, "search_top_hits");
        assert_eq!(search.collectors[0].time_ms, 0.003);
        assert_eq!(search.rewrite_time_ms, 0.004);
        assert_eq!(search.queries[0].percentage, 25.0);
    }

    #[test]
    fn test_find_across_sections() {
        let response = parse_profile(PROFILE).unwrap();
        let report = build_report(&response, 40, &ExpansionState::new());

        let query = report.find(&"1/q0/0".parse().unwrap()).unwrap();
        assert_eq!(query.node_type, "TermQuery");

        let agg = report.find(&"1/a/0".parse().unwrap()).unwrap();
        assert_eq!(agg.node_type, "TermsAggregator");

        assert!(report.find(&"0/a/0".parse().unwrap()).is_none());
        assert!(report.find(&"7/q0/0".parse().unwrap()).is_none());
    }
}
