use es_profile_insight::aggregator::{percentage_of, reference_duration, Severity};
use es_profile_insight::parser::parse_profile;
use serde_json::json;

fn two_shard_profile() -> String {
    json!({
        "took": 12,
        "timed_out": false,
        "profile": { "shards": [
            {
                "id": "0",
                "searches": [ {
                    "query": [ {
                        "type": "TermQuery",
                        "description": "title:elastic",
                        "time_in_nanos": 2_000_000,
                        "breakdown": { "score": 500_000, "build_scorer": 1_000_000 },
                        "children": []
                    } ],
                    "rewrite_time": 15_000,
                    "collector": [ {
                        "name": "SimpleTopScoreDocCollector",
                        "reason": "search_top_hits",
                        "time_in_nanos": 300_000
                    } ]
                } ],
                "aggregations": [ {
                    "type": "GlobalOrdinalsStringTermsAggregator",
                    "description": "by_tag",
                    "time_in_nanos": 8_000_000,
                    "breakdown": { "collect": 6_000_000 }
                } ]
            },
            {
                "id": "1",
                "searches": [ {
                    "query": [ {
                        "type": "TermQuery",
                        "description": "title:elastic",
                        "time_in_nanos": 1_000_000,
                        "breakdown": {}
                    } ],
                    "rewrite_time": 0,
                    "collector": []
                } ],
                "aggregations": []
            }
        ] }
    })
    .to_string()
}

#[test]
fn test_reference_duration_over_shards() {
    let response = parse_profile(&two_shard_profile()).unwrap();
    assert_eq!(reference_duration(&response), 8_000_000);
}

#[test]
fn test_nested_maximum_does_not_raise_reference() {
    let text = json!({ "profile": { "shards": [ {
        "id": "0",
        "searches": [ { "query": [ {
            "type": "BooleanQuery", "description": "", "time_in_nanos": 1_000,
            "breakdown": {},
            "children": [ { "type": "TermQuery", "description": "", "time_in_nanos": 999_999_999,
                            "breakdown": {} } ]
        } ], "rewrite_time": 0, "collector": [] } ],
        "aggregations": [ {
            "type": "AvgAggregator", "description": "avg", "time_in_nanos": 500, "breakdown": {},
            "children": [ { "type": "Inner", "description": "", "time_in_nanos": 50_000_000, "breakdown": {} } ]
        } ]
    } ] } })
    .to_string();

    let response = parse_profile(&text).unwrap();
    assert_eq!(reference_duration(&response), 1_000);
}

#[test]
fn test_all_zero_timings() {
    let text = json!({ "profile": { "shards": [ {
        "id": "0",
        "searches": [ { "query": [ { "type": "MatchAllDocsQuery", "description": "*:*",
                                     "time_in_nanos": 0, "breakdown": {} } ],
                        "rewrite_time": 0, "collector": [] } ],
        "aggregations": []
    } ] } })
    .to_string();

    let response = parse_profile(&text).unwrap();
    let reference = reference_duration(&response);

    assert_eq!(reference, 0);
    let pct = percentage_of(0, reference);
    assert_eq!(pct, 0.0);
    assert!(pct.is_finite());
    assert_eq!(Severity::from_percentage(pct), Severity::Normal);
}

#[test]
fn test_severity_tiers_are_strict() {
    // 50% exactly is a warning, 20% exactly is normal
    assert_eq!(Severity::from_percentage(percentage_of(4, 8)), Severity::Warning);
    assert_eq!(Severity::from_percentage(percentage_of(1, 5)), Severity::Normal);
    assert_eq!(Severity::from_percentage(percentage_of(5, 8)), Severity::Critical);
    assert_eq!(Severity::from_percentage(percentage_of(2, 8)), Severity::Warning);
}
