//! Fixed instructional prompt for the advisory model.

use super::summary::ProfileSummary;
use crate::utils::error::AdvisorError;

const PROMPT_HEADER: &str = "Analyze this Elasticsearch query profile and provide expert performance optimization advice.
Focus on:
1. Identifying the single biggest bottleneck (Query vs Collector vs Aggregations).
2. If Aggregations are slow, suggest optimizations like \"execution_hint\", reducing bucket count, or using \"breadth_first\" collect mode.
3. Suggesting index mapping changes or query rewrites.
4. Explaining what slow Lucene operations or specific Aggregation types mean in this context.

Profile Data (Simplified):
";

const PROMPT_FOOTER: &str = "

Please respond in Markdown format with clear sections: Summary, Bottlenecks (prioritized by time), and Recommendations.
";

/// Embed the summary in the instructional template
pub fn build_prompt(summary: &ProfileSummary) -> Result<String, AdvisorError> {
    let payload = serde_json::to_string_pretty(summary)?;
    Ok(format!("{}{}{}", PROMPT_HEADER, payload, PROMPT_FOOTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::summary::ShardSummary;

    #[test]
    fn test_prompt_contains_focus_areas_and_payload() {
        let summary = vec![ShardSummary {
            shard_id: "shard-7".to_string(),
            searches: vec![],
            aggregations: vec![],
        }];

        let prompt = build_prompt(&summary).unwrap();

        for n in 1..=4 {
            assert!(prompt.contains(&format!("\n{}. ", n)));
        }
        assert!(prompt.contains("\"shard_id\": \"shard-7\""));
        assert!(prompt.contains("Summary, Bottlenecks (prioritized by time), and Recommendations"));
    }
}
