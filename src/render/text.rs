//! Terminal renderer for the profile tree.
//!
//! Produces an indented, ANSI-colored tree with proportional bars.
//! Collapsed nodes show only their header; expanded nodes list their
//! breakdown and children.

use super::report::{ReportView, SearchView, ShardView};
use super::tree::NodeView;
use crate::advisor::MarkdownLine;
use crate::aggregator::{format_millis, Severity};
use crate::utils::config::TEXT_BAR_WIDTH;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[90m";
const CYAN: &str = "\x1b[36m";
const MAGENTA: &str = "\x1b[35m";

/// Text rendering options
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Emit ANSI color codes
    pub color: bool,
    /// Print each node's path (used by the explorer's `toggle` command)
    pub show_paths: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            color: true,
            show_paths: false,
        }
    }
}

impl TextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_paths(mut self, show_paths: bool) -> Self {
        self.show_paths = show_paths;
        self
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }
}

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "\x1b[31;1m", // Red
        Severity::Warning => "\x1b[33m",    // Amber
        Severity::Normal => "\x1b[34m",     // Blue
    }
}

/// Render a proportional bar of `TEXT_BAR_WIDTH` cells
pub fn text_bar(fill_percent: f64) -> String {
    let fraction = fill_percent.clamp(0.0, 100.0) / 100.0;
    let filled = ((fraction * TEXT_BAR_WIDTH as f64).round() as usize).min(TEXT_BAR_WIDTH);
    format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(TEXT_BAR_WIDTH - filled)
    )
}

/// Render the whole report
pub fn render_text(report: &ReportView, options: &TextOptions) -> String {
    let mut lines = Vec::new();

    lines.push(options.paint(BOLD, "PROFILE EXECUTION TREE"));
    lines.push(format!(
        "  Reference duration: {}",
        format_millis(report.reference_nanos)
    ));

    if report.shards.is_empty() {
        lines.push(String::new());
        lines.push("  (profile contains no shards)".to_string());
    }

    for shard in &report.shards {
        lines.push(String::new());
        render_shard(shard, options, &mut lines);
    }

    lines.join("\n")
}

fn render_shard(shard: &ShardView, options: &TextOptions, lines: &mut Vec<String>) {
    lines.push(format!(
        "{} {}",
        options.paint(BOLD, &format!("Shard: {}", shard.id)),
        options.paint(DIM, &format!("({})", shard.totals.summary()))
    ));

    for (index, search) in shard.searches.iter().enumerate() {
        render_search(index, search, options, lines);
    }

    lines.push(format!(
        "  {}",
        options.paint(MAGENTA, "AGGREGATIONS BREAKDOWN")
    ));
    match shard.aggregations_placeholder() {
        Some(message) => lines.push(format!("    {}", options.paint(DIM, message))),
        None => {
            for agg in &shard.aggregations {
                render_node(agg, options, lines);
            }
        }
    }
}

fn render_search(
    index: usize,
    search: &SearchView,
    options: &TextOptions,
    lines: &mut Vec<String>,
) {
    lines.push(format!(
        "  {} {}",
        options.paint(CYAN, "QUERY BREAKDOWN"),
        options.paint(DIM, &format!("(search {})", index))
    ));
    for query in &search.queries {
        render_node(query, options, lines);
    }

    lines.push(format!("  {}", options.paint(BOLD, "COLLECTORS")));
    for collector in &search.collectors {
        lines.push(format!(
            "    {} {} {:.3}ms",
            options.paint(BOLD, &collector.name),
            options.paint(DIM, &format!("[{}]", collector.reason)),
            collector.time_ms
        ));
    }

    lines.push(format!(
        "  {} {:.3}ms",
        options.paint(BOLD, "REWRITE TIME"),
        search.rewrite_time_ms
    ));
}

/// Render one node and (if expanded) its breakdown and children
fn render_node(node: &NodeView, options: &TextOptions, lines: &mut Vec<String>) {
    let indent = "  ".repeat(node.depth + 2);

    let marker = match (node.has_children(), node.expanded) {
        (true, true) => "▼",
        (true, false) => "▶",
        (false, _) => " ",
    };

    let mut header = format!(
        "{}{} {} {}",
        indent,
        marker,
        options.paint(BOLD, &node.node_type),
        options.paint(DIM, &node.description)
    );
    if options.show_paths {
        header.push_str(&format!("  {}", options.paint(DIM, &format!("<{}>", node.path))));
    }
    lines.push(header);

    let color = severity_color(node.severity);
    lines.push(format!(
        "{}  {:>10.3}ms {} {:>5.1}%",
        indent,
        node.time_ms,
        options.paint(color, &text_bar(node.percentage)),
        node.percentage
    ));

    if !node.expanded {
        return;
    }

    for entry in &node.breakdown {
        lines.push(format!(
            "{}    {} {:.3}ms",
            indent,
            options.paint(DIM, &format!("{}:", entry.name)),
            entry.millis
        ));
    }

    for child in &node.children {
        render_node(child, options, lines);
    }
}

/// Render advisory reply lines for the terminal
pub fn render_analysis_text(lines: &[MarkdownLine], options: &TextOptions) -> String {
    let mut out = Vec::with_capacity(lines.len() + 1);
    out.push(options.paint(BOLD, "PERFORMANCE ADVISOR"));

    for line in lines {
        match line {
            MarkdownLine::Heading(text) => {
                out.push(String::new());
                out.push(options.paint(CYAN, text));
            }
            MarkdownLine::Bullet(text) => out.push(format!("  • {}", text)),
            MarkdownLine::Paragraph(text) => out.push(text.clone()),
        }
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_profile;
    use crate::render::report::build_report;
    use crate::render::tree::ExpansionState;

    fn sample_report(state: &ExpansionState) -> ReportView {
        let response = parse_profile(
            r#"{"profile":{"shards":[{"id":"0","searches":[{"query":[
                {"type":"BooleanQuery","description":"+a +b","time_in_nanos":2000000,
                 "breakdown":{"score":1000000},
                 "children":[{"type":"TermQuery","description":"a","time_in_nanos":1000000,
                   "breakdown":{"score":500000},
                   "children":[{"type":"Deep","description":"d","time_in_nanos":10,"breakdown":{"next_doc":7000}}]}]}],
              "rewrite_time":5000,"collector":[{"name":"SimpleTopScoreDocCollector","reason":"search_top_hits","time_in_nanos":300000}]}],
              "aggregations":[]}]}}"#,
        )
        .unwrap();
        build_report(&response, 8_000_000, state)
    }

    #[test]
    fn test_text_bar() {
        assert_eq!(text_bar(0.0).chars().filter(|c| *c == '█').count(), 0);
        assert_eq!(text_bar(100.0).chars().filter(|c| *c == '█').count(), TEXT_BAR_WIDTH);
        assert_eq!(text_bar(50.0).chars().filter(|c| *c == '█').count(), TEXT_BAR_WIDTH / 2);
        assert_eq!(text_bar(100.0).chars().count(), TEXT_BAR_WIDTH);
    }

    #[test]
    fn test_render_plain_text() {
        let plain = TextOptions::new().with_color(false);
        let text = render_text(&sample_report(&ExpansionState::new()), &plain);

        assert!(text.contains("Shard: 0"));
        assert!(text.contains("▼ BooleanQuery +a +b"));
        assert!(text.contains(" 25.0%"));
        assert!(text.contains("score: 1.000ms"));
        assert!(text.contains("SimpleTopScoreDocCollector [search_top_hits] 0.300ms"));
        assert!(text.contains("REWRITE TIME 0.005ms"));
        assert!(text.contains("No aggregations performed in this shard"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_collapsed_nodes_hide_details() {
        let plain = TextOptions::new().with_color(false);
        let text = render_text(&sample_report(&ExpansionState::new()), &plain);

        // Depth 2 node header is visible (its parent is expanded) but its breakdown is not
        assert!(text.contains("Deep d"));
        assert!(!text.contains("next_doc"));

        let text = render_text(
            &sample_report(&ExpansionState::fully_expanded()),
            &TextOptions::new().with_color(false),
        );
        assert!(text.contains("next_doc: 0.007ms"));
    }

    #[test]
    fn test_paths_and_color() {
        let text = render_text(
            &sample_report(&ExpansionState::new()),
            &TextOptions::new().with_paths(true),
        );
        assert!(text.contains("<0/q0/0/0>"));
        assert!(text.contains('\x1b'));
    }

    #[test]
    fn test_render_analysis_text() {
        let lines = vec![
            MarkdownLine::Heading("Summary".to_string()),
            MarkdownLine::Bullet("Slow terms agg".to_string()),
            MarkdownLine::Paragraph("Consider execution_hint.".to_string()),
        ];
        let text = render_analysis_text(&lines, &TextOptions::new().with_color(false));
        assert!(text.contains("\nSummary"));
        assert!(text.contains("  • Slow terms agg"));
        assert!(text.ends_with("Consider execution_hint."));
    }
}
