//! Self-contained HTML report.
//!
//! Nodes are native `<details>` elements, so the report stays collapsible
//! in any browser without scripts. The initial `open` state follows the
//! same expansion rule as the terminal view.

use super::report::{ReportView, SearchView, ShardView};
use super::tree::NodeView;
use crate::advisor::MarkdownLine;
use crate::aggregator::{format_millis, Severity};
use crate::utils::config::HTML_BAR_WIDTH_PX;
use chrono::Utc;
use log::info;

/// HTML report configuration
#[derive(Debug, Clone)]
pub struct HtmlConfig {
    pub title: String,
    /// Advisory reply to show in a side panel
    pub analysis: Option<Vec<MarkdownLine>>,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            title: "Elasticsearch Profile".to_string(),
            analysis: None,
        }
    }
}

impl HtmlConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_analysis(mut self, analysis: Vec<MarkdownLine>) -> Self {
        self.analysis = Some(analysis);
        self
    }
}

const STYLE: &str = r#"<style>
body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; background: #f8fafc; color: #0f172a; }
header { background: #0f172a; color: #fff; padding: 16px 24px; }
header p { margin: 4px 0 0; font-size: 12px; color: #94a3b8; }
main { display: flex; gap: 24px; padding: 24px; align-items: flex-start; }
.tree { flex: 7; }
.advisor { flex: 5; background: #0f172a; color: #cbd5e1; border-radius: 12px; padding: 20px; position: sticky; top: 24px; }
.advisor h4 { color: #60a5fa; margin: 16px 0 8px; }
.shard { border: 1px solid #e2e8f0; border-radius: 12px; padding: 16px; margin-bottom: 24px; background: #fff; }
.shard-id { font-weight: bold; font-size: 14px; }
.totals { font-size: 11px; color: #64748b; margin-left: 8px; }
.section { margin-top: 16px; font-size: 12px; font-weight: 600; text-transform: uppercase; letter-spacing: .05em; }
.section.query { color: #2563eb; }
.section.aggs { color: #4f46e5; }
.section.collectors { color: #64748b; }
details { border-left: 2px solid #e2e8f0; margin: 0 0 8px 16px; }
summary { cursor: pointer; padding: 8px; list-style: none; }
summary.leaf { cursor: default; }
.type { font-weight: bold; }
.desc { font-family: ui-monospace, Menlo, monospace; font-size: 12px; color: #94a3b8; margin-left: 8px; }
.metrics { display: flex; align-items: center; gap: 12px; margin-top: 6px; font-size: 13px; }
.track { width: __BAR_WIDTH__px; height: 8px; background: #f1f5f9; border-radius: 4px; overflow: hidden; }
.fill { height: 100%; border-radius: 4px; }
.fill.normal { background: #3b82f6; }
.fill.warning { background: #f59e0b; }
.fill.critical { background: #ef4444; }
.pct { font-size: 10px; color: #64748b; font-weight: 600; }
.breakdown { display: grid; grid-template-columns: repeat(4, 1fr); gap: 6px; padding: 0 8px 8px; font-family: ui-monospace, Menlo, monospace; font-size: 10px; }
.breakdown div { display: flex; justify-content: space-between; border: 1px solid #f1f5f9; border-radius: 4px; padding: 2px 6px; }
.collectors-grid { display: grid; grid-template-columns: repeat(2, 1fr); gap: 12px; margin-top: 8px; }
.collector { border: 1px solid #f1f5f9; border-radius: 8px; padding: 10px; }
.collector .reason { font-size: 12px; color: #94a3b8; }
.collector .time { font-family: ui-monospace, Menlo, monospace; font-size: 12px; color: #2563eb; font-weight: bold; }
.rewrite { display: flex; justify-content: space-between; background: #f1f5f9; border-radius: 8px; padding: 10px; margin-top: 12px; font-size: 12px; }
.empty { font-size: 12px; font-style: italic; color: #94a3b8; border: 1px dashed #e2e8f0; border-radius: 8px; padding: 16px; text-align: center; }
footer { text-align: center; font-size: 11px; color: #94a3b8; padding: 16px; }
</style>"#;

/// Escape text for HTML element and attribute content
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the report as a standalone HTML document
pub fn render_html(report: &ReportView, config: &HtmlConfig) -> String {
    let mut out = String::new();

    out.push_str("<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(&config.title)));
    out.push_str(&STYLE.replace("__BAR_WIDTH__", &HTML_BAR_WIDTH_PX.to_string()));
    out.push_str("\n</head>\n<body>\n");

    out.push_str(&format!(
        "<header><h1>{}</h1><p>Reference duration: {}</p></header>\n<main>\n",
        escape_html(&config.title),
        format_millis(report.reference_nanos)
    ));

    out.push_str("<div class=\"tree\">\n");
    for shard in &report.shards {
        render_shard(shard, &mut out);
    }
    out.push_str("</div>\n");

    if let Some(analysis) = &config.analysis {
        render_analysis(analysis, &mut out);
    }

    out.push_str("</main>\n");
    out.push_str(&format!(
        "<footer>Generated {}</footer>\n</body>\n</html>\n",
        Utc::now().to_rfc3339()
    ));

    info!("HTML report rendered ({} bytes)", out.len());
    out
}

fn render_shard(shard: &ShardView, out: &mut String) {
    out.push_str("<section class=\"shard\">\n");
    out.push_str(&format!(
        "<div><span class=\"shard-id\">Shard: {}</span><span class=\"totals\">{}</span></div>\n",
        escape_html(&shard.id),
        escape_html(&shard.totals.summary())
    ));

    for search in &shard.searches {
        render_search(search, out);
    }

    out.push_str("<div class=\"section aggs\">Aggregations Breakdown</div>\n");
    match shard.aggregations_placeholder() {
        Some(message) => out.push_str(&format!(
            "<div class=\"empty\">{}</div>\n",
            escape_html(message)
        )),
        None => {
            for agg in &shard.aggregations {
                render_node(agg, out);
            }
        }
    }

    out.push_str("</section>\n");
}

fn render_search(search: &SearchView, out: &mut String) {
    out.push_str("<div class=\"section query\">Query Breakdown</div>\n");
    for query in &search.queries {
        render_node(query, out);
    }

    out.push_str("<div class=\"section collectors\">Collectors</div>\n");
    out.push_str("<div class=\"collectors-grid\">\n");
    for collector in &search.collectors {
        out.push_str(&format!(
            concat!(
                "<div class=\"collector\"><div class=\"type\">{}</div>",
                "<div class=\"reason\">{}</div><div class=\"time\">{:.3}ms</div></div>\n",
            ),
            escape_html(&collector.name),
            escape_html(&collector.reason),
            collector.time_ms
        ));
    }
    out.push_str("</div>\n");

    out.push_str(&format!(
        "<div class=\"rewrite\"><span>Rewrite Time</span><span>{:.3}ms</span></div>\n",
        search.rewrite_time_ms
    ));
}

fn severity_class(severity: Severity) -> &'static str {
    severity.as_str()
}

fn render_node(node: &NodeView, out: &mut String) {
    out.push_str(&format!(
        "<details data-path=\"{}\"{}>\n",
        escape_html(&node.path.to_string()),
        if node.expanded { " open" } else { "" }
    ));

    out.push_str(&format!(
        "<summary{}><span class=\"type\">{}</span><span class=\"desc\">{}</span>",
        if node.has_children() { "" } else { " class=\"leaf\"" },
        escape_html(&node.node_type),
        escape_html(&node.description)
    ));
    out.push_str(&format!(
        concat!(
            "<div class=\"metrics\"><span>{:.3}ms</span><div class=\"track\">",
            "<div class=\"fill {}\" style=\"width: {:.1}%\"></div></div>",
            "<span class=\"pct\">{:.1}%</span></div></summary>\n",
        ),
        node.time_ms,
        severity_class(node.severity),
        node.percentage,
        node.percentage
    ));

    if !node.breakdown.is_empty() {
        out.push_str("<div class=\"breakdown\">");
        for entry in &node.breakdown {
            out.push_str(&format!(
                "<div><span>{}:</span><span>{:.3}ms</span></div>",
                escape_html(&entry.name),
                entry.millis
            ));
        }
        out.push_str("</div>\n");
    }

    for child in &node.children {
        render_node(child, out);
    }

    out.push_str("</details>\n");
}

fn render_analysis(lines: &[MarkdownLine], out: &mut String) {
    out.push_str("<aside class=\"advisor\"><h3>Performance Advisor</h3>\n");

    let mut in_list = false;
    for line in lines {
        let is_bullet = matches!(line, MarkdownLine::Bullet(_));
        if is_bullet && !in_list {
            out.push_str("<ul>\n");
        } else if !is_bullet && in_list {
            out.push_str("</ul>\n");
        }
        in_list = is_bullet;

        let (tag, text) = match line {
            MarkdownLine::Heading(text) => ("h4", text),
            MarkdownLine::Bullet(text) => ("li", text),
            MarkdownLine::Paragraph(text) => ("p", text),
        };
        out.push_str(&format!("<{}>{}</{}>\n", tag, escape_html(text), tag));
    }
    if in_list {
        out.push_str("</ul>\n");
    }

    out.push_str("</aside>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_profile;
    use crate::render::report::build_report;
    use crate::render::tree::ExpansionState;

    fn report() -> ReportView {
        let response = parse_profile(
            r#"{"profile":{"shards":[{"id":"<0>","searches":[{"query":[
                {"type":"BooleanQuery","description":"a & b","time_in_nanos":6000,"breakdown":{"score":10},
                 "children":[{"type":"TermQuery","description":"a","time_in_nanos":1000,"breakdown":{},
                   "children":[{"type":"Leaf","description":"x","time_in_nanos":1,"breakdown":{}}]}]}],
              "rewrite_time":0,"collector":[]}]}]}}"#,
        )
        .unwrap();
        build_report(&response, 10_000, &ExpansionState::new())
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_render_html_structure() {
        let html = render_html(&report(), &HtmlConfig::new().with_title("Test"));

        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("<title>Test</title>"));
        assert!(html.contains("Shard: &lt;0&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(html.contains("<details data-path=\"0/q0/0\" open>"));
        assert!(html.contains("<details data-path=\"0/q0/0/0\" open>"));
        assert!(html.contains("<details data-path=\"0/q0/0/0/0\">"));
        assert!(html.contains("class=\"fill critical\" style=\"width: 60.0%\""));
        assert!(html.contains("No aggregations performed in this shard"));
        assert!(html.contains("Rewrite Time"));
        assert!(!html.contains("class=\"advisor\""));
    }

    #[test]
    fn test_render_html_with_analysis() {
        let analysis = vec![
            MarkdownLine::Heading("Bottlenecks".to_string()),
            MarkdownLine::Bullet("one".to_string()),
            MarkdownLine::Bullet("two".to_string()),
            MarkdownLine::Paragraph("done".to_string()),
        ];
        let html = render_html(&report(), &HtmlConfig::new().with_analysis(analysis));

        assert!(html.contains(
            "<h4>Bottlenecks</h4>\n<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n<p>done</p>"
        ));
    }
}
