//! Line-by-line interpretation of the advisory reply.
//!
//! Only headings (`#`) and bullets (`- ` / `* `) are recognized; every
//! other non-empty line is a paragraph. Emphasis, tables, code blocks and
//! links are left as plain text.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MarkdownLine {
    Heading(String),
    Bullet(String),
    Paragraph(String),
}

/// Split reply text into display lines
pub fn parse_lines(text: &str) -> Vec<MarkdownLine> {
    text.lines()
        .filter_map(|line| {
            if line.trim().is_empty() {
                return None;
            }
            Some(if line.starts_with('#') {
                MarkdownLine::Heading(line.trim_start_matches('#').trim_start().to_string())
            } else if let Some(item) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
                MarkdownLine::Bullet(item.to_string())
            } else {
                MarkdownLine::Paragraph(line.to_string())
            })
        })
        .collect()
}
