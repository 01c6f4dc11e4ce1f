//! Rendering of a profile as a time-proportional tree.
//!
//! This module builds a display-ready view of the profile and renders it:
//! - `tree` walks nodes recursively against the global reference duration
//! - `report` groups searches, collectors and aggregations per shard
//! - `text` renders the view for the terminal
//! - `html` renders the view as a collapsible standalone page

pub mod html;
pub mod report;
pub mod text;
pub mod tree;

// Re-export main types
pub use html::{escape_html, render_html, HtmlConfig};
pub use report::{build_report, CollectorRow, ReportView, SearchView, ShardView};
pub use text::{render_analysis_text, render_text, text_bar, TextOptions};
pub use tree::{build_node_view, BreakdownEntry, ExpansionState, NodePath, NodeView, Section};
