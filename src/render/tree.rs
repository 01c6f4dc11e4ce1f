//! Recursive node walker.
//!
//! Turns a `ProfileNode` tree into a `NodeView` tree annotated with
//! durations, percentages of the global reference and expand/collapse
//! state. The reference duration is threaded down unchanged; it is never
//! recomputed per node.

use crate::aggregator::{bar_fill, nanos_to_millis, percentage_of, Severity};
use crate::parser::ProfileNode;
use crate::utils::config::DEFAULT_EXPANDED_DEPTH;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Which part of a shard a node tree hangs off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Root query nodes of the search at this index
    Query { search: usize },
    /// Root aggregation nodes
    Aggregation,
}

/// Stable position of a node in the profile
///
/// Rendered as `<shard>/q<search>/<i>/<j>...` or `<shard>/a/<i>/<j>...`,
/// where the first index picks the root and the rest walk `children`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath {
    pub shard: usize,
    pub section: Section,
    indices: Vec<usize>,
}

impl NodePath {
    /// Path of a root node
    pub fn root(shard: usize, section: Section, index: usize) -> Self {
        Self {
            shard,
            section,
            indices: vec![index],
        }
    }

    /// Path of the child at `index` below this node
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.indices.clone();
        indices.push(index);
        Self {
            shard: self.shard,
            section: self.section,
            indices,
        }
    }

    /// Root nodes are at depth 0
    pub fn depth(&self) -> usize {
        self.indices.len().saturating_sub(1)
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/", self.shard)?;
        match self.section {
            Section::Query { search } => write!(f, "q{}", search)?,
            Section::Aggregation => f.write_str("a")?,
        }
        for index in &self.indices {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('/');

        let shard = parts
            .next()
            .and_then(|p| p.parse::<usize>().ok())
            .ok_or_else(|| format!("Invalid shard index in path '{}'", s))?;

        let section = match parts.next() {
            Some("a") => Section::Aggregation,
            Some(p) if p.starts_with('q') => Section::Query {
                search: p[1..]
                    .parse()
                    .map_err(|_| format!("Invalid search index in path '{}'", s))?,
            },
            _ => return Err(format!("Expected 'q<search>' or 'a' in path '{}'", s)),
        };

        let indices = parts
            .map(|p| p.parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| format!("Invalid node index in path '{}'", s))?;

        if indices.is_empty() {
            return Err(format!("Path '{}' does not name a node", s));
        }

        Ok(Self {
            shard,
            section,
            indices,
        })
    }
}

/// Per-node expand/collapse state
///
/// Nodes without an explicit toggle fall back to the depth rule:
/// expanded iff depth < `expand_below`.
#[derive(Debug, Clone)]
pub struct ExpansionState {
    overrides: HashMap<NodePath, bool>,
    expand_below: usize,
}

impl Default for ExpansionState {
    fn default() -> Self {
        Self {
            overrides: HashMap::new(),
            expand_below: DEFAULT_EXPANDED_DEPTH,
        }
    }
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every node starts expanded
    pub fn fully_expanded() -> Self {
        Self {
            overrides: HashMap::new(),
            expand_below: usize::MAX,
        }
    }

    /// Initial state for a node at `depth`
    pub fn initially_expanded(&self, depth: usize) -> bool {
        depth < self.expand_below
    }

    pub fn is_expanded(&self, path: &NodePath, depth: usize) -> bool {
        self.overrides
            .get(path)
            .copied()
            .unwrap_or_else(|| self.initially_expanded(depth))
    }

    /// Flip one node; siblings and ancestors are untouched.
    /// Returns the new state.
    pub fn toggle(&mut self, path: &NodePath) -> bool {
        let expanded = !self.is_expanded(path, path.depth());
        self.overrides.insert(path.clone(), expanded);
        expanded
    }

    /// Drop all toggles and expand everything
    pub fn expand_all(&mut self) {
        *self = Self::fully_expanded();
    }

    /// Back to depth-based defaults (used when a new model is loaded)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// One breakdown metric, converted for display
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownEntry {
    pub name: String,
    pub nanos: u64,
    pub millis: f64,
}

/// A rendered node with its rendered children
#[derive(Debug, Clone, PartialEq)]
pub struct NodeView {
    pub path: NodePath,
    pub depth: usize,
    pub node_type: String,
    pub description: String,
    pub time_in_nanos: u64,
    pub time_ms: f64,
    /// Percentage of the reference duration, capped at 100 for display
    pub percentage: f64,
    pub severity: Severity,
    pub expanded: bool,
    /// Breakdown in source order
    pub breakdown: Vec<BreakdownEntry>,
    pub children: Vec<NodeView>,
}

impl NodeView {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Find a node by path in this subtree
    pub fn find(&self, path: &NodePath) -> Option<&NodeView> {
        if &self.path == path {
            return Some(self);
        }
        let own = self.path.indices();
        let target = path.indices();
        if path.shard != self.path.shard
            || path.section != self.path.section
            || target.len() <= own.len()
            || &target[..own.len()] != own
        {
            return None;
        }
        self.children
            .get(target[own.len()])
            .and_then(|child| child.find(path))
    }
}

/// Build the view for `node` and, recursively, all of its descendants
///
/// **Public** - core walker
///
/// # Arguments
/// * `node` - Node to render
/// * `reference_nanos` - Global reference duration (same for every node)
/// * `depth` - Nesting depth, 0 for roots
/// * `path` - Stable position of `node`
/// * `state` - Expand/collapse state
pub fn build_node_view(
    node: &ProfileNode,
    reference_nanos: u64,
    depth: usize,
    path: NodePath,
    state: &ExpansionState,
) -> NodeView {
    let raw_percentage = percentage_of(node.time_in_nanos, reference_nanos);

    let breakdown = node
        .breakdown_entries()
        .map(|(name, nanos)| BreakdownEntry {
            name: name.to_string(),
            nanos,
            millis: nanos_to_millis(nanos),
        })
        .collect();

    let children = node
        .children
        .iter()
        .enumerate()
        .map(|(index, child)| {
            build_node_view(child, reference_nanos, depth + 1, path.child(index), state)
        })
        .collect();

    NodeView {
        expanded: state.is_expanded(&path, depth),
        path,
        depth,
        node_type: node.node_type.clone(),
        description: node.description.clone(),
        time_in_nanos: node.time_in_nanos,
        time_ms: nanos_to_millis(node.time_in_nanos),
        percentage: bar_fill(raw_percentage),
        severity: Severity::from_percentage(raw_percentage),
        breakdown,
        children,
    }
}
