use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, trace};

use super::arena::{NodeId, TreeArena};
use super::state::TreeState;
use crate::error::{Result, TreeError};

/// Hard ceiling on nesting, applied to every view regardless of `max_depth`.
pub const DEFAULT_NESTING_LIMIT: usize = 4096;

/// How deep the traversal may descend before it truncates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaxDepth {
    Bounded(usize),
    #[default]
    Unbounded,
}

impl MaxDepth {
    /// Whether children at `depth + 1` fall outside the budget.
    pub fn cuts_below(&self, depth: usize) -> bool {
        match self {
            MaxDepth::Bounded(max) => depth + 1 > *max,
            MaxDepth::Unbounded => false,
        }
    }
}

impl fmt::Display for MaxDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxDepth::Bounded(max) => write!(f, "{}", max),
            MaxDepth::Unbounded => f.write_str("unbounded"),
        }
    }
}

impl FromStr for MaxDepth {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "unbounded" | "none" => Ok(MaxDepth::Unbounded),
            other => other
                .parse::<usize>()
                .map(MaxDepth::Bounded)
                .map_err(|_| format!("expected a depth or `unbounded`, got `{}`", other)),
        }
    }
}

impl<'de> Deserialize<'de> for MaxDepth {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawDepth {
            Depth(usize),
            Text(String),
        }

        match RawDepth::deserialize(deserializer)? {
            RawDepth::Depth(max) => Ok(MaxDepth::Bounded(max)),
            RawDepth::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Knobs for a single traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalOptions {
    pub max_depth: MaxDepth,
    pub nesting_limit: usize,
    /// Skip the root's own instruction and always descend into it.
    /// Emitted depths are shifted up by one.
    pub hide_root: bool,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self {
            max_depth: MaxDepth::Unbounded,
            nesting_limit: DEFAULT_NESTING_LIMIT,
            hide_root: false,
        }
    }
}

/// One visited node, in the order the host should draw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderInstruction {
    pub node_id: NodeId,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub depth: usize,
    pub has_children: bool,
    pub is_expanded: bool,
    /// Children exist and the node is expanded, but the depth budget ran out.
    pub truncated: bool,
}

struct Frame {
    index: usize,
    depth: usize,
}

/// Walks `arena` depth-first in pre-order and describes every visible node.
///
/// Uses an explicit worklist, so deep trees never grow the call stack. A node
/// reached twice fails with [`TreeError::Cycle`] or [`TreeError::SharedNode`]
/// and nesting past `options.nesting_limit` fails with
/// [`TreeError::NestingLimit`].
pub fn render(
    arena: &TreeArena,
    state: &TreeState,
    options: &TraversalOptions,
) -> Result<Vec<RenderInstruction>> {
    let mut instructions = Vec::new();
    let mut visited = HashSet::new();
    let mut path: Vec<usize> = Vec::new();
    let mut stack = vec![Frame {
        index: arena.root(),
        depth: 0,
    }];

    while let Some(Frame { index, depth }) = stack.pop() {
        let node = arena.node(index);

        // path holds the ancestors of the node being visited
        path.truncate(depth);
        if !visited.insert(index) {
            let id = node.id.clone();
            return Err(if path.contains(&index) {
                TreeError::Cycle { id }
            } else {
                TreeError::SharedNode { id }
            });
        }
        if depth > options.nesting_limit {
            return Err(TreeError::NestingLimit {
                limit: options.nesting_limit,
            });
        }
        path.push(index);

        let hidden = options.hide_root && depth == 0;
        // the budget is measured in emitted depth; a hidden root is never cut
        let visible_depth = if options.hide_root { depth.saturating_sub(1) } else { depth };
        let has_children = node.has_children();
        let is_expanded = hidden || state.is_expanded(&node.id);
        let truncated = !hidden
            && has_children
            && is_expanded
            && options.max_depth.cuts_below(visible_depth);

        if truncated {
            trace!(node = %node.id, depth = visible_depth, "depth budget reached, truncating");
        }

        if !hidden {
            instructions.push(RenderInstruction {
                node_id: node.id.clone(),
                label: node.label.clone(),
                detail: node.detail.clone(),
                depth: visible_depth,
                has_children,
                is_expanded,
                truncated,
            });
        }

        if has_children && is_expanded && !truncated {
            stack.extend(node.children.iter().rev().map(|&child| Frame {
                index: child,
                depth: depth + 1,
            }));
        }
    }

    debug!(
        nodes = arena.len(),
        emitted = instructions.len(),
        "traversal finished"
    );
    Ok(instructions)
}
