use std::collections::HashMap;

use tracing::trace;

use super::arena::NodeId;

/// Per-node expand/collapse flags for one rendering session.
///
/// Nodes that were never toggled read as the configured default. Each entry
/// is independent: collapsing a parent leaves its descendants' flags alone.
#[derive(Debug, Clone)]
pub struct TreeState {
    default_expanded: bool,
    entries: HashMap<NodeId, bool>,
}

impl TreeState {
    pub fn new(default_expanded: bool) -> Self {
        Self {
            default_expanded,
            entries: HashMap::new(),
        }
    }

    pub fn default_expanded(&self) -> bool {
        self.default_expanded
    }

    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.entries
            .get(id)
            .copied()
            .unwrap_or(self.default_expanded)
    }

    /// Flips the flag for `id` and returns the new value.
    ///
    /// Unknown ids are seeded from the default before flipping.
    pub fn toggle(&mut self, id: &NodeId) -> bool {
        let default = self.default_expanded;
        let entry = self.entries.entry(id.clone()).or_insert(default);
        *entry = !*entry;
        trace!(node = %id, expanded = *entry, "toggled node");
        *entry
    }

    /// The stored flag, if this node has ever been toggled.
    pub fn recorded(&self, id: &NodeId) -> Option<bool> {
        self.entries.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TreeState {
    fn default() -> Self {
        Self::new(false)
    }
}
