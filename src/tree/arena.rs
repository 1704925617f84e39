use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, TreeError};

/// Stable identity of a node, unique within one tree.
///
/// Input documents may use strings or integers; integers are normalised to
/// their decimal form, so `1` and `"1"` name the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => NodeId::from(n),
            RawId::Text(s) => NodeId(s),
        })
    }
}

/// One node held by a [`TreeArena`]. Children are arena indices.
#[derive(Debug, Clone)]
pub struct ArenaNode {
    pub id: NodeId,
    pub label: String,
    pub detail: Option<String>,
    pub children: Vec<usize>,
}

impl ArenaNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Read-only, index-addressed storage for a whole tree.
///
/// Child links are plain indices, so the arena itself can describe shapes
/// that are not trees (cycles, shared children). The traversal rejects those.
#[derive(Debug, Clone)]
pub struct TreeArena {
    nodes: Vec<ArenaNode>,
    lookup: HashMap<NodeId, usize>,
    root: usize,
}

impl TreeArena {
    pub fn builder() -> ArenaBuilder {
        ArenaBuilder::default()
    }

    pub fn root(&self) -> usize {
        self.root
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range. Indices from [`TreeArena::root`],
    /// [`TreeArena::index_of`] and [`ArenaNode::children`] are always valid.
    pub fn node(&self, index: usize) -> &ArenaNode {
        &self.nodes[index]
    }

    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.lookup.get(id).copied()
    }

    pub fn get(&self, id: &NodeId) -> Option<&ArenaNode> {
        self.index_of(id).map(|index| &self.nodes[index])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArenaNode> {
        self.nodes.iter()
    }
}

/// Incremental constructor for a [`TreeArena`].
#[derive(Debug, Default)]
pub struct ArenaBuilder {
    nodes: Vec<ArenaNode>,
    lookup: HashMap<NodeId, usize>,
}

impl ArenaBuilder {
    /// Adds a node without links and returns its index.
    pub fn push(
        &mut self,
        id: NodeId,
        label: impl Into<String>,
        detail: Option<String>,
    ) -> Result<usize> {
        if self.lookup.contains_key(&id) {
            return Err(TreeError::DuplicateId { id });
        }

        let index = self.nodes.len();
        self.lookup.insert(id.clone(), index);
        self.nodes.push(ArenaNode {
            id,
            label: label.into(),
            detail,
            children: Vec::new(),
        });
        Ok(index)
    }

    /// Appends `child` to the end of `parent`'s child list.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not returned by [`ArenaBuilder::push`]. A `child`
    /// that was not returned by it makes a later [`TreeArena::node`] panic.
    pub fn link(&mut self, parent: usize, child: usize) {
        self.nodes[parent].children.push(child);
    }

    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.lookup.get(id).copied()
    }

    pub fn finish(self, root: &NodeId) -> Result<TreeArena> {
        let root = self
            .lookup
            .get(root)
            .copied()
            .ok_or_else(|| TreeError::MissingRoot { id: root.clone() })?;

        Ok(TreeArena {
            nodes: self.nodes,
            lookup: self.lookup,
            root,
        })
    }
}
