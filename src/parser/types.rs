use std::collections::HashMap;

use serde::Deserialize;

use crate::tree::NodeId;

/// Shared view over the nested document shapes, so one loader handles all.
pub trait NestedNode: Sized {
    fn id(&self) -> &NodeId;
    fn label(&self) -> &str;
    fn detail(&self) -> Option<&str> {
        None
    }
    fn children(&self) -> &[Self];
}

/// File/folder tree entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeNode {
    pub id: NodeId,
    #[serde(alias = "name")]
    pub label: String,
    #[serde(default)]
    pub children: Option<Vec<TreeNode>>,
}

impl NestedNode for TreeNode {
    fn id(&self) -> &NodeId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn children(&self) -> &[Self] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// Comment in a discussion thread. Replies play the role of children.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadNode {
    pub id: NodeId,
    pub author: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub replies: Option<Vec<ThreadNode>>,
}

impl NestedNode for ThreadNode {
    fn id(&self) -> &NodeId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.author
    }

    fn detail(&self) -> Option<&str> {
        (!self.content.is_empty()).then_some(self.content.as_str())
    }

    fn children(&self) -> &[Self] {
        self.replies.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MenuNode {
    pub id: NodeId,
    pub label: String,
    #[serde(default)]
    pub children: Option<Vec<MenuNode>>,
}

impl NestedNode for MenuNode {
    fn id(&self) -> &NodeId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn children(&self) -> &[Self] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// Flat, id-referenced form: every node lives in `index` and names its
/// children by id. Unlike the nested forms this can describe cycles.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexedDocument {
    pub root: NodeId,
    pub index: HashMap<String, IndexEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexEntry {
    #[serde(alias = "name")]
    pub label: String,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub children: Option<Vec<NodeId>>,
}
