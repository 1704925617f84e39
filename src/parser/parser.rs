use std::collections::HashSet;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ViewKind;
use crate::parser::types::*;
use crate::tree::{ArenaBuilder, NodeId, TreeArena};

/// Preferred id of the node that holds a top-level menu list. If an item
/// already uses it, a `~N` suffix is appended until the id is free.
pub const MENU_ROOT_ID: &str = "@menu";

/// A loaded input document.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub arena: TreeArena,
    /// The root was added by the loader (menu item lists) and should not be drawn.
    pub synthetic_root: bool,
}

// Converts JSON documents into a TreeArena for the given view
pub struct DocumentParser {
    kind: ViewKind,
}

impl DocumentParser {
    pub fn new(kind: ViewKind) -> Self {
        Self { kind }
    }

    pub fn parse_str(&self, json: &str) -> Result<ParsedDocument> {
        let value: Value = serde_json::from_str(json).context("input is not valid JSON")?;
        self.parse_value(value)
    }

    pub fn parse_value(&self, value: Value) -> Result<ParsedDocument> {
        if is_indexed(&value) {
            let doc: IndexedDocument =
                serde_json::from_value(value).context("malformed indexed document")?;
            return Ok(ParsedDocument {
                arena: load_indexed(&doc)?,
                synthetic_root: false,
            });
        }

        let document = match self.kind {
            ViewKind::FileTree => {
                let root: TreeNode =
                    serde_json::from_value(value).context("malformed file tree document")?;
                ParsedDocument {
                    arena: load_nested(&root)?,
                    synthetic_root: false,
                }
            }
            ViewKind::Thread => {
                let root: ThreadNode =
                    serde_json::from_value(value).context("malformed comment thread document")?;
                ParsedDocument {
                    arena: load_nested(&root)?,
                    synthetic_root: false,
                }
            }
            ViewKind::Menu => {
                // decide the shape up front so serde reports the failing field
                if value.is_array() {
                    let items: Vec<MenuNode> =
                        serde_json::from_value(value).context("malformed menu document")?;
                    ParsedDocument {
                        arena: load_menu_items(&items)?,
                        synthetic_root: true,
                    }
                } else {
                    let root: MenuNode =
                        serde_json::from_value(value).context("malformed menu document")?;
                    ParsedDocument {
                        arena: load_nested(&root)?,
                        synthetic_root: false,
                    }
                }
            }
        };

        debug!(
            view = %self.kind,
            nodes = document.arena.len(),
            "loaded document"
        );
        Ok(document)
    }
}

fn is_indexed(value: &Value) -> bool {
    value.get("index").is_some_and(Value::is_object) && value.get("root").is_some()
}

/// Loads a nested tree rooted at `root` into a fresh arena.
pub fn load_nested<N: NestedNode>(root: &N) -> Result<TreeArena> {
    let mut builder = TreeArena::builder();
    push_nested(&mut builder, None, std::slice::from_ref(root))?;
    Ok(builder.finish(root.id())?)
}

/// Loads a list of top-level menu items under a synthetic root.
pub fn load_menu_items(items: &[MenuNode]) -> Result<TreeArena> {
    let root_id = synthetic_root_id(items);
    let mut builder = TreeArena::builder();
    let root = builder.push(root_id.clone(), "Menu", None)?;
    push_nested(&mut builder, Some(root), items)?;
    Ok(builder.finish(&root_id)?)
}

fn synthetic_root_id<N: NestedNode>(nodes: &[N]) -> NodeId {
    let mut taken = HashSet::new();
    let mut pending: Vec<&N> = nodes.iter().collect();
    while let Some(node) = pending.pop() {
        taken.insert(node.id().as_str());
        pending.extend(node.children());
    }

    let mut candidate = MENU_ROOT_ID.to_string();
    let mut suffix = 0;
    while taken.contains(candidate.as_str()) {
        suffix += 1;
        candidate = format!("{}~{}", MENU_ROOT_ID, suffix);
    }
    NodeId::from(candidate)
}

fn push_nested<N: NestedNode>(
    builder: &mut ArenaBuilder,
    parent: Option<usize>,
    nodes: &[N],
) -> Result<()> {
    let mut pending: Vec<(Option<usize>, &N)> =
        nodes.iter().rev().map(|node| (parent, node)).collect();

    while let Some((parent, node)) = pending.pop() {
        let index = builder.push(
            node.id().clone(),
            node.label(),
            node.detail().map(str::to_string),
        )?;
        if let Some(parent) = parent {
            builder.link(parent, index);
        }
        pending.extend(node.children().iter().rev().map(|child| (Some(index), child)));
    }

    Ok(())
}

/// Loads an id-referenced document. Child ids missing from the index are
/// skipped with a warning.
pub fn load_indexed(doc: &IndexedDocument) -> Result<TreeArena> {
    let mut keys: Vec<&String> = doc.index.keys().collect();
    keys.sort();

    let mut builder = TreeArena::builder();
    for key in &keys {
        let entry = &doc.index[*key];
        builder.push(NodeId::from(key.as_str()), &entry.label, entry.detail.clone())?;
    }

    for key in &keys {
        let entry = &doc.index[*key];
        let Some(parent) = builder.index_of(&NodeId::from(key.as_str())) else {
            continue;
        };
        for child_id in entry.children.as_deref().unwrap_or(&[]) {
            match builder.index_of(child_id) {
                Some(child) => builder.link(parent, child),
                None => warn!(parent = %key, child = %child_id, "skipping child missing from index"),
            }
        }
    }

    Ok(builder.finish(&doc.root)?)
}
