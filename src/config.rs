use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::renderer::{MarkerStyle, RenderContext};
use crate::tree::{MaxDepth, TraversalOptions, DEFAULT_NESTING_LIMIT};

/// Which family of tree is being shown. Each has its own defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ViewKind {
    #[serde(rename = "tree")]
    FileTree,
    #[serde(rename = "thread")]
    Thread,
    #[serde(rename = "menu")]
    Menu,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewKind::FileTree => "tree",
            ViewKind::Thread => "thread",
            ViewKind::Menu => "menu",
        })
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "tree" | "file-tree" | "files" => Ok(ViewKind::FileTree),
            "thread" | "comments" => Ok(ViewKind::Thread),
            "menu" => Ok(ViewKind::Menu),
            other => Err(format!("unknown view `{}` (expected tree, thread or menu)", other)),
        }
    }
}

/// Effective settings for one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    pub kind: ViewKind,
    pub default_expanded: bool,
    pub max_depth: MaxDepth,
    pub nesting_limit: usize,
    pub hide_root: bool,
    pub indent_width: usize,
    pub markers: MarkerStyle,
}

impl ViewConfig {
    /// Built-in defaults: file trees and menus start collapsed and unbounded,
    /// comment threads start expanded and stop nesting at depth 3.
    pub fn preset(kind: ViewKind) -> Self {
        let (default_expanded, max_depth) = match kind {
            ViewKind::FileTree => (false, MaxDepth::Unbounded),
            ViewKind::Thread => (true, MaxDepth::Bounded(3)),
            ViewKind::Menu => (false, MaxDepth::Unbounded),
        };

        Self {
            kind,
            default_expanded,
            max_depth,
            nesting_limit: DEFAULT_NESTING_LIMIT,
            hide_root: false,
            indent_width: 2,
            markers: MarkerStyle::Ascii,
        }
    }

    pub fn traversal_options(&self) -> TraversalOptions {
        TraversalOptions {
            max_depth: self.max_depth,
            nesting_limit: self.nesting_limit,
            hide_root: self.hide_root,
        }
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext::new()
            .with_indent_width(self.indent_width)
            .with_markers(self.markers)
    }
}

/// Partial settings; `None` leaves the current value alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ViewOverrides {
    pub default_expanded: Option<bool>,
    pub max_depth: Option<MaxDepth>,
    pub nesting_limit: Option<usize>,
    pub hide_root: Option<bool>,
    pub indent_width: Option<usize>,
    pub markers: Option<MarkerStyle>,
}

impl ViewOverrides {
    pub fn apply(&self, config: &mut ViewConfig) {
        if let Some(value) = self.default_expanded {
            config.default_expanded = value;
        }
        if let Some(value) = self.max_depth {
            config.max_depth = value;
        }
        if let Some(value) = self.nesting_limit {
            config.nesting_limit = value;
        }
        if let Some(value) = self.hide_root {
            config.hide_root = value;
        }
        if let Some(value) = self.indent_width {
            config.indent_width = value;
        }
        if let Some(value) = self.markers {
            config.markers = value;
        }
    }
}

/// On-disk configuration: shared overrides at the top level, plus optional
/// per-view sections that win over them.
///
/// ```json
/// { "indent_width": 4, "thread": { "max_depth": 5 } }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    #[serde(flatten)]
    pub common: ViewOverrides,
    pub tree: Option<ViewOverrides>,
    pub thread: Option<ViewOverrides>,
    pub menu: Option<ViewOverrides>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Loads `explicit` if given, otherwise the per-user config file when it
    /// exists, otherwise built-in defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                debug!(path = %path.display(), "using user config");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("treeline").join("config.json"))
    }

    pub fn view_config(&self, kind: ViewKind) -> ViewConfig {
        let mut config = ViewConfig::preset(kind);
        self.common.apply(&mut config);

        let section = match kind {
            ViewKind::FileTree => &self.tree,
            ViewKind::Thread => &self.thread,
            ViewKind::Menu => &self.menu,
        };
        if let Some(section) = section {
            section.apply(&mut config);
        }

        config
    }
}
