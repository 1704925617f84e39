use tracing::debug;

use crate::config::ViewConfig;
use crate::error::{Result, TreeError};
use crate::tree::{render, NodeId, RenderInstruction, TreeArena, TreeState};

/// The "navigate to full thread" collaborator, invoked when the host
/// activates a truncated node's continuation affordance.
#[cfg_attr(test, mockall::automock)]
pub trait ThreadNavigator {
    fn navigate_to_thread(&mut self, id: &NodeId, label: &str);
}

/// One live view over a tree: the data, its expansion flags and settings.
///
/// The tree is read-only; [`RenderSession::toggle`] is the only mutation.
/// Dropping the session discards all expansion state.
#[derive(Debug, Clone)]
pub struct RenderSession {
    arena: TreeArena,
    state: TreeState,
    config: ViewConfig,
}

impl RenderSession {
    pub fn new(arena: TreeArena, config: ViewConfig) -> Self {
        Self {
            state: TreeState::new(config.default_expanded),
            arena,
            config,
        }
    }

    pub fn arena(&self) -> &TreeArena {
        &self.arena
    }

    pub fn state(&self) -> &TreeState {
        &self.state
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Recomputes the whole visible sequence from the root.
    pub fn render(&self) -> Result<Vec<RenderInstruction>> {
        render(&self.arena, &self.state, &self.config.traversal_options())
    }

    /// Flips one node's expansion flag and returns the new value.
    pub fn toggle(&mut self, id: &NodeId) -> bool {
        let expanded = self.state.toggle(id);
        debug!(node = %id, expanded, "toggle");
        expanded
    }

    /// Hands a truncated node over to `navigator`.
    pub fn continue_thread(&self, id: &NodeId, navigator: &mut dyn ThreadNavigator) -> Result<()> {
        if self.arena.index_of(id).is_none() {
            return Err(TreeError::UnknownNode { id: id.clone() });
        }

        let instructions = self.render()?;
        let instruction = instructions
            .iter()
            .find(|instruction| &instruction.node_id == id && instruction.truncated)
            .ok_or_else(|| TreeError::NotTruncated { id: id.clone() })?;

        navigator.navigate_to_thread(id, &instruction.label);
        Ok(())
    }
}
