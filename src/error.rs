use thiserror::Error;

use crate::tree::NodeId;

/// Failures raised while building or walking a tree.
///
/// Toggling never fails; every other entry point reports malformed input
/// through one of these variants instead of looping or overflowing the stack.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("duplicate node id `{id}`")]
    DuplicateId { id: NodeId },

    #[error("root node `{id}` not found in index")]
    MissingRoot { id: NodeId },

    #[error("malformed structure: node `{id}` is its own ancestor")]
    Cycle { id: NodeId },

    #[error("malformed structure: node `{id}` is reachable from more than one parent")]
    SharedNode { id: NodeId },

    #[error("malformed structure: nesting exceeds {limit} levels")]
    NestingLimit { limit: usize },

    #[error("node `{id}` is not in this tree")]
    UnknownNode { id: NodeId },

    #[error("node `{id}` is not truncated in the current view")]
    NotTruncated { id: NodeId },
}

pub type Result<T> = std::result::Result<T, TreeError>;
