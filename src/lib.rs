//! # Treeline
//!
//! Bounded, stateful tree formatting. A caller hands over an immutable tree
//! (file system, comment thread or menu), toggles nodes open and closed, and
//! gets back an ordered list of [`RenderInstruction`]s describing what to draw.
//!
//! ```
//! use treeline::{DocumentParser, NodeId, RenderSession, ViewConfig, ViewKind};
//!
//! let doc = DocumentParser::new(ViewKind::FileTree)
//!     .parse_str(r#"{"id": 1, "name": "Root", "children": [{"id": 2, "name": "a.txt"}]}"#)
//!     .unwrap();
//! let mut session = RenderSession::new(doc.arena, ViewConfig::preset(ViewKind::FileTree));
//!
//! assert_eq!(session.render().unwrap().len(), 1);
//! session.toggle(&NodeId::from("1"));
//! assert_eq!(session.render().unwrap().len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod parser;
pub mod renderer;
pub mod session;
pub mod tree;

pub use config::*;
pub use error::TreeError;
pub use parser::*;
pub use renderer::*;
pub use session::*;
pub use tree::*;

#[cfg(test)]
mod tests;
