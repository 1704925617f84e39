pub mod arena;
pub mod state;
pub mod traversal;

pub use arena::*;
pub use state::*;
pub use traversal::*;
