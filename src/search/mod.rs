//! Dijkstra/A* search over the grid.
//!
//! - [`SearchEngine`]: the priority-search core and path extraction
//! - [`Node`] / [`NodeState`]: per-cell arena records
//! - [`SearchOutcome`] / [`Termination`]: run results

mod engine;
mod node;
mod outcome;

pub use engine::SearchEngine;
pub use node::{Node, NodeState, INVALID_PREDECESSOR};
pub use outcome::{SearchOutcome, Termination};
