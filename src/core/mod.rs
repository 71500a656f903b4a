//! Core types for the marga path search library.
//!
//! This module provides the fundamental types used throughout the library:
//! - [`CellIndex`]: integer multi-index addressing one grid cell
//! - [`NeighborMode`]: face-only vs. full (diagonal) adjacency

mod index;

pub use index::{CellIndex, NeighborMode};
