//! Per-cell search records and the open-set entry type.

use std::cmp::Ordering;

/// Sentinel for "no predecessor" (the start cell, and unvisited cells).
pub const INVALID_PREDECESSOR: usize = usize::MAX;

/// Search state of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NodeState {
    /// Never relaxed; distance is +∞.
    #[default]
    Unvisited,
    /// Discovered with a finite distance, waiting in the open set.
    Open,
    /// Shortest distance finalized; never changes again.
    Closed,
}

/// Per-cell search record, one per grid cell in the engine's arena.
#[derive(Clone, Debug)]
pub struct Node {
    /// Best known cost from the start cell.
    pub distance: f64,
    /// `distance` plus the heuristic estimate; the open-set priority.
    pub estimate: f64,
    /// Flat index of the neighbor through which `distance` was achieved.
    pub predecessor: usize,
    /// Current search state.
    pub state: NodeState,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            distance: f64::INFINITY,
            estimate: f64::INFINITY,
            predecessor: INVALID_PREDECESSOR,
            state: NodeState::Unvisited,
        }
    }
}

/// Open-set entry referencing a node by flat index, ordered by `estimate`.
///
/// Re-pushed on every improvement; stale entries are skipped at pop time
/// via the `Closed` check.
#[derive(Clone, Copy, Debug)]
pub(crate) struct OpenEntry {
    pub(crate) index: usize,
    pub(crate) estimate: f64,
}

impl Eq for OpenEntry {}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.estimate == other.estimate
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior.
        other
            .estimate
            .partial_cmp(&self.estimate)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
