//! Search engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::NeighborMode;

/// When a search with several targets is allowed to stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MultiTargetPolicy {
    /// Run until every registered target is closed. Each extracted path is
    /// independently optimal.
    #[default]
    AllTargets,
    /// Stop as soon as the first target closes; the remaining targets stay
    /// open or unvisited.
    FirstTarget,
}

/// Search engine configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Neighbor enumeration mode (face-only or full/diagonal).
    pub neighbor_mode: NeighborMode,

    /// Run until the open set is empty, producing a full distance field.
    /// Overrides target-based early exit and disables the heuristic.
    pub compute_all_distances: bool,

    /// Record the order in which cells are closed, for the visit-order image.
    pub record_visit_order: bool,

    /// Optional wall-clock budget. Expiry is a normal partial-result
    /// termination, not an error.
    pub time_budget: Option<Duration>,

    /// Use the admissible heuristic (A*). When disabled the search runs as
    /// plain Dijkstra, which is still correct but prunes less.
    pub use_heuristic: bool,

    /// Termination policy when several targets are registered.
    pub multi_target_policy: MultiTargetPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            neighbor_mode: NeighborMode::Faces,
            compute_all_distances: false,
            record_visit_order: false,
            time_budget: None,
            use_heuristic: true,
            multi_target_policy: MultiTargetPolicy::AllTargets,
        }
    }
}

impl SearchConfig {
    /// Enable full-neighbor (diagonal) adjacency.
    pub fn with_full_neighbors(mut self) -> Self {
        self.neighbor_mode = NeighborMode::Full;
        self
    }

    /// Compute distances for the whole grid instead of stopping at targets.
    pub fn with_all_distances(mut self) -> Self {
        self.compute_all_distances = true;
        self
    }

    /// Record the close order of every cell.
    pub fn with_visit_order(mut self) -> Self {
        self.record_visit_order = true;
        self
    }

    /// Abort the search after the given wall-clock budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Select the multi-target termination policy.
    pub fn with_multi_target_policy(mut self, policy: MultiTargetPolicy) -> Self {
        self.multi_target_policy = policy;
        self
    }
}
