//! Search run results.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Why the search loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Every registered target was closed (`MultiTargetPolicy::AllTargets`).
    AllTargetsReached,
    /// The first target closed (`MultiTargetPolicy::FirstTarget`).
    FirstTargetReached,
    /// The open set ran empty. Normal end of a `compute_all_distances` run;
    /// with targets it means at least one was unreachable.
    QueueExhausted,
    /// The wall-clock budget expired. The closed subset so far is a valid
    /// partial result.
    TimedOut,
}

/// Summary of a completed (or partially completed) search run.
///
/// The populated node arena stays on the engine for path extraction and
/// output building; this summary only reports how the run went.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Why the loop stopped.
    pub termination: Termination,
    /// Number of cells closed.
    pub closed_count: usize,
    /// Per registered target, in registration order: whether it was closed.
    pub targets_closed: Vec<bool>,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

impl SearchOutcome {
    /// True if every registered target was closed.
    pub fn all_targets_closed(&self) -> bool {
        self.targets_closed.iter().all(|&c| c)
    }
}
