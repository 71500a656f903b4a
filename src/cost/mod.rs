//! Edge-cost strategies for the search engine.
//!
//! This module defines the [`CostFunction`] trait which allows different
//! edge-cost models to be used interchangeably, plus the two supplied
//! strategies:
//!
//! - [`LiveWireCostFunction`]: gradient/direction/zero-crossing blend for
//!   interactive boundary tracing
//! - [`ThresholdCostFunction`]: threshold-band cost over a scalar field

mod live_wire;
mod threshold;

pub use live_wire::{LiveWireConfig, LiveWireCostFunction, MAP_SCALE_FACTOR};
pub use threshold::{ThresholdConfig, ThresholdCostFunction};

use crate::core::CellIndex;
use crate::error::Result;
use crate::image::ScalarImage;

/// Sentinel cost for forbidden edges.
///
/// The engine saturates accumulated distances at this value, so cells any
/// number of sentinel edges deep keep a finite distance, distinguishable
/// from the infinity of a never-reached cell.
pub const COST_MAX: f64 = f64::MAX / 2.0;

/// Trait for edge-cost strategies.
///
/// Implementations precompute whatever derived fields they need in
/// [`initialize`](CostFunction::initialize) and answer
/// [`cost`](CostFunction::cost) queries from those caches without further
/// mutation, so a single initialized strategy can serve concurrent
/// read-only searches.
///
/// Contract for implementers: `cost` must return values `>= min_cost()`
/// and finite for traversable edges, [`COST_MAX`] for forbidden ones, and
/// never a negative value. The engine does not detect violations; they
/// void the shortest-path guarantee.
pub trait CostFunction<const D: usize>: Send + Sync {
    /// One-time precomputation over the grid. Must be called before any
    /// `cost` query; the engine refuses to run otherwise.
    fn initialize(&mut self, image: &ScalarImage<D>) -> Result<()>;

    /// Extent of the image this strategy was initialized for, or `None`
    /// before initialization.
    fn initialized_extent(&self) -> Option<[usize; D]>;

    /// Whether `initialize` has completed.
    fn is_initialized(&self) -> bool {
        self.initialized_extent().is_some()
    }

    /// Cost of the directed edge from `from` to its neighbor `to`.
    fn cost(&self, from: CellIndex<D>, to: CellIndex<D>) -> f64;

    /// Constant lower bound over all edge costs, used as the per-step
    /// heuristic increment. Zero degrades the search to plain Dijkstra.
    fn min_cost(&self) -> f64;

    /// Optional hint: the start cell of the upcoming search. Strategies may
    /// use it to bias costs; correctness must not depend on it.
    fn set_start_index(&mut self, _start: CellIndex<D>) {}

    /// Optional hint: the end cell of the upcoming search.
    fn set_end_index(&mut self, _end: CellIndex<D>) {}
}
