//! # Marga: Grid-Based Minimum-Cost Path Search
//!
//! A generic minimum-cost-path finder over N-dimensional scalar images,
//! driven by pluggable edge-cost strategies. Built for interactive
//! boundary tracing (live-wire contouring over gradient features) and for
//! threshold-guided structural path search over scalar fields.
//!
//! ## Features
//!
//! - **Dijkstra/A\* core**: flat node arena, binary-heap open set,
//!   admissible grid heuristic, single- or multi-target termination
//! - **Strategy-pattern costs**: [`cost::CostFunction`] trait with
//!   live-wire and threshold-band implementations
//! - **Derived outputs**: ordered coordinate paths, full distance fields,
//!   visitation-order fields, rasterized path images
//! - **Partial results**: an optional wall-clock budget turns long
//!   searches into best-effort partial results instead of errors
//!
//! ## Quick Start
//!
//! ```rust
//! use marga::{CellIndex, ScalarImage, SearchEngine};
//! use marga::cost::{CostFunction, ThresholdCostFunction};
//!
//! # fn main() -> marga::Result<()> {
//! // A scalar field with a bright band along row y = 2.
//! let image = ScalarImage::from_fn([5, 5], [1.0, 1.0], |c| {
//!     if c.components()[1] == 2 { 1.0 } else { 0.0 }
//! })?;
//!
//! let mut cost = ThresholdCostFunction::with_threshold(0.5);
//! cost.initialize(&image)?;
//!
//! let mut engine = SearchEngine::new(&image, &cost);
//! engine.set_start(CellIndex::new([0, 2]));
//! engine.add_target(CellIndex::new([4, 2]));
//! let outcome = engine.run()?;
//! assert!(outcome.all_targets_closed());
//!
//! let path = engine.path_to(CellIndex::new([4, 2])).unwrap();
//! assert_eq!(path.len(), 5); // follows the cheap band
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`](crate::core): fundamental types ([`CellIndex`], [`NeighborMode`])
//! - [`image`]: N-dimensional scalar storage and derived-field filters
//! - [`cost`]: the [`cost::CostFunction`] trait and supplied strategies
//! - [`search`]: the search engine, node arena, and run outcomes
//! - [`output`]: grid-shaped products of a finished search
//!
//! Flat indexing is row-major with axis 0 fastest throughout.

pub mod config;
pub mod core;
pub mod cost;
pub mod error;
pub mod image;
pub mod output;
pub mod search;

pub use crate::config::{MultiTargetPolicy, SearchConfig};
pub use crate::core::{CellIndex, NeighborMode};
pub use crate::error::{Result, SearchError};
pub use crate::image::{Region, ScalarImage};
pub use crate::output::OutputBuilder;
pub use crate::search::{Node, NodeState, SearchEngine, SearchOutcome, Termination};
