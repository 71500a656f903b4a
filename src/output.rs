//! Output products derived from a finished search.
//!
//! [`OutputBuilder`] reads the engine's populated node arena without
//! re-running the search and produces:
//!
//! - a distance-field image (meaningful with `compute_all_distances`)
//! - a visit-order image (meaningful with `record_visit_order`)
//! - a rasterized path image (foreground over background)

use crate::error::{Result, SearchError};
use crate::image::ScalarImage;
use crate::search::{NodeState, SearchEngine};

/// Builder for grid-shaped output products of a completed search.
pub struct OutputBuilder<'e, 'a, const D: usize> {
    engine: &'e SearchEngine<'a, D>,
}

impl<'e, 'a, const D: usize> OutputBuilder<'e, 'a, D> {
    /// Wrap a finished engine. Fails when no run has populated the arena.
    pub fn new(engine: &'e SearchEngine<'a, D>) -> Result<Self> {
        if engine.nodes().is_empty() {
            return Err(SearchError::NoSearchRun);
        }
        Ok(Self { engine })
    }

    /// Final distance per cell, `f64::INFINITY` for cells never reached.
    ///
    /// Covers the whole grid only after a `compute_all_distances` run;
    /// otherwise unexplored cells carry the infinity sentinel.
    pub fn distance_image(&self) -> ScalarImage<D> {
        let image = self.engine.image();
        let data = self
            .engine
            .nodes()
            .iter()
            .map(|node| match node.state {
                NodeState::Unvisited => f64::INFINITY,
                _ => node.distance,
            })
            .collect();
        ScalarImage::from_parts(*image.extent(), *image.spacing(), data)
    }

    /// 1-based close order per cell, 0 for never-closed cells.
    ///
    /// Empty (all zeros) unless `record_visit_order` was enabled; useful
    /// for inspecting how far a timed-out search progressed.
    pub fn visit_order_image(&self) -> ScalarImage<D> {
        let image = self.engine.image();
        let mut data = vec![0.0; image.len()];
        for (order, &flat) in self.engine.visit_order().iter().enumerate() {
            data[flat] = (order + 1) as f64;
        }
        ScalarImage::from_parts(*image.extent(), *image.spacing(), data)
    }

    /// Paint every extractable path onto a background-filled image.
    ///
    /// Targets that were never closed contribute nothing.
    pub fn rasterize_paths(&self, foreground: f64, background: f64) -> ScalarImage<D> {
        let image = self.engine.image();
        let mut data = vec![background; image.len()];
        for path in self.engine.paths().into_iter().flatten() {
            for cell in path {
                if let Some(flat) = image.index_of(cell) {
                    data[flat] = foreground;
                }
            }
        }
        ScalarImage::from_parts(*image.extent(), *image.spacing(), data)
    }
}
