//! Live-wire edge-cost strategy for interactive boundary tracing.
//!
//! Cost is low wherever there is a strong, correctly oriented intensity
//! edge and high in flat regions. Three features are blended:
//!
//! 1. Gradient magnitude at the destination, remapped so strong edges are
//!    cheap (linearly by default, or through a dynamic cost map built from
//!    the inverted magnitude histogram)
//! 2. Gradient direction: stepping along an edge (perpendicular to the
//!    gradient) is cheaper than stepping across it
//! 3. Zero crossings of the Laplacian: landing on one is cheap
//!
//! A caller-managed set of repulsive cells always costs [`COST_MAX`],
//! letting an interactive user forbid the path from re-crossing a point.

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::CellIndex;
use crate::cost::{CostFunction, COST_MAX};
use crate::error::{Result, SearchError};
use crate::image::{gaussian_kernel, GradientField, Region, ScalarImage};

/// Quantization factor for dynamic cost map lookups: a gradient magnitude
/// `m` maps to bin `(m * MAP_SCALE_FACTOR) as usize`.
pub const MAP_SCALE_FACTOR: f64 = 10.0;

/// Live-wire feature weights and preprocessing parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LiveWireConfig {
    /// Gaussian smoothing sigma applied before feature extraction.
    pub sigma: f64,
    /// Weight of the gradient-magnitude term.
    pub weight_magnitude: f64,
    /// Weight of the gradient-direction term.
    pub weight_direction: f64,
    /// Weight of the zero-crossing term. Zero skips the Laplacian pass.
    pub weight_zero_crossing: f64,
}

impl Default for LiveWireConfig {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            weight_magnitude: 0.43,
            weight_direction: 0.43,
            weight_zero_crossing: 0.14,
        }
    }
}

impl LiveWireConfig {
    fn validate(&self) -> Result<()> {
        let weights = [
            self.weight_magnitude,
            self.weight_direction,
            self.weight_zero_crossing,
        ];
        if weights.iter().any(|&w| w < 0.0 || !w.is_finite()) {
            return Err(SearchError::InvalidConfig(
                "live-wire weights must be finite and non-negative".into(),
            ));
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(SearchError::InvalidConfig(
                "live-wire weights must not all be zero".into(),
            ));
        }
        Ok(())
    }
}

/// Live-wire cost strategy.
///
/// All derived fields are built once in [`initialize`](CostFunction::initialize)
/// and only read afterwards, so an initialized instance is safe for
/// concurrent `cost` queries.
pub struct LiveWireCostFunction<const D: usize> {
    config: LiveWireConfig,
    smoothed: Option<ScalarImage<D>>,
    gradient: Option<GradientField<D>>,
    max_magnitude: f64,
    zero_crossings: Vec<bool>,
    cost_map: Option<Vec<f64>>,
    cost_map_maximum: Option<f64>,
    repulsive: HashSet<CellIndex<D>>,
    region: Option<Region<D>>,
    start: Option<CellIndex<D>>,
    end: Option<CellIndex<D>>,
}

impl<const D: usize> LiveWireCostFunction<D> {
    /// Create a strategy with the given configuration.
    pub fn new(config: LiveWireConfig) -> Self {
        Self {
            config,
            smoothed: None,
            gradient: None,
            max_magnitude: 0.0,
            zero_crossings: Vec::new(),
            cost_map: None,
            cost_map_maximum: None,
            repulsive: HashSet::new(),
            region: None,
            start: None,
            end: None,
        }
    }

    /// Restrict cost evaluation to a sub-region; edges touching cells
    /// outside it cost [`COST_MAX`].
    pub fn set_region(&mut self, region: Option<Region<D>>) {
        self.region = region;
    }

    /// Forbid the path from entering `cell`.
    pub fn add_repulsive_point(&mut self, cell: CellIndex<D>) {
        self.repulsive.insert(cell);
    }

    /// Allow the path to enter `cell` again.
    pub fn remove_repulsive_point(&mut self, cell: CellIndex<D>) {
        self.repulsive.remove(&cell);
    }

    /// Clear all repulsive points.
    pub fn clear_repulsive_points(&mut self) {
        self.repulsive.clear();
    }

    /// Replace the magnitude-to-cost mapping with an externally built table,
    /// keyed by [`MAP_SCALE_FACTOR`] quantization. Magnitudes beyond the
    /// table clamp to its last entry.
    pub fn set_dynamic_cost_map(&mut self, map: Vec<f64>) -> Result<()> {
        if map.is_empty() {
            return Err(SearchError::InvalidConfig(
                "dynamic cost map must not be empty".into(),
            ));
        }
        if map.iter().any(|&v| v < 0.0 || !v.is_finite()) {
            return Err(SearchError::InvalidConfig(
                "dynamic cost map entries must be finite and non-negative".into(),
            ));
        }
        self.cost_map = Some(map);
        Ok(())
    }

    /// Drop the dynamic cost map and fall back to the linear remap.
    pub fn clear_dynamic_cost_map(&mut self) {
        self.cost_map = None;
    }

    /// Cap the magnitude range covered when building a dynamic cost map,
    /// bounding its size.
    pub fn set_cost_map_maximum(&mut self, maximum: f64) {
        self.cost_map_maximum = Some(maximum);
    }

    /// Gradient magnitudes computed by `initialize`, in flat-index order.
    pub fn gradient_magnitude(&self) -> Option<&[f64]> {
        self.gradient.as_ref().map(|g| g.magnitude.as_slice())
    }

    /// Start/end hints recorded through the [`CostFunction`] setters.
    /// Informational only; the blend does not depend on them.
    pub fn endpoints(&self) -> (Option<CellIndex<D>>, Option<CellIndex<D>>) {
        (self.start, self.end)
    }

    /// Build a dynamic cost map from the inverted histogram of the computed
    /// gradient magnitudes, smoothed with a 1-D Gaussian pass.
    ///
    /// Statistically common magnitudes become cheap even when they are not
    /// the largest in the image. One O(pixels) pass; requires `initialize`.
    pub fn build_dynamic_cost_map(&self, smoothing_sigma: f64) -> Result<Vec<f64>> {
        let gradient = self
            .gradient
            .as_ref()
            .ok_or(SearchError::CostFunctionNotInitialized)?;
        let cap = self.cost_map_maximum.unwrap_or(self.max_magnitude);
        let bins = ((cap * MAP_SCALE_FACTOR).ceil() as usize).max(1) + 1;

        let mut counts = vec![0u64; bins];
        for &m in &gradient.magnitude {
            let bin = ((m * MAP_SCALE_FACTOR) as usize).min(bins - 1);
            counts[bin] += 1;
        }
        let max_count = counts.iter().copied().max().unwrap_or(0);
        if max_count == 0 {
            return Ok(vec![1.0; bins]);
        }

        let inverted: Vec<f64> = counts
            .iter()
            .map(|&c| 1.0 - c as f64 / max_count as f64)
            .collect();

        // Smooth the table so neighboring bins get similar costs.
        let kernel = gaussian_kernel(smoothing_sigma.max(0.5));
        let radius = (kernel.len() / 2) as i64;
        let smoothed = (0..bins as i64)
            .map(|i| {
                kernel
                    .iter()
                    .enumerate()
                    .map(|(k, w)| {
                        let j = (i + k as i64 - radius).clamp(0, bins as i64 - 1);
                        w * inverted[j as usize]
                    })
                    .sum()
            })
            .collect();
        Ok(smoothed)
    }

    fn magnitude_cost(&self, magnitude: f64) -> f64 {
        if let Some(map) = &self.cost_map {
            let bin = ((magnitude * MAP_SCALE_FACTOR) as usize).min(map.len() - 1);
            map[bin]
        } else if self.max_magnitude > 0.0 {
            1.0 - magnitude / self.max_magnitude
        } else {
            1.0
        }
    }

    /// Direction term: mean |cos| of the angle between the physical step
    /// vector and the gradient at each endpoint. Zero when stepping along
    /// the edge, one when crossing it. Averaging both endpoints keeps the
    /// term symmetric under path reversal.
    fn direction_cost(
        &self,
        from_flat: usize,
        to_flat: usize,
        from: CellIndex<D>,
        to: CellIndex<D>,
    ) -> f64 {
        let gradient = match &self.gradient {
            Some(g) => g,
            None => return 1.0,
        };
        let spacing = match &self.smoothed {
            Some(image) => image.spacing(),
            None => return 1.0,
        };
        let step = to - from;
        let s: [f64; D] =
            std::array::from_fn(|axis| step.components()[axis] as f64 * spacing[axis]);
        let s_norm = s.iter().map(|c| c * c).sum::<f64>().sqrt();
        if s_norm <= f64::EPSILON {
            return 1.0;
        }
        // A vanishing gradient gives no orientation to follow; that
        // endpoint contributes the worst alignment.
        let alignment = |flat: usize| {
            let g = gradient.vector_at(flat);
            let g_norm = g.iter().map(|c| c * c).sum::<f64>().sqrt();
            if g_norm <= f64::EPSILON {
                return 1.0;
            }
            let dot: f64 = g.iter().zip(s.iter()).map(|(a, b)| a * b).sum();
            (dot / (g_norm * s_norm)).abs().min(1.0)
        };
        0.5 * (alignment(from_flat) + alignment(to_flat))
    }
}

impl<const D: usize> Default for LiveWireCostFunction<D> {
    fn default() -> Self {
        Self::new(LiveWireConfig::default())
    }
}

impl<const D: usize> CostFunction<D> for LiveWireCostFunction<D> {
    fn initialize(&mut self, image: &ScalarImage<D>) -> Result<()> {
        self.config.validate()?;
        let smoothed = image.smoothed(self.config.sigma);
        let gradient = smoothed.gradient();
        self.max_magnitude = gradient.max_magnitude();
        self.zero_crossings = if self.config.weight_zero_crossing > 0.0 {
            smoothed.laplacian_zero_crossings()
        } else {
            vec![false; smoothed.len()]
        };
        debug!(
            "[LiveWire] initialized: {} cells, max |grad| = {:.4}",
            smoothed.len(),
            self.max_magnitude
        );
        self.gradient = Some(gradient);
        self.smoothed = Some(smoothed);
        Ok(())
    }

    fn initialized_extent(&self) -> Option<[usize; D]> {
        self.smoothed.as_ref().map(|image| *image.extent())
    }

    fn cost(&self, from: CellIndex<D>, to: CellIndex<D>) -> f64 {
        let Some(image) = &self.smoothed else {
            return COST_MAX;
        };
        if self.repulsive.contains(&to) {
            return COST_MAX;
        }
        // Outside the requested region the sentinel keeps interactive
        // dragging responsive instead of failing the whole query.
        if let Some(region) = &self.region {
            if !region.contains(from) || !region.contains(to) {
                return COST_MAX;
            }
        }
        let (Some(from_flat), Some(to_flat)) = (image.index_of(from), image.index_of(to)) else {
            return COST_MAX;
        };
        let gradient = match &self.gradient {
            Some(g) => g,
            None => return COST_MAX,
        };

        let magnitude = self.magnitude_cost(gradient.magnitude[to_flat]);
        let direction = self.direction_cost(from_flat, to_flat, from, to);
        let zero_crossing = if self.zero_crossings[to_flat] { 0.0 } else { 1.0 };

        let w = &self.config;
        let total = w.weight_magnitude + w.weight_direction + w.weight_zero_crossing;
        (w.weight_magnitude * magnitude
            + w.weight_direction * direction
            + w.weight_zero_crossing * zero_crossing)
            / total
    }

    fn min_cost(&self) -> f64 {
        // A perfect, correctly oriented edge on a zero crossing costs nothing.
        0.0
    }

    fn set_start_index(&mut self, start: CellIndex<D>) {
        self.start = Some(start);
    }

    fn set_end_index(&mut self, end: CellIndex<D>) {
        self.end = Some(end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Vertical step edge at x = 4: 0 on the left, 10 on the right.
    fn edge_image() -> ScalarImage<2> {
        ScalarImage::from_fn([9, 9], [1.0, 1.0], |c| {
            if c.components()[0] < 4 { 0.0 } else { 10.0 }
        })
        .unwrap()
    }

    fn initialized(image: &ScalarImage<2>) -> LiveWireCostFunction<2> {
        let mut cf = LiveWireCostFunction::default();
        cf.initialize(image).unwrap();
        cf
    }

    #[test]
    fn test_uninitialized_cost_is_sentinel() {
        let cf = LiveWireCostFunction::<2>::default();
        assert!(!cf.is_initialized());
        let cost = cf.cost(CellIndex::new([0, 0]), CellIndex::new([1, 0]));
        assert_eq!(cost, COST_MAX);
    }

    #[test]
    fn test_flat_image_is_expensive() {
        let image = ScalarImage::filled([9, 9], [1.0, 1.0], 5.0).unwrap();
        let cf = initialized(&image);
        let cost = cf.cost(CellIndex::new([4, 4]), CellIndex::new([5, 4]));
        // No gradient, no zero crossings: every normalized term is 1.
        assert!((cost - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_edge_cheaper_than_flat_region() {
        let image = edge_image();
        let cf = initialized(&image);
        // Step along the edge, at the edge.
        let on_edge = cf.cost(CellIndex::new([4, 4]), CellIndex::new([4, 5]));
        // Step in the flat region far from the edge.
        let off_edge = cf.cost(CellIndex::new([1, 4]), CellIndex::new([1, 5]));
        assert!(on_edge < off_edge);
    }

    #[test]
    fn test_direction_prefers_steps_along_edge() {
        let image = edge_image();
        let cf = initialized(&image);
        let from = CellIndex::new([4, 4]);
        let from_flat = image.index_of(from).unwrap();
        let down = CellIndex::new([4, 5]);
        let right = CellIndex::new([5, 4]);
        let along = cf.direction_cost(from_flat, image.index_of(down).unwrap(), from, down);
        let across = cf.direction_cost(from_flat, image.index_of(right).unwrap(), from, right);
        assert!(along < 1e-9);
        assert!((across - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_direction_term_symmetric_under_reversal() {
        // A field whose gradient differs at every cell, so a one-sided
        // direction term would depend on the traversal direction.
        let image = ScalarImage::from_fn([9, 9], [1.0, 1.0], |c| {
            let [x, y] = *c.components();
            (x * x + 3 * y) as f64
        })
        .unwrap();
        let mut cf = LiveWireCostFunction::new(LiveWireConfig {
            weight_magnitude: 0.0,
            weight_direction: 1.0,
            weight_zero_crossing: 0.0,
            ..LiveWireConfig::default()
        });
        cf.initialize(&image).unwrap();
        for (a, b) in [
            (CellIndex::new([2, 3]), CellIndex::new([3, 3])),
            (CellIndex::new([5, 1]), CellIndex::new([5, 2])),
            (CellIndex::new([4, 4]), CellIndex::new([5, 5])),
        ] {
            let forward = cf.cost(a, b);
            let reverse = cf.cost(b, a);
            assert!(
                (forward - reverse).abs() < 1e-12,
                "cost({a:?}, {b:?}) = {forward} but cost({b:?}, {a:?}) = {reverse}"
            );
        }
    }

    #[test]
    fn test_repulsive_points() {
        let image = edge_image();
        let mut cf = initialized(&image);
        let from = CellIndex::new([4, 4]);
        let to = CellIndex::new([4, 5]);
        let normal = cf.cost(from, to);
        assert!(normal < COST_MAX);

        cf.add_repulsive_point(to);
        assert_eq!(cf.cost(from, to), COST_MAX);

        cf.remove_repulsive_point(to);
        assert_eq!(cf.cost(from, to), normal);

        cf.add_repulsive_point(to);
        cf.clear_repulsive_points();
        assert_eq!(cf.cost(from, to), normal);
    }

    #[test]
    fn test_region_restriction_returns_sentinel() {
        let image = edge_image();
        let mut cf = initialized(&image);
        cf.set_region(Some(Region::new(
            CellIndex::new([0, 0]),
            CellIndex::new([4, 4]),
        )));
        assert!(cf.cost(CellIndex::new([1, 1]), CellIndex::new([2, 1])) < COST_MAX);
        assert_eq!(cf.cost(CellIndex::new([4, 4]), CellIndex::new([5, 4])), COST_MAX);
    }

    #[test]
    fn test_out_of_bounds_returns_sentinel() {
        let image = edge_image();
        let cf = initialized(&image);
        assert_eq!(cf.cost(CellIndex::new([0, 0]), CellIndex::new([-1, 0])), COST_MAX);
    }

    #[test]
    fn test_dynamic_cost_map_lookup() {
        let image = edge_image();
        let mut cf = initialized(&image);
        // Magnitude term becomes a constant 0.25 for every bin.
        cf.set_dynamic_cost_map(vec![0.25; 64]).unwrap();
        let from = CellIndex::new([1, 4]);
        let to = CellIndex::new([2, 4]);
        let cost = cf.cost(from, to);
        // Step toward the edge: direction = 1, zero-crossing = 1, magnitude = 0.25.
        let w = LiveWireConfig::default();
        let expected = (w.weight_magnitude * 0.25 + w.weight_direction + w.weight_zero_crossing)
            / (w.weight_magnitude + w.weight_direction + w.weight_zero_crossing);
        assert!((cost - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_cost_map_rejected() {
        let image = edge_image();
        let mut cf = initialized(&image);
        assert!(matches!(
            cf.set_dynamic_cost_map(Vec::new()),
            Err(SearchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_histogram_map_makes_common_magnitudes_cheap() {
        let image = edge_image();
        let cf = initialized(&image);
        let map = cf.build_dynamic_cost_map(1.0).unwrap();
        // Zero gradient dominates the flat regions, so bin 0 must be among
        // the cheapest bins.
        let min = map.iter().cloned().fold(f64::INFINITY, f64::min);
        assert!((map[0] - min).abs() < 0.2);
        assert!(map.iter().all(|&v| (0.0..=1.0 + 1e-9).contains(&v)));
    }

    #[test]
    fn test_build_map_requires_initialize() {
        let cf = LiveWireCostFunction::<2>::default();
        assert!(matches!(
            cf.build_dynamic_cost_map(1.0),
            Err(SearchError::CostFunctionNotInitialized)
        ));
    }

    #[test]
    fn test_min_cost_is_zero() {
        let cf = LiveWireCostFunction::<2>::default();
        assert_eq!(cf.min_cost(), 0.0);
    }
}
