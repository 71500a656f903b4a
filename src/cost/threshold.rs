//! Threshold-band cost strategy over a scalar field.
//!
//! Cells at or above the threshold are cheap to traverse, everything else
//! is expensive. Used for structural pathfinding along statistical maps
//! rather than intensity edges.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::CellIndex;
use crate::cost::{CostFunction, COST_MAX};
use crate::error::{Result, SearchError};
use crate::image::ScalarImage;

/// Threshold strategy parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Values at or above this are inside the band.
    pub threshold: f64,
    /// Edge cost inside the band.
    pub low_cost: f64,
    /// Edge cost outside the band.
    pub high_cost: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            low_cost: 1.0,
            high_cost: 1000.0,
        }
    }
}

impl ThresholdConfig {
    fn validate(&self) -> Result<()> {
        if !(0.0..).contains(&self.low_cost) || !self.low_cost.is_finite() {
            return Err(SearchError::InvalidConfig(
                "low_cost must be finite and non-negative".into(),
            ));
        }
        if self.high_cost < self.low_cost || !self.high_cost.is_finite() {
            return Err(SearchError::InvalidConfig(
                "high_cost must be finite and >= low_cost".into(),
            ));
        }
        Ok(())
    }
}

/// Threshold-band cost strategy.
///
/// `initialize` latches a copy of the field values; `cost` reads the value
/// at the destination cell.
pub struct ThresholdCostFunction<const D: usize> {
    config: ThresholdConfig,
    field: Option<ScalarImage<D>>,
}

impl<const D: usize> ThresholdCostFunction<D> {
    /// Create a strategy with the given configuration.
    pub fn new(config: ThresholdConfig) -> Self {
        Self {
            config,
            field: None,
        }
    }

    /// Create a strategy with default costs and the given threshold.
    pub fn with_threshold(threshold: f64) -> Self {
        Self::new(ThresholdConfig {
            threshold,
            ..ThresholdConfig::default()
        })
    }
}

impl<const D: usize> CostFunction<D> for ThresholdCostFunction<D> {
    fn initialize(&mut self, image: &ScalarImage<D>) -> Result<()> {
        self.config.validate()?;
        debug!(
            "[Threshold] initialized: {} cells, threshold = {}",
            image.len(),
            self.config.threshold
        );
        self.field = Some(image.clone());
        Ok(())
    }

    fn initialized_extent(&self) -> Option<[usize; D]> {
        self.field.as_ref().map(|image| *image.extent())
    }

    fn cost(&self, _from: CellIndex<D>, to: CellIndex<D>) -> f64 {
        let Some(field) = &self.field else {
            return COST_MAX;
        };
        match field.get(to) {
            Some(value) if value >= self.config.threshold => self.config.low_cost,
            Some(_) => self.config.high_cost,
            None => COST_MAX,
        }
    }

    fn min_cost(&self) -> f64 {
        self.config.low_cost
    }
}
