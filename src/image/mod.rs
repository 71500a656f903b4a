//! N-dimensional scalar image storage.
//!
//! - [`ScalarImage`]: owned, read-only scalar field with extent and per-axis
//!   physical spacing
//! - [`Region`]: axis-aligned sub-region used to restrict cost evaluation
//!
//! Flat indexing is row-major with axis 0 fastest; every component of the
//! library uses this one convention.

mod filters;

pub use filters::GradientField;
pub(crate) use filters::gaussian_kernel;

use crate::core::CellIndex;
use crate::error::{Result, SearchError};

/// An N-dimensional scalar field with a fixed extent and physical spacing.
#[derive(Clone, Debug)]
pub struct ScalarImage<const D: usize> {
    data: Vec<f64>,
    extent: [usize; D],
    spacing: [f64; D],
    strides: [usize; D],
}

impl<const D: usize> ScalarImage<D> {
    /// Create an image from raw data in flat-index order.
    ///
    /// Fails when any extent is zero or the data length does not match the
    /// extent product.
    pub fn new(extent: [usize; D], spacing: [f64; D], data: Vec<f64>) -> Result<Self> {
        if extent.iter().any(|&e| e == 0) {
            return Err(SearchError::EmptyGrid);
        }
        let len: usize = extent.iter().product();
        if data.len() != len {
            return Err(SearchError::ImageShapeMismatch {
                data_len: data.len(),
                extent_len: len,
            });
        }
        Ok(Self::from_parts(extent, spacing, data))
    }

    /// Create an image filled with a constant value.
    pub fn filled(extent: [usize; D], spacing: [f64; D], value: f64) -> Result<Self> {
        let len: usize = extent.iter().product();
        Self::new(extent, spacing, vec![value; len])
    }

    /// Create an image by evaluating `f` at every cell.
    pub fn from_fn(
        extent: [usize; D],
        spacing: [f64; D],
        mut f: impl FnMut(CellIndex<D>) -> f64,
    ) -> Result<Self> {
        if extent.iter().any(|&e| e == 0) {
            return Err(SearchError::EmptyGrid);
        }
        let len: usize = extent.iter().product();
        let image = Self::from_parts(extent, spacing, vec![0.0; len]);
        let data = (0..len).map(|i| f(image.cell_at(i))).collect();
        Ok(Self { data, ..image })
    }

    /// Internal constructor for shapes already known to be valid.
    pub(crate) fn from_parts(extent: [usize; D], spacing: [f64; D], data: Vec<f64>) -> Self {
        let mut strides = [1usize; D];
        for axis in 1..D {
            strides[axis] = strides[axis - 1] * extent[axis - 1];
        }
        Self {
            data,
            extent,
            spacing,
            strides,
        }
    }

    /// Extent in cells per axis.
    #[inline]
    pub fn extent(&self) -> &[usize; D] {
        &self.extent
    }

    /// Physical spacing per axis.
    #[inline]
    pub fn spacing(&self) -> &[f64; D] {
        &self.spacing
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; zero-extent images cannot be constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw data in flat-index order.
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Check if a multi-index is within the extent.
    #[inline]
    pub fn contains(&self, index: CellIndex<D>) -> bool {
        index
            .components()
            .iter()
            .zip(self.extent.iter())
            .all(|(&c, &e)| c >= 0 && (c as usize) < e)
    }

    /// Convert a multi-index to a flat index. `None` when out of bounds.
    #[inline]
    pub fn index_of(&self, index: CellIndex<D>) -> Option<usize> {
        if !self.contains(index) {
            return None;
        }
        let mut flat = 0;
        for axis in 0..D {
            flat += index.components()[axis] as usize * self.strides[axis];
        }
        Some(flat)
    }

    /// Convert a flat index back to a multi-index.
    #[inline]
    pub fn cell_at(&self, flat: usize) -> CellIndex<D> {
        let mut components = [0i32; D];
        let mut rest = flat;
        for axis in 0..D {
            components[axis] = (rest % self.extent[axis]) as i32;
            rest /= self.extent[axis];
        }
        CellIndex::new(components)
    }

    /// Value at a multi-index. `None` when out of bounds.
    #[inline]
    pub fn get(&self, index: CellIndex<D>) -> Option<f64> {
        self.index_of(index).map(|i| self.data[i])
    }

    /// Value at a flat index.
    #[inline]
    pub fn value_at(&self, flat: usize) -> f64 {
        self.data[flat]
    }

    /// Value at the cell whose component along `axis` is clamped into bounds.
    ///
    /// Used by the filters for border handling (nearest-neighbor extension).
    #[inline]
    pub(crate) fn value_clamped(&self, index: CellIndex<D>) -> f64 {
        let mut components = *index.components();
        for axis in 0..D {
            components[axis] = components[axis].clamp(0, self.extent[axis] as i32 - 1);
        }
        let clamped = CellIndex::new(components);
        // Clamping guarantees the index is in bounds.
        let mut flat = 0;
        for axis in 0..D {
            flat += clamped.components()[axis] as usize * self.strides[axis];
        }
        self.data[flat]
    }
}

/// Axis-aligned sub-region of a grid, inclusive on both corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region<const D: usize> {
    pub lower: CellIndex<D>,
    pub upper: CellIndex<D>,
}

impl<const D: usize> Region<D> {
    /// Create a region from inclusive lower/upper corners.
    pub fn new(lower: CellIndex<D>, upper: CellIndex<D>) -> Self {
        Self { lower, upper }
    }

    /// Check if an index lies inside the region.
    #[inline]
    pub fn contains(&self, index: CellIndex<D>) -> bool {
        for axis in 0..D {
            let c = index.components()[axis];
            if c < self.lower.components()[axis] || c > self.upper.components()[axis] {
                return false;
            }
        }
        true
    }
}
