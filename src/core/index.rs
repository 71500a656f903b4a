//! Multi-index and adjacency types for N-dimensional grids.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Integer multi-index addressing one cell of a `D`-dimensional grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellIndex<const D: usize>(pub [i32; D]);

// Derived `Default` would require `[i32; D]: Default`, which only holds
// for specific lengths.
impl<const D: usize> Default for CellIndex<D> {
    fn default() -> Self {
        Self([0; D])
    }
}

impl<const D: usize> CellIndex<D> {
    /// Create a new cell index from per-axis components.
    #[inline]
    pub fn new(components: [i32; D]) -> Self {
        Self(components)
    }

    /// Per-axis components.
    #[inline]
    pub fn components(&self) -> &[i32; D] {
        &self.0
    }

    /// Manhattan distance to another index (sum of per-axis distances).
    #[inline]
    pub fn manhattan_distance(&self, other: &CellIndex<D>) -> i32 {
        let mut total = 0;
        for axis in 0..D {
            total += (self.0[axis] - other.0[axis]).abs();
        }
        total
    }

    /// Chebyshev distance (max per-axis distance) - used for full-neighbor grids.
    #[inline]
    pub fn chebyshev_distance(&self, other: &CellIndex<D>) -> i32 {
        let mut max = 0;
        for axis in 0..D {
            max = max.max((self.0[axis] - other.0[axis]).abs());
        }
        max
    }

    /// Euclidean distance to another index, in cell units.
    #[inline]
    pub fn euclidean_distance(&self, other: &CellIndex<D>) -> f64 {
        let mut sum = 0.0;
        for axis in 0..D {
            let d = (self.0[axis] - other.0[axis]) as f64;
            sum += d * d;
        }
        sum.sqrt()
    }

    /// True if `other` is adjacent under the given neighbor mode.
    pub fn is_adjacent(&self, other: &CellIndex<D>, mode: NeighborMode) -> bool {
        if self == other {
            return false;
        }
        match mode {
            NeighborMode::Faces => self.manhattan_distance(other) == 1,
            NeighborMode::Full => self.chebyshev_distance(other) == 1,
        }
    }
}

impl<const D: usize> Add for CellIndex<D> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        let mut out = self.0;
        for axis in 0..D {
            out[axis] += other.0[axis];
        }
        CellIndex(out)
    }
}

impl<const D: usize> Sub for CellIndex<D> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        let mut out = self.0;
        for axis in 0..D {
            out[axis] -= other.0[axis];
        }
        CellIndex(out)
    }
}

/// Which cells count as neighbors during the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NeighborMode {
    /// Direct face neighbors only: 4-neighborhood in 2-D, 6 in 3-D, 2·D in general.
    #[default]
    Faces,
    /// Face plus diagonal neighbors: 8-neighborhood in 2-D, 26 in 3-D, 3^D − 1 in general.
    Full,
}

impl NeighborMode {
    /// Enumerate the neighbor offsets for this mode.
    ///
    /// Computed once per search run and reused for every expansion.
    pub fn offsets<const D: usize>(self) -> Vec<CellIndex<D>> {
        match self {
            NeighborMode::Faces => {
                let mut offsets = Vec::with_capacity(2 * D);
                for axis in 0..D {
                    for step in [-1, 1] {
                        let mut o = [0i32; D];
                        o[axis] = step;
                        offsets.push(CellIndex(o));
                    }
                }
                offsets
            }
            NeighborMode::Full => {
                let count = 3usize.pow(D as u32);
                let mut offsets = Vec::with_capacity(count - 1);
                for code in 0..count {
                    let mut o = [0i32; D];
                    let mut rest = code;
                    for item in o.iter_mut() {
                        *item = (rest % 3) as i32 - 1;
                        rest /= 3;
                    }
                    if o != [0i32; D] {
                        offsets.push(CellIndex(o));
                    }
                }
                offsets
            }
        }
    }

    /// Grid distance between two indices that lower-bounds the number of
    /// steps any path between them must take under this mode.
    #[inline]
    pub fn grid_distance<const D: usize>(self, a: &CellIndex<D>, b: &CellIndex<D>) -> i32 {
        match self {
            NeighborMode::Faces => a.manhattan_distance(b),
            NeighborMode::Full => a.chebyshev_distance(b),
        }
    }
}
