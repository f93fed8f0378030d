//! Scalar images over a sampling grid.

use ndarray::{ArrayD, IxDyn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{PhaseSymmetryError, PhaseSymmetryResult};
use crate::grid::{unravel_index, GridDescriptor};

/// A real-valued image sampled on a [`GridDescriptor`].
///
/// Pairs the raw sample buffer with the grid metadata so that every consumer
/// can verify it is operating in the coordinate system the filter bank was
/// built for.
///
/// # Examples
///
/// ```
/// use phasesym::{GridDescriptor, ScalarImage};
///
/// let grid = GridDescriptor::isotropic(&[4, 4]).unwrap();
/// let image = ScalarImage::zeros(grid);
/// assert_eq!(image.statistics().max, 0.0);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScalarImage {
    grid: GridDescriptor,
    data: ArrayD<f64>,
}

/// Summary statistics of an image, used by the run log.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImageStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ScalarImage {
    /// Create an all-zero image on the given grid.
    pub fn zeros(grid: GridDescriptor) -> Self {
        let data = ArrayD::zeros(IxDyn(grid.size()));
        Self { grid, data }
    }

    /// Create an image by evaluating `f` at every grid index in parallel.
    pub fn from_fn<F>(grid: GridDescriptor, f: F) -> Self
    where
        F: Fn(&[usize]) -> f64 + Sync,
    {
        let shape = grid.size().to_vec();
        let dims = shape.len();
        let mut data = ArrayD::zeros(IxDyn(&shape));
        data.as_slice_mut()
            .expect("ndarray uses contiguous layout")
            .par_iter_mut()
            .enumerate()
            .for_each(|(linear, value)| {
                let mut index = vec![0usize; dims];
                unravel_index(linear, &shape, &mut index);
                *value = f(&index);
            });
        Self { grid, data }
    }

    /// Wrap an existing buffer, verifying it matches the grid extents.
    pub fn from_parts(grid: GridDescriptor, data: ArrayD<f64>) -> PhaseSymmetryResult<Self> {
        if data.shape() != grid.size() {
            return Err(PhaseSymmetryError::grid_mismatch(
                grid.size(),
                data.shape(),
                "image construction",
            ));
        }
        Ok(Self { grid, data })
    }

    pub fn grid(&self) -> &GridDescriptor {
        &self.grid
    }

    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// Sample value at a multi-index.
    pub fn get(&self, index: &[usize]) -> f64 {
        self.data[IxDyn(index)]
    }

    /// Set the sample value at a multi-index.
    pub fn set(&mut self, index: &[usize], value: f64) {
        self.data[IxDyn(index)] = value;
    }

    /// Min, max, and mean over all samples.
    pub fn statistics(&self) -> ImageStatistics {
        let slice = self
            .data
            .as_slice()
            .expect("ndarray uses contiguous layout");
        let (min, max, sum) = slice
            .par_iter()
            .fold(
                || (f64::INFINITY, f64::NEG_INFINITY, 0.0),
                |(min, max, sum), &v| (min.min(v), max.max(v), sum + v),
            )
            .reduce(
                || (f64::INFINITY, f64::NEG_INFINITY, 0.0),
                |a, b| (a.0.min(b.0), a.1.max(b.1), a.2 + b.2),
            );
        ImageStatistics {
            min,
            max,
            mean: sum / slice.len() as f64,
        }
    }
}
