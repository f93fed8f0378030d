//! Multi-dimensional sinusoid evaluated at physical grid points.

use std::f64::consts::PI;

use crate::error::{PhaseSymmetryError, PhaseSymmetryResult};
use crate::grid::GridDescriptor;
use crate::image::ScalarImage;

/// A cosine pattern over physical space.
///
/// The value at a physical point `p` is
/// `cos(2 * pi * sum_i(frequency[i] * p[i]) + phase_offset)`, so the
/// frequencies are in cycles per physical unit along each axis. Useful for
/// producing inputs with a known spectral content.
///
/// # Examples
///
/// ```
/// use phasesym::{GridDescriptor, SinusoidSource};
///
/// let grid = GridDescriptor::isotropic(&[32, 32]).unwrap();
/// let source = SinusoidSource::new(vec![0.125, 0.0], 0.0);
/// let image = source.generate(&grid).unwrap();
/// assert!((image.get(&[0, 0]) - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct SinusoidSource {
    frequency: Vec<f64>,
    phase_offset: f64,
}

impl SinusoidSource {
    /// Frequencies in cycles per physical unit, one per axis, plus a phase
    /// offset in radians.
    pub fn new(frequency: Vec<f64>, phase_offset: f64) -> Self {
        Self {
            frequency,
            phase_offset,
        }
    }

    pub fn frequency(&self) -> &[f64] {
        &self.frequency
    }

    pub fn phase_offset(&self) -> f64 {
        self.phase_offset
    }

    /// Evaluate the sinusoid at every physical point of `grid`.
    pub fn generate(&self, grid: &GridDescriptor) -> PhaseSymmetryResult<ScalarImage> {
        if self.frequency.len() != grid.dimension() {
            return Err(PhaseSymmetryError::grid_mismatch(
                &[grid.dimension()],
                &[self.frequency.len()],
                "sinusoid generation",
            ));
        }
        let frequency = self.frequency.clone();
        let phase_offset = self.phase_offset;
        let grid_for_eval = grid.clone();
        let dims = grid.dimension();
        Ok(ScalarImage::from_fn(grid.clone(), move |index| {
            let mut point = vec![0.0; dims];
            grid_for_eval.physical_point(index, &mut point);
            let argument: f64 = point
                .iter()
                .zip(frequency.iter())
                .map(|(p, f)| p * f)
                .sum();
            (2.0 * PI * argument + phase_offset).cos()
        }))
    }
}
