//! Filter bank construction.
//!
//! A bank is built once per configuration and grid, then shared read-only by
//! every image computation. Each entry is the product of a radial Log-Gabor
//! response (already multiplied by the shared Butterworth envelope) and an
//! angular steerable response, quadrant-shifted so its DC sample lines up
//! with the spectrum convention of the FFT provider.

use ndarray::ArrayD;

use crate::config::PhaseSymmetryParams;
use crate::error::PhaseSymmetryResult;
use crate::fft::fft_shift;
use crate::grid::GridDescriptor;
use crate::kernels::{butterworth_low_pass, log_gabor_radial, steerable_angular};

/// Precomputed frequency-domain filters indexed by (scale, orientation).
///
/// Immutable after construction; a bank built for one grid can filter any
/// number of images sampled on that same grid.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterBank {
    grid: GridDescriptor,
    kernels: Vec<ArrayD<f64>>,
    scales: usize,
    orientations: usize,
}

impl FilterBank {
    /// Build the bank: validate the parameters against the grid, generate
    /// the kernel families, and combine them per (scale, orientation).
    pub fn build(grid: &GridDescriptor, params: &PhaseSymmetryParams) -> PhaseSymmetryResult<Self> {
        params.validate(grid.dimension())?;

        let low_pass = butterworth_low_pass(grid, params.cutoff, params.order);

        let mut radial = Vec::with_capacity(params.wavelengths.nrows());
        for wavelengths in params.wavelengths.rows() {
            let kernel = log_gabor_radial(
                grid,
                wavelengths.as_slice().expect("row view is contiguous"),
                params.sigma,
            );
            radial.push(&kernel * &low_pass);
        }

        let mut angular = Vec::with_capacity(params.orientations.nrows());
        for orientation in params.orientations.rows() {
            angular.push(steerable_angular(
                grid,
                orientation.as_slice().expect("row view is contiguous"),
                params.angular_bandwidth,
            ));
        }

        let scales = radial.len();
        let orientations = angular.len();
        let mut kernels = Vec::with_capacity(scales * orientations);
        for radial_kernel in &radial {
            for angular_kernel in &angular {
                let combined = radial_kernel * angular_kernel;
                kernels.push(fft_shift(&combined));
            }
        }

        Ok(Self {
            grid: grid.clone(),
            kernels,
            scales,
            orientations,
        })
    }

    pub fn grid(&self) -> &GridDescriptor {
        &self.grid
    }

    pub fn scale_count(&self) -> usize {
        self.scales
    }

    pub fn orientation_count(&self) -> usize {
        self.orientations
    }

    /// The filter for scale `w`, orientation `o`.
    pub fn kernel(&self, scale: usize, orientation: usize) -> &ArrayD<f64> {
        &self.kernels[scale * self.orientations + orientation]
    }
}
