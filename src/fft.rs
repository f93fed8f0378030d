//! N-dimensional Fourier transforms composed from 1-D FFT plans.
//!
//! The transform is separable: each axis is processed with a 1-D plan over
//! every lane along that axis. Both directions are unnormalized, matching the
//! raw plan output; the engine compensates by dividing the spectrum modulus
//! by the pixel count instead of assuming a unitary inverse.

use ndarray::{ArrayD, Axis, IxDyn};
use rayon::prelude::*;
use rustfft::{num_complex::Complex, FftPlanner};

use crate::error::{PhaseSymmetryError, PhaseSymmetryResult};
use crate::grid::{ravel_index, unravel_index};

/// N-dimensional FFT provider. Plans are cached per axis length for the
/// lifetime of the provider.
pub struct NdFft {
    planner: FftPlanner<f64>,
}

impl NdFft {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    /// In-place forward transform along every axis.
    pub fn forward(&mut self, data: &mut ArrayD<Complex<f64>>) -> PhaseSymmetryResult<()> {
        self.transform(data, true)
    }

    /// In-place inverse transform along every axis. Unnormalized: the caller
    /// owns the 1/N scaling.
    pub fn inverse(&mut self, data: &mut ArrayD<Complex<f64>>) -> PhaseSymmetryResult<()> {
        self.transform(data, false)
    }

    fn transform(
        &mut self,
        data: &mut ArrayD<Complex<f64>>,
        forward: bool,
    ) -> PhaseSymmetryResult<()> {
        if data.is_empty() {
            return Err(PhaseSymmetryError::transform("empty input buffer"));
        }
        let dims = data.ndim();
        for axis in 0..dims {
            let len = data.shape()[axis];
            let fft = if forward {
                self.planner.plan_fft_forward(len)
            } else {
                self.planner.plan_fft_inverse(len)
            };
            let mut buffer = vec![Complex::new(0.0, 0.0); len];
            for mut lane in data.lanes_mut(Axis(axis)) {
                for (dst, src) in buffer.iter_mut().zip(lane.iter()) {
                    *dst = *src;
                }
                fft.process(&mut buffer);
                for (dst, src) in lane.iter_mut().zip(buffer.iter()) {
                    *dst = *src;
                }
            }
        }
        Ok(())
    }
}

impl Default for NdFft {
    fn default() -> Self {
        Self::new()
    }
}

/// Promote a real buffer to a complex one with zero imaginary parts.
pub fn to_complex(data: &ArrayD<f64>) -> ArrayD<Complex<f64>> {
    data.mapv(|v| Complex::new(v, 0.0))
}

/// Swap opposing half-spaces along every axis so that a kernel generated with
/// its DC response at the grid center lines up with a spectrum whose DC sits
/// at index zero. Each axis is rolled by `extent / 2`.
pub fn fft_shift(input: &ArrayD<f64>) -> ArrayD<f64> {
    let shape = input.shape().to_vec();
    let dims = shape.len();
    let src = input
        .as_slice()
        .expect("ndarray uses contiguous layout");
    let mut shifted = vec![0.0; src.len()];
    shifted
        .par_iter_mut()
        .enumerate()
        .for_each(|(linear, value)| {
            let mut index = vec![0usize; dims];
            unravel_index(linear, &shape, &mut index);
            for (slot, &extent) in index.iter_mut().zip(shape.iter()) {
                *slot = (*slot + extent / 2) % extent;
            }
            *value = src[ravel_index(&index, &shape)];
        });
    ArrayD::from_shape_vec(IxDyn(&shape), shifted).expect("shape preserved by shift")
}
