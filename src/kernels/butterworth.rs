//! Butterworth low-pass envelope in the frequency domain.

use ndarray::{ArrayD, IxDyn};
use rayon::prelude::*;

use crate::grid::GridDescriptor;

/// Generate a Butterworth low-pass envelope.
///
/// `K = 1 / (1 + (r / cutoff)^(2 * order))` where `r` is the Euclidean
/// radius from the grid center, normalized per axis by the grid extent so
/// that `r = 0.5` corresponds to the Nyquist corner. The envelope guards the
/// filter bank against spectral leakage at high frequency: it is 1 at the
/// center, 0.5 at `r == cutoff`, and rolls off with a steepness set by the
/// order.
///
/// `cutoff` must lie in `(0, 0.5]` and `order` must be positive; the filter
/// bank builder validates both before this function runs.
pub fn butterworth_low_pass(grid: &GridDescriptor, cutoff: f64, order: f64) -> ArrayD<f64> {
    debug_assert!(cutoff > 0.0 && cutoff <= 0.5);
    debug_assert!(order > 0.0);

    let shape = grid.size().to_vec();
    let center = grid.center();
    let exponent = 2.0 * order;

    let mut kernel = ArrayD::zeros(IxDyn(&shape));
    kernel
        .as_slice_mut()
        .expect("ndarray uses contiguous layout")
        .par_iter_mut()
        .enumerate()
        .for_each(|(linear, value)| {
            let mut remainder = linear;
            let mut radius_squared = 0.0;
            for axis in (0..shape.len()).rev() {
                let extent = shape[axis];
                let i = remainder % extent;
                remainder /= extent;
                let dist = (center[axis] - i as f64) / extent as f64;
                radius_squared += dist * dist;
            }
            let radius = radius_squared.sqrt();
            *value = 1.0 / (1.0 + (radius / cutoff).powf(exponent));
        });
    kernel
}
