//! Steerable angular selectivity response in the frequency domain.

use ndarray::{ArrayD, IxDyn};
use rayon::prelude::*;

use crate::grid::GridDescriptor;

/// Generate the angular response for one orientation.
///
/// For each grid index the angle `theta` in `[0, pi]` between the frequency
/// offset `(x - c)` and the orientation vector is recovered through a
/// clamped arccos of the normalized dot product. The response is one-sided:
/// offsets opposing the orientation land near `theta == pi` and are
/// attenuated. The resulting asymmetric pass-band is what gives the
/// filtered signal its quadrature (imaginary) component; pairing a
/// direction with its negation is the energy accumulation's job, not the
/// kernel's.
///
/// The falloff is Gaussian in `theta` with a spread of half the angular
/// bandwidth, so the response is exactly 1 along the positive orientation
/// direction and decreases monotonically with angular distance. The center
/// sample, which has no direction, maps to 1; the radial kernel suppresses
/// DC anyway.
pub fn steerable_angular(
    grid: &GridDescriptor,
    orientation: &[f64],
    angular_bandwidth: f64,
) -> ArrayD<f64> {
    debug_assert_eq!(orientation.len(), grid.dimension());
    debug_assert!(angular_bandwidth > 0.0);

    let shape = grid.size().to_vec();
    let center = grid.center();

    let orientation_norm = orientation.iter().map(|v| v * v).sum::<f64>().sqrt();
    debug_assert!(orientation_norm > 0.0);
    let unit: Vec<f64> = orientation.iter().map(|v| v / orientation_norm).collect();

    let spread = angular_bandwidth / 2.0;
    let denominator = 2.0 * spread * spread;

    let mut kernel = ArrayD::zeros(IxDyn(&shape));
    kernel
        .as_slice_mut()
        .expect("ndarray uses contiguous layout")
        .par_iter_mut()
        .enumerate()
        .for_each(|(linear, value)| {
            let mut remainder = linear;
            let mut dot = 0.0;
            let mut norm_squared = 0.0;
            for axis in (0..shape.len()).rev() {
                let extent = shape[axis];
                let i = remainder % extent;
                remainder /= extent;
                let offset = i as f64 - center[axis];
                dot += offset * unit[axis];
                norm_squared += offset * offset;
            }
            *value = if norm_squared == 0.0 {
                1.0
            } else {
                let cosine = (dot / norm_squared.sqrt()).clamp(-1.0, 1.0);
                let theta = cosine.acos();
                (-(theta * theta) / denominator).exp()
            };
        });
    kernel
}
