//! Log-Gabor radial band-pass response, defined directly in the frequency
//! domain.

use ndarray::{ArrayD, IxDyn};
use rayon::prelude::*;

use crate::grid::GridDescriptor;

/// Generate the radial Log-Gabor response for one scale.
///
/// For each grid index `x` the normalized, wavelength-weighted radius is
///
/// ```text
/// r = sqrt( sum_i ((c_i - x_i) / size_i)^2 * wavelength_i^2 )
/// ```
///
/// with `c` the grid center. The response is
/// `exp(-(ln r)^2 / (2 (ln sigma)^2))`, and exactly `0` where `r == 0` so
/// the DC sample never evaluates `ln(0)`.
///
/// `sigma` must be positive and not equal to one; the filter bank builder
/// rejects other values before this function runs.
///
/// # Examples
///
/// ```
/// use phasesym::{log_gabor_radial, GridDescriptor};
///
/// let grid = GridDescriptor::isotropic(&[8, 8]).unwrap();
/// let kernel = log_gabor_radial(&grid, &[10.0, 10.0], 0.55);
/// // DC sample sits at the grid center and is zero by definition.
/// assert_eq!(kernel[[4, 4]], 0.0);
/// ```
pub fn log_gabor_radial(grid: &GridDescriptor, wavelengths: &[f64], sigma: f64) -> ArrayD<f64> {
    debug_assert_eq!(wavelengths.len(), grid.dimension());
    debug_assert!(sigma > 0.0 && sigma != 1.0);

    let shape = grid.size().to_vec();
    let center = grid.center();
    // Precompute 2 (ln sigma)^2 once; it is the only use of sigma.
    let log_sigma = sigma.ln();
    let denominator = 2.0 * log_sigma * log_sigma;

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
                radius_squared += dist * dist * wavelengths[axis] * wavelengths[axis];
            }
            let radius = radius_squared.sqrt();
            *value = if radius == 0.0 {
                0.0
            } else {
                let log_radius = radius.ln();
                (-(log_radius * log_radius) / denominator).exp()
            };
        });
    kernel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_sample_is_zero_not_nan() {
        let grid = GridDescriptor::isotropic(&[16, 16]).unwrap();
        let kernel = log_gabor_radial(&grid, &[10.0, 10.0], 0.55);
        assert_eq!(kernel[[8, 8]], 0.0);
        assert!(kernel.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn values_stay_in_unit_range() {
        let grid = GridDescriptor::isotropic(&[32, 32]).unwrap();
        let kernel = log_gabor_radial(&grid, &[10.0, 10.0], 0.55);
        assert!(kernel.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn peak_sits_at_the_tuned_frequency() {
        // The log-Gabor response is 1 where the weighted radius equals 1,
        // i.e. where dist * wavelength == 1 along a single axis.
        let grid = GridDescriptor::isotropic(&[64, 64]).unwrap();
        let kernel = log_gabor_radial(&grid, &[4.0, 4.0], 0.55);
        // dist = (32 - 16) / 64 = 0.25, weighted radius = 0.25 * 4 = 1.
        assert!((kernel[[16, 32]] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn three_dimensional_grids_are_supported() {
        let grid = GridDescriptor::isotropic(&[8, 8, 8]).unwrap();
        let kernel = log_gabor_radial(&grid, &[10.0, 10.0, 10.0], 0.55);
        assert_eq!(kernel.shape(), &[8, 8, 8]);
        assert_eq!(kernel[[4, 4, 4]], 0.0);
    }

    #[test]
    fn generation_is_deterministic() {
        let grid = GridDescriptor::isotropic(&[16, 16]).unwrap();
        let a = log_gabor_radial(&grid, &[10.0, 20.0], 0.55);
        let b = log_gabor_radial(&grid, &[10.0, 20.0], 0.55);
        assert_eq!(a, b);
    }
}
