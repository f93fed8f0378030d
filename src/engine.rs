//! Phase symmetry computation over a precomputed filter bank.

use ndarray::{ArrayD, IxDyn};
use rayon::prelude::*;
use rustfft::num_complex::Complex;
use std::time::Instant;

use crate::bank::FilterBank;
use crate::config::{PhaseSymmetryParams, Polarity};
use crate::error::{PhaseSymmetryError, PhaseSymmetryResult};
use crate::fft::{to_complex, NdFft};
use crate::grid::GridDescriptor;
use crate::image::ScalarImage;
use crate::logging;

/// Computes phase symmetry maps for images sampled on a fixed grid.
///
/// The engine is configured with a grid and a parameter set, then
/// `initialize()` builds the filter bank once. After that, `compute()` may
/// run on any number of images sharing the grid; each call owns its own
/// accumulators, so concurrent calls against the same initialized engine
/// are safe.
///
/// # Examples
///
/// ```
/// use phasesym::{GridDescriptor, PhaseSymmetryEngine, PhaseSymmetryParams, ScalarImage};
///
/// let grid = GridDescriptor::isotropic(&[16, 16]).unwrap();
/// let mut engine = PhaseSymmetryEngine::new(grid.clone(), PhaseSymmetryParams::defaults(2));
/// engine.initialize().unwrap();
///
/// let image = ScalarImage::zeros(grid);
/// let symmetry = engine.compute(&image).unwrap();
/// assert_eq!(symmetry.statistics().max, 0.0);
/// ```
pub struct PhaseSymmetryEngine {
    grid: GridDescriptor,
    params: PhaseSymmetryParams,
    bank: Option<FilterBank>,
}

impl PhaseSymmetryEngine {
    /// Create an engine for the given grid and parameters. No validation
    /// happens here; `initialize()` checks everything before building the
    /// bank.
    pub fn new(grid: GridDescriptor, params: PhaseSymmetryParams) -> Self {
        Self {
            grid,
            params,
            bank: None,
        }
    }

    pub fn grid(&self) -> &GridDescriptor {
        &self.grid
    }

    pub fn params(&self) -> &PhaseSymmetryParams {
        &self.params
    }

    /// Whether `initialize()` has built the filter bank.
    pub fn is_initialized(&self) -> bool {
        self.bank.is_some()
    }

    /// The filter bank, once built.
    pub fn bank(&self) -> Option<&FilterBank> {
        self.bank.as_ref()
    }

    /// Replace the parameters, dropping any previously built bank.
    pub fn set_params(&mut self, params: PhaseSymmetryParams) {
        self.params = params;
        self.bank = None;
    }

    /// Validate the configuration and build the filter bank. Must be called
    /// before the first `compute()`; calling it again with unchanged
    /// parameters rebuilds an identical bank.
    pub fn initialize(&mut self) -> PhaseSymmetryResult<()> {
        let started = Instant::now();
        let bank = FilterBank::build(&self.grid, &self.params)?;
        let _ = logging::log_initialize(
            bank.scale_count(),
            bank.orientation_count(),
            self.grid.size(),
            started.elapsed().as_millis(),
        );
        self.bank = Some(bank);
        Ok(())
    }

    /// Compute the phase symmetry map of `input`.
    ///
    /// For every (scale, orientation) pair the input spectrum is band-passed
    /// by the corresponding bank kernel and transformed back to the spatial
    /// domain. The complex response contributes its modulus to the total
    /// amplitude; its real and imaginary parts contribute to the running
    /// orientation energy according to the polarity rule. After each
    /// orientation the noise threshold is subtracted without clamping;
    /// negative contributions may cancel across orientations, so the clamp
    /// to zero happens once, globally, before the final normalization by
    /// total amplitude.
    pub fn compute(&self, input: &ScalarImage) -> PhaseSymmetryResult<ScalarImage> {
        let bank = self
            .bank
            .as_ref()
            .ok_or_else(|| PhaseSymmetryError::not_initialized("compute"))?;
        if input.grid() != &self.grid {
            return Err(PhaseSymmetryError::grid_mismatch(
                self.grid.size(),
                input.grid().size(),
                "compute",
            ));
        }

        let started = Instant::now();
        let shape = self.grid.size().to_vec();
        let pixel_count = self.grid.pixel_count() as f64;

        let mut fft = NdFft::new();
        let mut spectrum = to_complex(input.data());
        fft.forward(&mut spectrum)?;

        // The transforms are unnormalized in both directions, so fold the
        // full 1/N into the spectrum modulus once. The phase is untouched.
        let modulus: Vec<f64> = spectrum
            .iter()
            .map(|value| value.norm() / pixel_count)
            .collect();
        let phase: Vec<f64> = spectrum.iter().map(|value| value.arg()).collect();
        let samples = modulus.len();

        let mut total_amplitude = vec![0.0f64; samples];
        let mut total_energy = vec![0.0f64; samples];
        let polarity = self.params.polarity;
        let noise_threshold = self.params.noise_threshold;

        for orientation in 0..bank.orientation_count() {
            let mut orientation_energy = vec![0.0f64; samples];

            for scale in 0..bank.scale_count() {
                let kernel = bank
                    .kernel(scale, orientation)
                    .as_slice()
                    .expect("ndarray uses contiguous layout");

                // Band-pass: filtered modulus recombined with the original
                // phase, then back to the spatial domain.
                let band_passed: Vec<Complex<f64>> = (0..samples)
                    .into_par_iter()
                    .map(|i| Complex::from_polar(modulus[i] * kernel[i], phase[i]))
                    .collect();
                let mut response = ArrayD::from_shape_vec(IxDyn(&shape), band_passed)
                    .expect("shape matches sample count");
                fft.inverse(&mut response)?;
                let response = response
                    .as_slice()
                    .expect("ndarray uses contiguous layout");

                total_amplitude
                    .par_iter_mut()
                    .zip(orientation_energy.par_iter_mut())
                    .zip(response.par_iter())
                    .for_each(|((amplitude, energy), value)| {
                        *amplitude += value.norm();
                        *energy += match polarity {
                            Polarity::Both => value.re.abs() - value.im.abs(),
                            Polarity::Bright => value.re - value.im.abs(),
                            Polarity::Dark => -value.re - value.im.abs(),
                        };
                    });
            }

            total_energy
                .par_iter_mut()
                .zip(orientation_energy.par_iter())
                .for_each(|(total, energy)| {
                    *total += energy - noise_threshold;
                });
        }

        let symmetry: Vec<f64> = total_energy
            .par_iter()
            .zip(total_amplitude.par_iter())
            .map(|(&energy, &amplitude)| {
                let energy = energy.max(0.0);
                // Zero amplitude means no band-pass response anywhere at
                // this sample; define the output as 0 instead of 0/0.
                if amplitude == 0.0 {
                    0.0
                } else {
                    energy / amplitude
                }
            })
            .collect();

        let data =
            ArrayD::from_shape_vec(IxDyn(&shape), symmetry).expect("shape matches sample count");
        let output = ScalarImage::from_parts(self.grid.clone(), data)?;
        let _ = logging::log_compute(
            bank.scale_count(),
            bank.orientation_count(),
            &output.statistics(),
            started.elapsed().as_millis(),
        );
        Ok(output)
    }
}
