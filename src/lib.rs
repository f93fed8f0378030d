//! # Phase Symmetry
//!
//! A deterministic engine for computing phase symmetry maps of n-dimensional
//! scalar images. Symmetric structures such as ridges, blobs, and valleys
//! have local frequency components that align in phase; the engine measures
//! that alignment with a bank of frequency-domain filters built from
//! Log-Gabor radial responses, steerable angular responses, and a
//! Butterworth low-pass envelope.
//!
//! ## Quick Start
//!
//! ```rust
//! use phasesym::{GridDescriptor, PhaseSymmetryEngine, PhaseSymmetryParams, ScalarImage};
//!
//! let grid = GridDescriptor::isotropic(&[32, 32]).unwrap();
//! let params = PhaseSymmetryParams {
//!     noise_threshold: 0.0,
//!     ..PhaseSymmetryParams::defaults(2)
//! };
//!
//! let mut engine = PhaseSymmetryEngine::new(grid.clone(), params);
//! engine.initialize().unwrap();
//!
//! // A small bright square on a dark background.
//! let image = ScalarImage::from_fn(grid, |index| {
//!     if (15..17).contains(&index[0]) && (15..17).contains(&index[1]) {
//!         1.0
//!     } else {
//!         0.0
//!     }
//! });
//!
//! let symmetry = engine.compute(&image).unwrap();
//! let stats = symmetry.statistics();
//! assert!(stats.max > 0.0);
//! ```
//!
//! ## Core Modules
//!
//! - [`config`] - Parameter sets and TOML configuration
//! - [`kernels`] - Frequency-domain kernel generation
//! - [`bank`] - Filter bank construction
//! - [`engine`] - Phase symmetry computation
//! - [`sources`] - Synthetic test inputs
//! - [`logging`] - JSON line-delimited run logging

pub mod bank;
pub mod config;
pub mod engine;
pub mod error;
pub mod fft;
pub mod grid;
pub mod image;
pub mod kernels;
pub mod logging;
pub mod sources;

pub use bank::FilterBank;
pub use config::{FilterConfig, PhaseSymmetryParams, Polarity};
pub use engine::PhaseSymmetryEngine;
pub use error::{PhaseSymmetryError, PhaseSymmetryResult};
pub use fft::{fft_shift, to_complex, NdFft};
pub use grid::GridDescriptor;
pub use image::{ImageStatistics, ScalarImage};
pub use kernels::{butterworth_low_pass, log_gabor_radial, steerable_angular};
pub use sources::SinusoidSource;
