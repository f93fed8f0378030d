//! Frequency-domain kernel generators.
//!
//! Each generator is a pure function of a grid descriptor and a small set of
//! parameters, producing a real scalar field over the grid. Every output
//! sample depends only on its own index, so generation is parallelized over
//! the contiguous output buffer.
//!
//! All three families measure frequency from the grid center; the filter
//! bank builder shifts the finished kernels to the spectrum's DC-at-origin
//! convention.

pub mod butterworth;
pub mod log_gabor;
pub mod steerable;

pub use butterworth::butterworth_low_pass;
pub use log_gabor::log_gabor_radial;
pub use steerable::steerable_angular;
