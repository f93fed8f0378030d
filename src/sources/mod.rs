//! Synthetic image sources for exercising the pipeline.

mod sinusoid;

pub use sinusoid::SinusoidSource;
