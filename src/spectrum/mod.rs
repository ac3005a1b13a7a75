//! Block spectrum pipeline: Hamming window, radix-2 FFT, magnitudes,
//! frequency bins and two-row bar levels.
//!
//! The free functions are the unchecked hot path and work directly on caller
//! buffers without allocating. [`Analyzer`] validates a configuration once
//! and then drives the same stages.

pub mod binning;
pub mod fft;
pub mod levels;
pub mod magnitude;
pub mod pipeline;
pub mod window;

pub use levels::Bar;
pub use pipeline::{Analyzer, ContractViolation, SpectrumConfig};
