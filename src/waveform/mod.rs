//! Waveform module - sample storage, bar layout and amplitude scaling.

pub mod amplitude;
pub mod data;
pub mod geometry;

// Re-export commonly used types
pub use amplitude::{map_amplitude, DEFAULT_EXPONENT, MAX_MAGNITUDE};
pub use data::WaveformData;
pub use geometry::Geometry;
