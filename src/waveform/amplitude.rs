//! Perceptual amplitude scaling for waveform bars.

/// Largest magnitude a 16-bit signed sample can carry.
pub const MAX_MAGNITUDE: i32 = i16::MAX as i32;

/// Default perceptual exponent. Values below 1.0 lift quiet passages.
pub const DEFAULT_EXPONENT: f64 = 0.7;

/// Map a raw sample to a bar height ratio in `[0, 1]`.
///
/// `ratio = (|sample| / max_magnitude) ^ exponent`, clamped. A non-positive
/// `max_magnitude` maps everything to `0.0`.
pub fn map_amplitude(sample: i32, max_magnitude: i32, exponent: f64) -> f64 {
    if max_magnitude <= 0 {
        return 0.0;
    }

    let linear = sample.unsigned_abs() as f64 / max_magnitude as f64;
    linear.powf(exponent).clamp(0.0, 1.0)
}
