//! Fixed pixel layout of the waveform widget.

use crate::error::ConfigError;

pub const DEFAULT_WIDTH: u32 = 720;
pub const DEFAULT_HEIGHT: u32 = 64;
pub const BAR_WIDTH: u32 = 1;
pub const BAR_SPACE: u32 = 1;

/// Widget size and bar layout in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub bar_width: u32,
    pub bar_space: u32,
}

impl Geometry {
    /// Validated geometry: non-zero size and a non-zero bar pitch.
    pub fn new(width: u32, height: u32, bar_width: u32, bar_space: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidGeometry(format!(
                "size must be non-zero, got {width}x{height}"
            )));
        }
        if bar_width.checked_add(bar_space).filter(|p| *p > 0).is_none() {
            return Err(ConfigError::InvalidGeometry(format!(
                "bar pitch must be non-zero and fit in u32, got {bar_width}+{bar_space}"
            )));
        }
        Ok(Self {
            width,
            height,
            bar_width,
            bar_space,
        })
    }

    /// Bar width plus spacing.
    pub fn pitch(&self) -> u32 {
        self.bar_width.saturating_add(self.bar_space)
    }

    /// Number of bars drawn per frame.
    pub fn total_steps(&self) -> usize {
        (self.width / self.pitch()) as usize
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            bar_width: BAR_WIDTH,
            bar_space: BAR_SPACE,
        }
    }
}
