//! Widget style: palette, geometry overrides and the perceptual curve.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::render::Rgb;
use crate::waveform::geometry::{BAR_SPACE, BAR_WIDTH, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::waveform::{Geometry, DEFAULT_EXPONENT};

/// User-facing style settings, as written in `style.toml`.
///
/// Every key is optional; missing keys fall back to the defaults below.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    /// Bars that have already been played
    pub main_color: String,
    /// Bars that are seekable but not yet played
    pub inactive_color: String,
    /// Bars beyond the buffered frontier
    pub disabled_color: String,
    /// Playhead marker
    pub tick_color: String,
    /// Backdrop used to flatten translucent strokes on opaque targets
    pub background_color: String,
    pub width: u32,
    pub height: u32,
    pub bar_width: u32,
    pub bar_space: u32,
    /// Power applied to normalized magnitudes (below 1.0 lifts quiet parts)
    pub exponent: f64,
}

const DEFAULT_PALETTE: Palette = Palette {
    main: Rgb::new(0x85, 0x82, 0xc2),
    inactive: Rgb::new(0xaa, 0xaa, 0xaa),
    disabled: Rgb::new(0xee, 0xee, 0xee),
    tick: Rgb::new(0x33, 0x33, 0x33),
};

const DEFAULT_BACKGROUND: Rgb = Rgb::new(0, 0, 0);

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            main_color: DEFAULT_PALETTE.main.to_string(),
            inactive_color: DEFAULT_PALETTE.inactive.to_string(),
            disabled_color: DEFAULT_PALETTE.disabled.to_string(),
            tick_color: DEFAULT_PALETTE.tick.to_string(),
            background_color: DEFAULT_BACKGROUND.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            bar_width: BAR_WIDTH,
            bar_space: BAR_SPACE,
            exponent: DEFAULT_EXPONENT,
        }
    }
}

/// Parsed palette colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub main: Rgb,
    pub inactive: Rgb,
    pub disabled: Rgb,
    pub tick: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        DEFAULT_PALETTE
    }
}

/// A validated [`StyleConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub palette: Palette,
    pub background: Rgb,
    pub geometry: Geometry,
    pub exponent: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            background: DEFAULT_BACKGROUND,
            geometry: Geometry::default(),
            exponent: DEFAULT_EXPONENT,
        }
    }
}

fn color(field: &'static str, value: &str) -> Result<Rgb, ConfigError> {
    Rgb::parse_hex(value).ok_or_else(|| ConfigError::InvalidColor {
        field,
        value: value.to_string(),
    })
}

impl StyleConfig {
    /// Parse a TOML document. The document root must be a table.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Check every setting and resolve colors and geometry.
    pub fn validate(&self) -> Result<Style, ConfigError> {
        let palette = Palette {
            main: color("main_color", &self.main_color)?,
            inactive: color("inactive_color", &self.inactive_color)?,
            disabled: color("disabled_color", &self.disabled_color)?,
            tick: color("tick_color", &self.tick_color)?,
        };
        let background = color("background_color", &self.background_color)?;
        let geometry = Geometry::new(self.width, self.height, self.bar_width, self.bar_space)?;

        if !self.exponent.is_finite() || self.exponent <= 0.0 {
            return Err(ConfigError::InvalidExponent(self.exponent));
        }

        Ok(Style {
            palette,
            background,
            geometry,
            exponent: self.exponent,
        })
    }
}
