//! Frame rendering for the waveform bars.
//!
//! Both entry points are pure: the same inputs always produce the same
//! command stream, and nothing is drawn until waveform samples exist.

use crate::config::Palette;
use crate::waveform::{map_amplitude, Geometry, WaveformData, MAX_MAGNITUDE};

use super::color::Paint;
use super::surface::DrawSurface;

/// Playback position and buffered frontier, both as fractions of the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub time_ratio: f64,
    pub seekable_ratio: f64,
}

/// Which palette entry a bar is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Already played
    Played,
    /// Seekable but not yet played
    Unplayed,
    /// Beyond the seekable frontier
    Unseekable,
}

impl Region {
    /// Classify a bar position. Exact ties with the playhead count as unplayed.
    pub fn classify(idx_ratio: f64, progress: Progress) -> Self {
        if idx_ratio > progress.seekable_ratio {
            Region::Unseekable
        } else if idx_ratio >= progress.time_ratio {
            Region::Unplayed
        } else {
            Region::Played
        }
    }

    fn paint(self, palette: &Palette) -> Paint {
        Paint::Solid(match self {
            Region::Played => palette.main,
            Region::Unplayed => palette.inactive,
            Region::Unseekable => palette.disabled,
        })
    }
}

/// Bar x position snapped to the pixel center.
fn snapped_offset(step: usize, geometry: &Geometry) -> f64 {
    (step as f64 * geometry.pitch() as f64).floor() + 0.5
}

fn usable(waveform: Option<&WaveformData>) -> Option<&WaveformData> {
    waveform.filter(|data| !data.is_empty())
}

/// Draw the static frame: region-colored bars plus the playhead tick.
pub fn render_frame<S: DrawSurface + ?Sized>(
    surface: &mut S,
    waveform: Option<&WaveformData>,
    geometry: &Geometry,
    progress: Progress,
    palette: &Palette,
    exponent: f64,
) {
    let Some(waveform) = usable(waveform) else {
        return;
    };

    let width = geometry.width as f64;
    let height = geometry.height as f64;
    surface.clear_rect(0.0, 0.0, width, height);

    let total_steps = geometry.total_steps();
    for step in 0..total_steps {
        let idx_ratio = step as f64 / total_steps as f64;
        let sample = waveform.sample_at(idx_ratio).unwrap_or(0);
        let ratio = map_amplitude(sample, MAX_MAGNITUDE, exponent);

        let bar_height = (height * ratio).ceil();
        let bar_void = (height - bar_height) / 2.0;
        let x = snapped_offset(step, geometry);

        surface.begin_path();
        surface.set_stroke_style(Region::classify(idx_ratio, progress).paint(palette));
        surface.set_line_width(geometry.bar_width as f64);
        surface.move_to(x, bar_void);
        surface.line_to(x, bar_void + bar_height);
        surface.stroke();
    }

    let playhead = width * progress.time_ratio;
    surface.begin_path();
    surface.set_stroke_style(Paint::Solid(palette.tick));
    surface.set_line_width(geometry.bar_width as f64 * 2.0);
    surface.move_to(playhead, 0.0);
    surface.line_to(playhead, height);
    surface.stroke();
}

/// Position of the traveling highlight, in `[0, 1)`.
pub fn pulse_position(anim_clock: f64, total_steps: usize) -> f64 {
    if total_steps == 0 {
        return 0.0;
    }
    let steps = total_steps as f64;
    anim_clock.rem_euclid(steps) / steps
}

/// Opacity of a bar at `idx_ratio` while the highlight sits at `position`.
pub fn pulse_alpha(position: f64, idx_ratio: f64) -> f64 {
    (1.0 - (position - idx_ratio).abs()).clamp(0.0, 1.0)
}

/// Draw the loading frame: every bar in the main color, faded by distance
/// from a highlight that sweeps across as the clock advances.
pub fn render_loading_pulse<S: DrawSurface + ?Sized>(
    surface: &mut S,
    waveform: Option<&WaveformData>,
    geometry: &Geometry,
    anim_clock: f64,
    palette: &Palette,
    exponent: f64,
) {
    let Some(waveform) = usable(waveform) else {
        return;
    };

    let height = geometry.height as f64;
    surface.clear_rect(0.0, 0.0, geometry.width as f64, height);

    let total_steps = geometry.total_steps();
    let position = pulse_position(anim_clock, total_steps);
    let center = height * 0.5;

    for step in 0..total_steps {
        let idx_ratio = step as f64 / total_steps as f64;
        let sample = waveform.sample_at(idx_ratio).unwrap_or(0);
        let bar_height = map_amplitude(sample, MAX_MAGNITUDE, exponent) * height;
        let top = center - bar_height * 0.5;
        let x = snapped_offset(step, geometry);

        surface.begin_path();
        surface.set_stroke_style(Paint::Translucent(
            palette.main,
            pulse_alpha(position, idx_ratio),
        ));
        surface.set_line_width(geometry.bar_width as f64 * 2.0);
        surface.move_to(x, top);
        surface.line_to(x, top + bar_height);
        surface.stroke();
    }
}
