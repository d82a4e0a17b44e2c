//! Host wiring the player to the terminal canvas and rodio.

use crate::app::{Host, WaveformPlayer};
use crate::config::StyleConfig;
use crate::error::PlayerResult;
use crate::media::RodioMedia;
use crate::render::{Rgb, SurfaceSize};

use super::canvas_surface::CanvasSurface;

/// Terminal host: braille canvas surfaces, rodio media elements.
///
/// Surfaces start on black; the front-end applies the style background
/// once the player has validated it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalHost;

impl Host for TerminalHost {
    type Surface = CanvasSurface;
    type Media = RodioMedia;

    fn create_surface(&mut self, element_id: &str, size: SurfaceSize) -> CanvasSurface {
        tracing::debug!("Creating surface {element_id} ({}x{})", size.width, size.height);
        CanvasSurface::new(size, Rgb::new(0, 0, 0))
    }

    fn create_media(&mut self, element_id: &str) -> RodioMedia {
        tracing::debug!("Creating media element {element_id}");
        RodioMedia::new()
    }
}

/// Build a terminal player whose canvas uses the style background.
pub fn terminal_player(
    container_id: &str,
    style: StyleConfig,
) -> PlayerResult<WaveformPlayer<TerminalHost>> {
    let mut player = WaveformPlayer::new(container_id, style, TerminalHost)?;
    let background = player.style().background;
    player.surface_mut().set_background(background);
    Ok(player)
}
