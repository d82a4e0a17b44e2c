//! The environment a player is embedded in.

use crate::media::MediaElement;
use crate::render::{DrawSurface, SurfaceSize};

/// Creates the elements a player draws on and plays through.
///
/// `element_id` is derived from the player's container id, so hosts can
/// attach the elements to the right place.
pub trait Host {
    type Surface: DrawSurface;
    type Media: MediaElement;

    fn create_surface(&mut self, element_id: &str, size: SurfaceSize) -> Self::Surface;
    fn create_media(&mut self, element_id: &str) -> Self::Media;
}
