//! Wavebar - a waveform seek bar driving an audio player.
//!
//! The core ([`app::WaveformPlayer`]) is host-agnostic: it draws through
//! [`render::DrawSurface`] and controls playback through
//! [`media::MediaElement`]. The [`ui`] module provides a terminal host
//! backed by ratatui and rodio.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod media;
pub mod render;
pub mod ui;
pub mod waveform;

pub use app::{Host, PlayerEvent, PlayerState, WaveformPlayer};
pub use error::{ConfigError, InputError, PlayerError, PlayerResult};
