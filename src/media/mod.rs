//! Media module - the media element seam, its lifecycle events and the
//! rodio-backed implementation.

pub mod detection;
pub mod dispatch;
pub mod probe;
pub mod rodio_backend;
pub mod source;

use std::sync::mpsc::Sender;

// Re-export commonly used types
pub use dispatch::EventDispatcher;
pub use probe::{probe_track, TrackInfo};
pub use rodio_backend::RodioMedia;
pub use source::MediaSource;

/// Lifecycle event names a media element publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaEventKind {
    LoadStart,
    Play,
    Pause,
    Waiting,
    Abort,
    CanPlay,
    TimeUpdate,
}

impl MediaEventKind {
    pub const ALL: [MediaEventKind; 7] = [
        MediaEventKind::LoadStart,
        MediaEventKind::Play,
        MediaEventKind::Pause,
        MediaEventKind::Waiting,
        MediaEventKind::Abort,
        MediaEventKind::CanPlay,
        MediaEventKind::TimeUpdate,
    ];
}

/// A lifecycle event together with its payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    LoadStart,
    Play,
    Pause,
    Waiting,
    Abort,
    CanPlay,
    /// Position and seekable extent, in seconds, at the time of the update
    TimeUpdate { current_time: f64, seekable: f64 },
}

impl MediaEvent {
    pub fn kind(&self) -> MediaEventKind {
        match self {
            MediaEvent::LoadStart => MediaEventKind::LoadStart,
            MediaEvent::Play => MediaEventKind::Play,
            MediaEvent::Pause => MediaEventKind::Pause,
            MediaEvent::Waiting => MediaEventKind::Waiting,
            MediaEvent::Abort => MediaEventKind::Abort,
            MediaEvent::CanPlay => MediaEventKind::CanPlay,
            MediaEvent::TimeUpdate { .. } => MediaEventKind::TimeUpdate,
        }
    }
}

/// Handle for one registered listener. Pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(pub(crate) u64);

/// An audio element the widget drives.
///
/// Events are never delivered synchronously from these calls; they arrive on
/// the subscribed channels whenever the element produces them.
pub trait MediaElement {
    /// Replace the current source and start loading it.
    fn load(&mut self, source: &MediaSource);
    fn play(&mut self);
    fn pause(&mut self);
    /// Playback position in seconds.
    fn current_time(&self) -> f64;
    /// Seek to `seconds`.
    fn set_current_time(&mut self, seconds: f64);
    /// Length of the loaded source, when known.
    fn duration(&self) -> Option<f64>;
    /// Deliver events of `kind` to `sink` until unsubscribed.
    fn subscribe(&mut self, kind: MediaEventKind, sink: Sender<MediaEvent>) -> Subscription;
    /// Returns false if the subscription was not registered.
    fn unsubscribe(&mut self, subscription: Subscription) -> bool;
}
