//! Application module - the player controller, its session and listeners.

pub mod host;
pub mod listeners;
pub mod player;
pub mod session;

// Re-export the player and its collaborators
pub use host::Host;
pub use listeners::{ListenerRegistry, PlayerEvent};
pub use player::WaveformPlayer;
pub use session::{PlaybackSession, PlayerState, ANIM_STEP};
