//! Custom widgets for the wavebar UI.

pub mod player_panel;

// Re-export widget rendering functions
pub use player_panel::{format_clock, render_player_panel};
