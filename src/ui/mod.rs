//! UI module - terminal host, canvas surface and the interactive front-end.

pub mod canvas_surface;
pub mod host;
pub mod keybindings;
pub mod layout;
pub mod tui;
pub mod widgets;

// Re-export main entry point
pub use canvas_surface::{CanvasSurface, WaveformView};
pub use host::{terminal_player, TerminalHost};
pub use tui::{run, Session};
