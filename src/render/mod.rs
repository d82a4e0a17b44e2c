//! Render module - draw surfaces, colors and the waveform frame renderer.

pub mod color;
pub mod engine;
pub mod surface;

// Re-export commonly used types
pub use color::{Paint, Rgb};
pub use engine::{render_frame, render_loading_pulse, Progress, Region};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface, Segment, SurfaceSize};
