//! Drawing surface abstraction and a headless command recorder.

use super::color::Paint;

/// Pixel size of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

/// Canvas-2D style line drawing target.
///
/// The render engine only ever issues the calls below, in path order:
/// `begin_path`, style setters, `move_to`, `line_to`, `stroke`.
pub trait DrawSurface {
    fn size(&self) -> SurfaceSize;
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn begin_path(&mut self);
    fn set_stroke_style(&mut self, paint: Paint);
    fn set_line_width(&mut self, width: f64);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self);
}

/// One call made against a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    BeginPath,
    StrokeStyle(Paint),
    LineWidth(f64),
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Stroke,
}

/// A stroked line segment, reassembled from a command stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub paint: Paint,
    pub line_width: f64,
}

/// Surface that records every command it receives.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop the log, keeping the size.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Segments stroked since the last `clear_rect`.
    pub fn segments(&self) -> Vec<Segment> {
        let start = self
            .commands
            .iter()
            .rposition(|cmd| matches!(cmd, DrawCommand::ClearRect { .. }))
            .map_or(0, |i| i + 1);
        segments_of(&self.commands[start..])
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::ClearRect { x, y, width, height });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn set_stroke_style(&mut self, paint: Paint) {
        self.commands.push(DrawCommand::StrokeStyle(paint));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo { x, y });
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }
}

/// Replay a command stream and collect the segments it strokes.
///
/// Style state carries across paths like a canvas context does; a path's
/// pending segments are emitted on `stroke` and discarded on `begin_path`.
pub fn segments_of(commands: &[DrawCommand]) -> Vec<Segment> {
    let mut paint = Paint::Solid(super::color::Rgb::new(0, 0, 0));
    let mut line_width = 1.0;
    let mut cursor: Option<(f64, f64)> = None;
    let mut path: Vec<(f64, f64, f64, f64)> = Vec::new();
    let mut out = Vec::new();

    for command in commands {
        match *command {
            DrawCommand::ClearRect { .. } => out.clear(),
            DrawCommand::BeginPath => {
                path.clear();
                cursor = None;
            }
            DrawCommand::StrokeStyle(p) => paint = p,
            DrawCommand::LineWidth(w) => line_width = w,
            DrawCommand::MoveTo { x, y } => cursor = Some((x, y)),
            DrawCommand::LineTo { x, y } => {
                if let Some((x1, y1)) = cursor {
                    path.push((x1, y1, x, y));
                }
                cursor = Some((x, y));
            }
            DrawCommand::Stroke => {
                out.extend(path.iter().map(|&(x1, y1, x2, y2)| Segment {
                    x1,
                    y1,
                    x2,
                    y2,
                    paint,
                    line_width,
                }));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::color::Rgb;

    #[test]
    fn replays_strokes_into_segments() {
        let mut surface = RecordingSurface::new(SurfaceSize { width: 10, height: 10 });
        let red = Paint::Solid(Rgb::new(255, 0, 0));

        surface.clear_rect(0.0, 0.0, 10.0, 10.0);
        surface.begin_path();
        surface.set_stroke_style(red);
        surface.set_line_width(2.0);
        surface.move_to(1.5, 0.0);
        surface.line_to(1.5, 10.0);
        surface.stroke();

        let segments = surface.segments();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].paint, red);
        assert_eq!(segments[0].line_width, 2.0);
        assert_eq!((segments[0].x1, segments[0].y2), (1.5, 10.0));
    }

    #[test]
    fn unstroked_path_is_dropped() {
        let mut surface = RecordingSurface::new(SurfaceSize { width: 4, height: 4 });
        surface.begin_path();
        surface.move_to(0.0, 0.0);
        surface.line_to(0.0, 4.0);
        surface.begin_path();
        assert!(surface.segments().is_empty());
    }

    #[test]
    fn clear_starts_a_new_frame() {
        let mut surface = RecordingSurface::new(SurfaceSize { width: 4, height: 4 });
        for _ in 0..2 {
            surface.clear_rect(0.0, 0.0, 4.0, 4.0);
            surface.begin_path();
            surface.move_to(0.5, 0.0);
            surface.line_to(0.5, 4.0);
            surface.stroke();
        }
        assert_eq!(surface.segments().len(), 1);
        assert_eq!(surface.commands().len(), 10);
    }
}
