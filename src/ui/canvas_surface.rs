//! Drawing surface that renders into a ratatui canvas.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Line},
        Block, Widget,
    },
};

use crate::render::{DrawSurface, Paint, RecordingSurface, Rgb, Segment, SurfaceSize};

/// Keeps the current frame's strokes and paints them as braille lines.
///
/// Translucent strokes are flattened onto `background`, since terminal
/// cells have no alpha.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    frame: RecordingSurface,
    background: Rgb,
}

impl CanvasSurface {
    pub fn new(size: SurfaceSize, background: Rgb) -> Self {
        Self {
            frame: RecordingSurface::new(size),
            background,
        }
    }

    /// Change the backdrop translucent strokes are flattened onto.
    pub fn set_background(&mut self, background: Rgb) {
        self.background = background;
    }

    /// Segments of the most recent frame.
    pub fn segments(&self) -> Vec<Segment> {
        self.frame.segments()
    }

    /// Terminal color for a stroke paint.
    pub fn cell_color(&self, paint: Paint) -> Color {
        let Rgb { r, g, b } = paint.color().blend_over(self.background, paint.alpha());
        Color::Rgb(r, g, b)
    }
}

impl DrawSurface for CanvasSurface {
    fn size(&self) -> SurfaceSize {
        self.frame.size()
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        // Only one frame is ever kept
        self.frame.reset();
        self.frame.clear_rect(x, y, width, height);
    }

    fn begin_path(&mut self) {
        self.frame.begin_path();
    }

    fn set_stroke_style(&mut self, paint: Paint) {
        self.frame.set_stroke_style(paint);
    }

    fn set_line_width(&mut self, width: f64) {
        self.frame.set_line_width(width);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.frame.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.frame.line_to(x, y);
    }

    fn stroke(&mut self) {
        self.frame.stroke();
    }
}

/// Widget painting a [`CanvasSurface`] scaled to the target area.
pub struct WaveformView<'a> {
    surface: &'a CanvasSurface,
    block: Option<Block<'a>>,
}

impl<'a> WaveformView<'a> {
    pub fn new(surface: &'a CanvasSurface) -> Self {
        Self {
            surface,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for WaveformView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let size = self.surface.size();
        let width = size.width as f64;
        let height = size.height as f64;
        let background = self.surface.background;
        // Canvas y grows upwards, surface y grows downwards
        let lines: Vec<Line> = self
            .surface
            .segments()
            .into_iter()
            .map(|s| Line::new(s.x1, height - s.y1, s.x2, height - s.y2, self.surface.cell_color(s.paint)))
            .collect();

        let mut canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .background_color(Color::Rgb(background.r, background.g, background.b))
            .paint(|ctx| {
                for line in &lines {
                    ctx.draw(line);
                }
            });
        if let Some(block) = self.block {
            canvas = canvas.block(block);
        }
        canvas.render(area, buf);
    }
}
