//! Render surface abstraction.

use kurbo::{Point, Rect, Size};
use peniko::Color;
use pickpad_core::button::TextMeasure;
use pickpad_core::canvas::Canvas;
use std::path::Path;

/// Horizontal placement of text inside its rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Drawing backend supplied by the host.
///
/// Every primitive is in canvas coordinates. A surface also measures text,
/// so the editor can size labelled buttons with the same font metrics the
/// surface draws with.
pub trait RenderSurface: TextMeasure {
    fn draw_filled_ellipse(&mut self, center: Point, size: Size, fill: Color, stroke: Color);

    fn draw_filled_rect(&mut self, rect: Rect, fill: Color, stroke: Color);

    fn draw_rounded_rect(&mut self, rect: Rect, radius: f64, fill: Color, stroke: Color);

    fn draw_text(&mut self, rect: Rect, align: TextAlign, text: &str, color: Color);

    /// Draw the image at `source` stretched to `rect`.
    fn draw_pixmap(&mut self, rect: Rect, source: &Path);
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Fill behind everything when there is no background image.
    pub background_color: Color,
    /// Outline of every button.
    pub stroke_color: Color,
    /// Label text color.
    pub text_color: Color,
    /// Fill and outline of the rubber band.
    pub selection_color: Color,
    /// Corner radius of labelled buttons.
    pub label_radius: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(canvas: &'a Canvas) -> Self {
        Self {
            canvas,
            background_color: Color::from_rgba8(50, 50, 50, 255),
            stroke_color: Color::from_rgba8(10, 10, 10, 255),
            text_color: Color::from_rgba8(10, 10, 10, 255),
            selection_color: Color::from_rgba8(184, 184, 255, 100),
            label_radius: 3.0,
        }
    }
}
