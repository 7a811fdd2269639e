//! Render surface that writes one line per primitive.

use kurbo::{Point, Rect, Size};
use peniko::Color;
use pickpad_core::button::{FixedAdvanceMeasure, SerializableColor, TextMeasure};
use pickpad_render::{RenderSurface, TextAlign};
use std::path::Path;

/// Text dump of a frame, handy for inspecting layouts without a GUI.
#[derive(Debug, Default)]
pub struct TextSurface {
    lines: Vec<String>,
    measure: FixedAdvanceMeasure,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_string(self) -> String {
        self.lines.join("\n")
    }
}

fn hex(color: Color) -> String {
    let c = SerializableColor::from(color);
    if c.a == 255 {
        format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
    }
}

fn rect(r: Rect) -> String {
    format!("[{} {} {} {}]", r.x0, r.y0, r.x1, r.y1)
}

impl TextMeasure for TextSurface {
    fn measure_text(&self, text: &str) -> Size {
        self.measure.measure_text(text)
    }
}

impl RenderSurface for TextSurface {
    fn draw_filled_ellipse(&mut self, center: Point, size: Size, fill: Color, stroke: Color) {
        self.lines.push(format!(
            "ellipse ({}, {}) {}x{} fill {} stroke {}",
            center.x,
            center.y,
            size.width,
            size.height,
            hex(fill),
            hex(stroke)
        ));
    }

    fn draw_filled_rect(&mut self, r: Rect, fill: Color, stroke: Color) {
        self.lines
            .push(format!("rect {} fill {} stroke {}", rect(r), hex(fill), hex(stroke)));
    }

    fn draw_rounded_rect(&mut self, r: Rect, radius: f64, fill: Color, stroke: Color) {
        self.lines.push(format!(
            "rounded {} r={} fill {} stroke {}",
            rect(r),
            radius,
            hex(fill),
            hex(stroke)
        ));
    }

    fn draw_text(&mut self, r: Rect, align: TextAlign, text: &str, color: Color) {
        self.lines
            .push(format!("text {} {:?} {:?} {}", rect(r), align, text, hex(color)));
    }

    fn draw_pixmap(&mut self, r: Rect, source: &Path) {
        self.lines.push(format!("pixmap {} {}", rect(r), source.display()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines() {
        let mut surface = TextSurface::new();
        surface.draw_filled_ellipse(
            Point::new(5.0, 6.0),
            Size::new(10.0, 10.0),
            Color::from_rgba8(120, 120, 255, 255),
            Color::from_rgba8(10, 10, 10, 255),
        );
        surface.draw_filled_rect(
            Rect::new(0.0, 0.0, 4.0, 2.0),
            Color::from_rgba8(184, 184, 255, 100),
            Color::from_rgba8(184, 184, 255, 100),
        );
        assert_eq!(
            surface.lines(),
            &[
                "ellipse (5, 6) 10x10 fill #7878ff stroke #0a0a0a".to_string(),
                "rect [0 0 4 2] fill #b8b8ff64 stroke #b8b8ff64".to_string(),
            ]
        );
    }
}
