//! Frame building: canvas state to an ordered list of draw commands.

use crate::renderer::{RenderContext, RenderSurface, TextAlign};
use kurbo::{Point, Rect, Size};
use peniko::Color;
use pickpad_core::button::{Button, ButtonShape, SerializableColor, TextMeasure};
use std::path::PathBuf;

/// One drawing primitive. Colors are kept as 8-bit RGBA so frames compare
/// exactly.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Ellipse {
        center: Point,
        size: Size,
        fill: SerializableColor,
        stroke: SerializableColor,
    },
    Rect {
        rect: Rect,
        fill: SerializableColor,
        stroke: SerializableColor,
    },
    RoundedRect {
        rect: Rect,
        radius: f64,
        fill: SerializableColor,
        stroke: SerializableColor,
    },
    Text {
        rect: Rect,
        align: TextAlign,
        text: String,
        color: SerializableColor,
    },
    Pixmap {
        rect: Rect,
        source: PathBuf,
    },
}

/// Build the frame: background, buttons in paint order, then the rubber
/// band on top.
pub fn build_scene(ctx: &RenderContext) -> Vec<DrawCommand> {
    let canvas = ctx.canvas;
    let background: SerializableColor = ctx.background_color.into();
    let band: SerializableColor = ctx.selection_color.into();
    let frame = Rect::from_origin_size(Point::ZERO, canvas.size());
    let mut commands = Vec::with_capacity(canvas.len() * 2 + 2);

    match canvas.background() {
        Some(bg) => commands.push(DrawCommand::Pixmap {
            rect: frame,
            source: bg.path.clone(),
        }),
        None => commands.push(DrawCommand::Rect {
            rect: frame,
            fill: background,
            stroke: background,
        }),
    }

    for button in canvas.buttons() {
        push_button(&mut commands, ctx, button);
    }

    if let Some(rect) = canvas.selection_rect() {
        commands.push(DrawCommand::Rect {
            rect,
            fill: band,
            stroke: band,
        });
    }
    commands
}

fn push_button(commands: &mut Vec<DrawCommand>, ctx: &RenderContext, button: &Button) {
    let fill = if button.is_selected() {
        button.highlight_color()
    } else {
        button.color()
    };
    let stroke: SerializableColor = ctx.stroke_color.into();
    let bounds = button.bounds();

    if !button.label().is_empty() {
        commands.push(DrawCommand::RoundedRect {
            rect: bounds,
            radius: ctx.label_radius,
            fill,
            stroke,
        });
        commands.push(DrawCommand::Text {
            rect: bounds,
            align: TextAlign::Center,
            text: button.label().to_string(),
            color: ctx.text_color.into(),
        });
        return;
    }

    match button.shape() {
        ButtonShape::Ellipse => commands.push(DrawCommand::Ellipse {
            center: button.position(),
            size: button.effective_size(),
            fill,
            stroke,
        }),
        ButtonShape::Rect => commands.push(DrawCommand::Rect {
            rect: bounds,
            fill,
            stroke,
        }),
    }
}

/// Issue `commands` to `surface` in order.
pub fn replay(commands: &[DrawCommand], surface: &mut dyn RenderSurface) {
    for command in commands {
        match command {
            DrawCommand::Ellipse {
                center,
                size,
                fill,
                stroke,
            } => surface.draw_filled_ellipse(*center, *size, (*fill).into(), (*stroke).into()),
            DrawCommand::Rect { rect, fill, stroke } => {
                surface.draw_filled_rect(*rect, (*fill).into(), (*stroke).into())
            }
            DrawCommand::RoundedRect {
                rect,
                radius,
                fill,
                stroke,
            } => surface.draw_rounded_rect(*rect, *radius, (*fill).into(), (*stroke).into()),
            DrawCommand::Text {
                rect,
                align,
                text,
                color,
            } => surface.draw_text(*rect, *align, text, (*color).into()),
            DrawCommand::Pixmap { rect, source } => surface.draw_pixmap(*rect, source),
        }
    }
}

/// Build and replay a frame in one go.
pub fn render(ctx: &RenderContext, surface: &mut dyn RenderSurface) {
    replay(&build_scene(ctx), surface);
}

/// Surface that records every call, for tests and text dumps.
#[derive(Debug, Default)]
pub struct RecordingSurface<M: TextMeasure = pickpad_core::button::FixedAdvanceMeasure> {
    pub commands: Vec<DrawCommand>,
    measure: M,
}

impl<M: TextMeasure> RecordingSurface<M> {
    pub fn with_measure(measure: M) -> Self {
        Self {
            commands: Vec::new(),
            measure,
        }
    }
}

impl<M: TextMeasure> TextMeasure for RecordingSurface<M> {
    fn measure_text(&self, text: &str) -> Size {
        self.measure.measure_text(text)
    }
}

impl<M: TextMeasure> RenderSurface for RecordingSurface<M> {
    fn draw_filled_ellipse(&mut self, center: Point, size: Size, fill: Color, stroke: Color) {
        self.commands.push(DrawCommand::Ellipse {
            center,
            size,
            fill: fill.into(),
            stroke: stroke.into(),
        });
    }

    fn draw_filled_rect(&mut self, rect: Rect, fill: Color, stroke: Color) {
        self.commands.push(DrawCommand::Rect {
            rect,
            fill: fill.into(),
            stroke: stroke.into(),
        });
    }

    fn draw_rounded_rect(&mut self, rect: Rect, radius: f64, fill: Color, stroke: Color) {
        self.commands.push(DrawCommand::RoundedRect {
            rect,
            radius,
            fill: fill.into(),
            stroke: stroke.into(),
        });
    }

    fn draw_text(&mut self, rect: Rect, align: TextAlign, text: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            rect,
            align,
            text: text.to_string(),
            color: color.into(),
        });
    }

    fn draw_pixmap(&mut self, rect: Rect, source: &std::path::Path) {
        self.commands.push(DrawCommand::Pixmap {
            rect,
            source: source.to_path_buf(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;
    use pickpad_core::button::FixedAdvanceMeasure;
    use pickpad_core::canvas::{Canvas, Mode};
    use pickpad_core::interaction;

    fn rgb(r: u8, g: u8, b: u8) -> SerializableColor {
        SerializableColor::rgb(r, g, b)
    }

    #[test]
    fn test_empty_canvas_fills_background() {
        let canvas = Canvas::default();
        let commands = build_scene(&RenderContext::new(&canvas));
        assert_eq!(
            commands,
            vec![DrawCommand::Rect {
                rect: Rect::new(0.0, 0.0, 400.0, 400.0),
                fill: rgb(50, 50, 50),
                stroke: rgb(50, 50, 50),
            }]
        );
    }

    #[test]
    fn test_background_image_replaces_fill() {
        let mut canvas = Canvas::default();
        canvas.set_background(PathBuf::from("body.png"), Size::new(250.0, 500.0));
        let commands = build_scene(&RenderContext::new(&canvas));
        assert_eq!(
            commands[0],
            DrawCommand::Pixmap {
                rect: Rect::new(0.0, 0.0, 250.0, 500.0),
                source: PathBuf::from("body.png"),
            }
        );
    }

    #[test]
    fn test_selected_button_uses_highlight() {
        let mut canvas = Canvas::default();
        let a = canvas.add_button(Button::ellipse(
            Point::new(20.0, 20.0),
            Size::new(10.0, 10.0),
            "a",
        ));
        canvas.add_button(Button::group(
            Point::new(60.0, 20.0),
            Size::new(20.0, 10.0),
            vec!["a".to_string()],
        ));
        canvas.select_button(a);

        let commands = build_scene(&RenderContext::new(&canvas));
        assert_eq!(
            commands[1],
            DrawCommand::Ellipse {
                center: Point::new(20.0, 20.0),
                size: Size::new(10.0, 10.0),
                fill: rgb(220, 220, 255),
                stroke: rgb(10, 10, 10),
            }
        );
        assert_eq!(
            commands[2],
            DrawCommand::Rect {
                rect: Rect::new(50.0, 15.0, 70.0, 25.0),
                fill: SerializableColor::neutral(),
                stroke: rgb(10, 10, 10),
            }
        );
    }

    #[test]
    fn test_labelled_button_draws_text() {
        let measure = FixedAdvanceMeasure::default();
        let mut canvas = Canvas::default();
        canvas.add_button(
            Button::ellipse(Point::new(100.0, 100.0), Size::new(10.0, 10.0), "a")
                .with_label("Hip", &measure),
        );
        let commands = build_scene(&RenderContext::new(&canvas));
        assert!(matches!(commands[1], DrawCommand::RoundedRect { radius, .. } if radius == 3.0));
        assert!(matches!(&commands[2], DrawCommand::Text { text, .. } if text == "Hip"));
    }

    #[test]
    fn test_rubber_band_drawn_last() {
        let mut canvas = Canvas::default();
        canvas.add_button(Button::ellipse(Point::new(20.0, 20.0), Size::new(10.0, 10.0), "a"));
        canvas.set_mode(Mode::Browse);
        interaction::press(&mut canvas, Point::new(100.0, 100.0));
        interaction::drag(&mut canvas, Point::new(100.0, 100.0) + Vec2::new(-30.0, 40.0));

        let commands = build_scene(&RenderContext::new(&canvas));
        assert_eq!(
            commands.last(),
            Some(&DrawCommand::Rect {
                rect: Rect::new(70.0, 100.0, 100.0, 140.0),
                fill: SerializableColor::new(184, 184, 255, 100),
                stroke: SerializableColor::new(184, 184, 255, 100),
            })
        );
    }

    #[test]
    fn test_replay_matches_scene() {
        let mut canvas = Canvas::default();
        canvas.add_button(
            Button::ellipse(Point::new(20.0, 20.0), Size::new(10.0, 10.0), "a")
                .with_label("L", &FixedAdvanceMeasure::default()),
        );
        let ctx = RenderContext::new(&canvas);
        let mut surface: RecordingSurface = RecordingSurface::default();
        render(&ctx, &mut surface);
        assert_eq!(surface.commands, build_scene(&ctx));
        assert_eq!(surface.measure_text("ab"), Size::new(14.0, 14.0));
    }
}
