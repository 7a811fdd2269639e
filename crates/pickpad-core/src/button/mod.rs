//! Picker buttons: the clickable shapes placed on the canvas.

mod color;
mod measure;

pub use color::{HIGHLIGHT_SATURATION_DROP, HIGHLIGHT_VALUE_RISE, SerializableColor};
pub use measure::{FixedAdvanceMeasure, TextMeasure};

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Padding added around measured label text.
pub const LABEL_PADDING: Size = Size::new(8.0, 6.0);

/// Unique identifier for buttons.
pub type ButtonId = Uuid;

/// Outline of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ButtonShape {
    #[default]
    Ellipse,
    Rect,
}

/// One placed interactive shape.
///
/// `effective_size` and `highlight_color` are derived and recomputed eagerly
/// by every setter that touches their inputs. `selected` is owned by the
/// canvas selection set and can't be written from outside the crate.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub(crate) id: ButtonId,
    position: Point,
    base_size: Size,
    size_offset: f64,
    effective_size: Size,
    /// Measured label extent, zero when the label is empty.
    text_extent: Size,
    shape: ButtonShape,
    color: SerializableColor,
    highlight_color: SerializableColor,
    bound_entities: Vec<String>,
    script: Option<String>,
    label: String,
    pub(crate) selected: bool,
    pub(crate) drag_offset: Vec2,
}

impl Button {
    /// Create a new unlabelled button bound to `entities`.
    pub fn new(
        position: Point,
        base_size: Size,
        shape: ButtonShape,
        entities: Vec<String>,
    ) -> Self {
        let color = SerializableColor::neutral();
        Self {
            id: Uuid::new_v4(),
            position,
            base_size,
            size_offset: 0.0,
            effective_size: base_size,
            text_extent: Size::ZERO,
            shape,
            color,
            highlight_color: color.highlight(),
            bound_entities: entities,
            script: None,
            label: String::new(),
            selected: false,
            drag_offset: Vec2::ZERO,
        }
    }

    /// Create an ellipse button bound to a single entity.
    pub fn ellipse(position: Point, size: Size, entity: impl Into<String>) -> Self {
        Self::new(position, size, ButtonShape::Ellipse, vec![entity.into()])
    }

    /// Create a rect button bound to a group of entities.
    pub fn group(position: Point, size: Size, entities: Vec<String>) -> Self {
        Self::new(position, size, ButtonShape::Rect, entities)
    }

    /// Set the color (builder style).
    pub fn with_color(mut self, color: SerializableColor) -> Self {
        self.set_color(color);
        self
    }

    /// Attach a script (builder style).
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.set_script(Some(script.into()));
        self
    }

    /// Set the label (builder style).
    pub fn with_label(mut self, label: impl Into<String>, measure: &dyn TextMeasure) -> Self {
        self.set_label(label, measure);
        self
    }

    pub fn id(&self) -> ButtonId {
        self.id
    }

    /// Center in canvas coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn base_size(&self) -> Size {
        self.base_size
    }

    pub fn size_offset(&self) -> f64 {
        self.size_offset
    }

    pub fn set_size_offset(&mut self, offset: f64) {
        self.size_offset = offset;
        self.refresh_size();
    }

    /// Full width and height of the hit box.
    pub fn effective_size(&self) -> Size {
        self.effective_size
    }

    pub fn shape(&self) -> ButtonShape {
        self.shape
    }

    pub fn set_shape(&mut self, shape: ButtonShape) {
        self.shape = shape;
    }

    pub fn color(&self) -> SerializableColor {
        self.color
    }

    pub fn highlight_color(&self) -> SerializableColor {
        self.highlight_color
    }

    pub fn set_color(&mut self, color: SerializableColor) {
        self.color = color;
        self.highlight_color = color.highlight();
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>, measure: &dyn TextMeasure) {
        self.label = label.into();
        self.text_extent = if self.label.is_empty() {
            Size::ZERO
        } else {
            measure.measure_text(&self.label)
        };
        self.refresh_size();
    }

    pub fn bound_entities(&self) -> &[String] {
        &self.bound_entities
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// Attach or detach a script. Empty scripts are stored as `None`.
    pub fn set_script(&mut self, script: Option<String>) {
        self.script = script.filter(|s| !s.trim().is_empty());
    }

    /// Whether activating this button runs a script instead of selecting.
    pub fn is_scripted(&self) -> bool {
        self.script.is_some()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Offset from the last press point to the center.
    pub fn drag_offset(&self) -> Vec2 {
        self.drag_offset
    }

    /// Axis-aligned hit box, `position ± effective_size / 2`.
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, self.effective_size)
    }

    /// Strict containment: points on the box edge are outside.
    pub fn contains(&self, point: Point) -> bool {
        let b = self.bounds();
        point.x > b.x0 && point.x < b.x1 && point.y > b.y0 && point.y < b.y1
    }

    fn refresh_size(&mut self) {
        self.effective_size = if self.label.is_empty() {
            Size::new(
                (self.base_size.width + self.size_offset).max(0.0),
                (self.base_size.height + self.size_offset).max(0.0),
            )
        } else {
            Size::new(
                self.text_extent.width + LABEL_PADDING.width,
                self.text_extent.height + LABEL_PADDING.height,
            )
        };
    }

    /// Persisted fields of this button.
    pub fn to_record(&self) -> ButtonRecord {
        ButtonRecord {
            id: self.id,
            position: self.position,
            base_size: self.base_size,
            size_offset: self.size_offset,
            shape: self.shape,
            color: self.color,
            label: self.label.clone(),
            bound_entities: self.bound_entities.clone(),
            script: self.script.clone(),
        }
    }

    /// Rebuild a button from its persisted fields.
    ///
    /// Derived fields are recomputed and the button starts unselected.
    pub fn from_record(record: ButtonRecord, measure: &dyn TextMeasure) -> Self {
        let mut button = Self::new(
            record.position,
            record.base_size,
            record.shape,
            record.bound_entities,
        );
        button.id = record.id;
        button.size_offset = record.size_offset;
        button.set_color(record.color);
        button.set_script(record.script);
        button.set_label(record.label, measure);
        button
    }
}

/// Serialized form of a [`Button`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonRecord {
    pub id: ButtonId,
    pub position: Point,
    pub base_size: Size,
    #[serde(default)]
    pub size_offset: f64,
    #[serde(default)]
    pub shape: ButtonShape,
    #[serde(default)]
    pub color: SerializableColor,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub bound_entities: Vec<String>,
    #[serde(default)]
    pub script: Option<String>,
}
