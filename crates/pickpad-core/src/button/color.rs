//! Button colors and the highlight transform.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Saturation removed from a color to derive its highlight (0-255 scale).
pub const HIGHLIGHT_SATURATION_DROP: f64 = 100.0;
/// Value added to a color to derive its highlight (0-255 scale).
pub const HIGHLIGHT_VALUE_RISE: f64 = 50.0;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Neutral button color used when no color policy applies.
    pub const fn neutral() -> Self {
        Self::rgb(120, 120, 255)
    }

    /// Derive the highlight color: saturation lowered, value raised.
    ///
    /// Saturation is floored at 0 and value capped at 255; hue and alpha
    /// are preserved.
    pub fn highlight(&self) -> Self {
        let (h, s, v) = rgb_to_hsv(self.r, self.g, self.b);
        let s = (s - HIGHLIGHT_SATURATION_DROP / 255.0).max(0.0);
        let v = (v + HIGHLIGHT_VALUE_RISE / 255.0).min(1.0);
        let (r, g, b) = hsv_to_rgb(h, s, v);
        Self::new(r, g, b, self.a)
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::neutral()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Convert RGB8 to (hue degrees, saturation 0-1, value 0-1).
fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta <= f64::EPSILON {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let saturation = if max <= f64::EPSILON { 0.0 } else { delta / max };

    (hue, saturation, max)
}

fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> (u8, u8, u8) {
    let c = value * saturation;
    let h = (hue / 60.0).rem_euclid(6.0);
    let x = c * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = value - c;
    let to_u8 = |channel: f64| ((channel + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_u8(r), to_u8(g), to_u8(b))
}
