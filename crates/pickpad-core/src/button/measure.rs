//! Text measurement service used to size labelled buttons.

use kurbo::Size;

/// Measures the bounding box of a label string.
///
/// Implementations only need to be deterministic for a given string;
/// render backends usually forward to their font system.
pub trait TextMeasure {
    fn measure_text(&self, text: &str) -> Size;
}

/// Monospace estimate: fixed advance per glyph, fixed line height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMeasure {
    /// Horizontal advance per character.
    pub advance: f64,
    /// Height of one line of text.
    pub line_height: f64,
}

impl FixedAdvanceMeasure {
    pub const fn new(advance: f64, line_height: f64) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl Default for FixedAdvanceMeasure {
    fn default() -> Self {
        Self::new(7.0, 14.0)
    }
}

impl TextMeasure for FixedAdvanceMeasure {
    fn measure_text(&self, text: &str) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let lines = text.lines().count().max(1);
        let widest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        Size::new(widest as f64 * self.advance, lines as f64 * self.line_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_advance_single_line() {
        let measure = FixedAdvanceMeasure::new(5.0, 10.0);
        assert_eq!(measure.measure_text("abcd"), Size::new(20.0, 10.0));
    }

    #[test]
    fn test_fixed_advance_multi_line() {
        let measure = FixedAdvanceMeasure::new(5.0, 10.0);
        assert_eq!(measure.measure_text("ab\nabcdef"), Size::new(30.0, 20.0));
    }

    #[test]
    fn test_empty_text_is_zero() {
        assert_eq!(FixedAdvanceMeasure::default().measure_text(""), Size::ZERO);
    }
}
