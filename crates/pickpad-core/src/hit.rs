//! Hit testing: point and rectangle -> button lookup.
//!
//! Buttons are scanned in reverse paint order so the last inserted (topmost)
//! button wins when boxes overlap.

use crate::button::{Button, ButtonId};
use kurbo::{Point, Rect};

/// Find the topmost button whose box strictly contains `point`.
pub fn hit_test(buttons: &[Button], point: Point) -> Option<ButtonId> {
    hit_index(buttons, point).map(|idx| buttons[idx].id())
}

/// Index variant of [`hit_test`].
pub fn hit_index(buttons: &[Button], point: Point) -> Option<usize> {
    buttons.iter().rposition(|b| b.contains(point))
}

/// Find all buttons whose box overlaps `rect`, in paint order.
///
/// Overlap uses strict comparisons on all four sides: a button whose box
/// only touches the rectangle's edge is not included.
pub fn box_hit_test(buttons: &[Button], rect: Rect) -> Vec<ButtonId> {
    let rect = normalize(rect);
    buttons
        .iter()
        .filter(|b| overlaps(b.bounds(), rect))
        .map(Button::id)
        .collect()
}

fn overlaps(bounds: Rect, rect: Rect) -> bool {
    bounds.x1 > rect.x0 && bounds.x0 < rect.x1 && bounds.y1 > rect.y0 && bounds.y0 < rect.y1
}

fn normalize(rect: Rect) -> Rect {
    Rect::new(
        rect.x0.min(rect.x1),
        rect.y0.min(rect.y1),
        rect.x0.max(rect.x1),
        rect.y0.max(rect.y1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    fn button_at(x: f64, y: f64) -> Button {
        Button::ellipse(Point::new(x, y), Size::new(10.0, 10.0), "e")
    }

    #[test]
    fn test_hit_single_button() {
        let buttons = vec![button_at(100.0, 100.0), button_at(200.0, 200.0)];
        assert_eq!(hit_test(&buttons, Point::new(96.0, 96.0)), Some(buttons[0].id()));
        assert_eq!(hit_test(&buttons, Point::new(201.0, 199.0)), Some(buttons[1].id()));
    }

    #[test]
    fn test_hit_outside_all() {
        let buttons = vec![button_at(100.0, 100.0)];
        assert_eq!(hit_test(&buttons, Point::new(94.0, 94.0)), None);
        assert_eq!(hit_test(&[], Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_hit_prefers_topmost() {
        let buttons = vec![button_at(100.0, 100.0), button_at(104.0, 104.0)];
        let p = Point::new(102.0, 102.0);
        assert_eq!(hit_test(&buttons, p), Some(buttons[1].id()));
        assert_eq!(hit_index(&buttons, p), Some(1));
    }

    #[test]
    fn test_box_hit_collects_in_paint_order() {
        let buttons = vec![
            button_at(10.0, 10.0),
            button_at(50.0, 50.0),
            button_at(90.0, 90.0),
        ];
        let hits = box_hit_test(&buttons, Rect::new(0.0, 0.0, 60.0, 60.0));
        assert_eq!(hits, vec![buttons[0].id(), buttons[1].id()]);
    }

    #[test]
    fn test_box_hit_accepts_inverted_rect() {
        let buttons = vec![button_at(50.0, 50.0)];
        let hits = box_hit_test(&buttons, Rect::new(60.0, 60.0, 40.0, 40.0));
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_box_hit_partial_overlap() {
        // Box spans [45, 55]; rect reaches 46 so it overlaps by one pixel.
        let buttons = vec![button_at(50.0, 50.0)];
        assert_eq!(box_hit_test(&buttons, Rect::new(0.0, 0.0, 46.0, 46.0)).len(), 1);
    }

    #[test]
    fn test_box_hit_edge_touch_is_outside() {
        let buttons = vec![button_at(50.0, 50.0)];
        assert!(box_hit_test(&buttons, Rect::new(0.0, 0.0, 45.0, 45.0)).is_empty());
        assert!(box_hit_test(&buttons, Rect::new(55.0, 55.0, 80.0, 80.0)).is_empty());
    }
}
