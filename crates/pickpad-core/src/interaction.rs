//! Pointer state machine.
//!
//! Press, drag and release mutate the canvas and report what the caller has
//! to do next as a list of [`Effect`]s. Nothing here talks to the host.

use crate::button::ButtonId;
use crate::canvas::{Canvas, DragState, Mode, SelectOutcome};
use kurbo::{Point, Rect, Vec2};

/// Follow-up work requested by a pointer event.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// The canvas changed visibly.
    Redraw,
    /// Replace the host selection with these entities.
    PushSelection(Vec<String>),
    /// Create buttons for the current host selection, anchored here.
    CreateButtons(Point),
    /// Run a scripted button's script.
    RunScript { button: ButtonId, script: String },
}

/// Handle a primary-button press.
pub fn press(canvas: &mut Canvas, point: Point) -> Vec<Effect> {
    match canvas.mode() {
        Mode::Browse => {
            canvas.set_drag_state(box_at(point));
            Vec::new()
        }
        Mode::Edit => {
            for button in canvas.buttons_mut() {
                button.drag_offset = button.position() - point;
            }
            let drag = match canvas.hit_test(point) {
                Some(id) if canvas.selection().contains(id) => {
                    DragState::DraggingButtons(canvas.selection().ids().to_vec())
                }
                Some(id) => {
                    canvas.clear_selection();
                    canvas.select_button(id);
                    DragState::DraggingButtons(vec![id])
                }
                None => {
                    canvas.clear_selection();
                    box_at(point)
                }
            };
            log::debug!("press at ({}, {}): {:?}", point.x, point.y, drag);
            canvas.set_drag_state(drag);
            vec![Effect::Redraw]
        }
    }
}

/// Handle pointer motion with the primary button held.
pub fn drag(canvas: &mut Canvas, point: Point) -> Vec<Effect> {
    match canvas.take_drag_state() {
        DragState::Idle => Vec::new(),
        DragState::DraggingButtons(ids) => {
            for button in canvas
                .buttons_mut()
                .iter_mut()
                .filter(|b| ids.contains(&b.id))
            {
                let target = point + button.drag_offset;
                button.set_position(target);
            }
            canvas.set_drag_state(DragState::DraggingButtons(ids));
            vec![Effect::Redraw]
        }
        DragState::BoxSelecting { anchor, .. } => {
            canvas.set_drag_state(DragState::BoxSelecting {
                anchor,
                extent: point - anchor,
            });
            vec![Effect::Redraw]
        }
    }
}

/// Handle a primary-button release.
///
/// `click_threshold` separates clicks from box selections: in edit mode both
/// axes of the band must stay under it, in browse mode its length must.
pub fn release(canvas: &mut Canvas, point: Point, click_threshold: f64) -> Vec<Effect> {
    let drag = canvas.take_drag_state();
    match (canvas.mode(), drag) {
        (_, DragState::Idle) => Vec::new(),
        (Mode::Edit, DragState::DraggingButtons(_)) => vec![Effect::Redraw],
        (Mode::Edit, DragState::BoxSelecting { anchor, extent }) => {
            if extent.x.abs() < click_threshold && extent.y.abs() < click_threshold {
                return vec![Effect::CreateButtons(point), Effect::Redraw];
            }
            let hits = canvas.box_hit_test(Rect::from_points(anchor, anchor + extent));
            canvas.clear_selection();
            for id in hits {
                canvas.select_button(id);
            }
            vec![Effect::Redraw]
        }
        (Mode::Browse, DragState::BoxSelecting { anchor, extent }) => {
            if extent.hypot() > click_threshold {
                browse_box_select(canvas, anchor, extent)
            } else {
                browse_click(canvas, point)
            }
        }
        // Buttons never move in browse mode.
        (Mode::Browse, DragState::DraggingButtons(_)) => Vec::new(),
    }
}

fn box_at(point: Point) -> DragState {
    DragState::BoxSelecting {
        anchor: point,
        extent: Vec2::ZERO,
    }
}

fn browse_box_select(canvas: &mut Canvas, anchor: Point, extent: Vec2) -> Vec<Effect> {
    let hits = canvas.box_hit_test(Rect::from_points(anchor, anchor + extent));
    canvas.clear_selection();
    let mut entities: Vec<String> = Vec::new();
    for id in hits {
        // Scripted buttons are actions, a rubber band never fires them.
        if canvas.button(id).is_some_and(|b| b.is_scripted()) {
            continue;
        }
        if canvas.select_button(id) == SelectOutcome::Selected {
            if let Some(button) = canvas.button(id) {
                for entity in button.bound_entities() {
                    if !entities.contains(entity) {
                        entities.push(entity.clone());
                    }
                }
            }
        }
    }
    vec![Effect::PushSelection(entities), Effect::Redraw]
}

fn browse_click(canvas: &mut Canvas, point: Point) -> Vec<Effect> {
    canvas.clear_selection();
    let Some(id) = canvas.hit_test(point) else {
        return vec![Effect::PushSelection(Vec::new()), Effect::Redraw];
    };
    match canvas.select_button(id) {
        SelectOutcome::Selected => {
            let entities = canvas
                .button(id)
                .map(|b| b.bound_entities().to_vec())
                .unwrap_or_default();
            vec![Effect::PushSelection(entities), Effect::Redraw]
        }
        SelectOutcome::ScriptActivation(script) => {
            vec![Effect::RunScript { button: id, script }, Effect::Redraw]
        }
        SelectOutcome::NotFound => vec![Effect::Redraw],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::Button;
    use kurbo::Size;

    const THRESHOLD: f64 = 2.0;

    fn edit_canvas() -> (Canvas, ButtonId, ButtonId) {
        let mut canvas = Canvas::default();
        canvas.set_mode(Mode::Edit);
        let a = canvas.add_button(Button::ellipse(
            Point::new(100.0, 100.0),
            Size::new(10.0, 10.0),
            "a",
        ));
        let b = canvas.add_button(Button::ellipse(
            Point::new(200.0, 100.0),
            Size::new(10.0, 10.0),
            "b",
        ));
        (canvas, a, b)
    }

    #[test]
    fn test_edit_drag_moves_hit_button() {
        let (mut canvas, a, _) = edit_canvas();
        press(&mut canvas, Point::new(98.0, 99.0));
        assert_eq!(canvas.drag_state(), &DragState::DraggingButtons(vec![a]));
        assert!(canvas.button(a).unwrap().is_selected());

        drag(&mut canvas, Point::new(148.0, 119.0));
        assert_eq!(canvas.button(a).unwrap().position(), Point::new(150.0, 120.0));

        let effects = release(&mut canvas, Point::new(148.0, 119.0), THRESHOLD);
        assert_eq!(effects, vec![Effect::Redraw]);
        assert_eq!(canvas.drag_state(), &DragState::Idle);
    }

    #[test]
    fn test_edit_multi_drag_keeps_offsets() {
        let (mut canvas, a, b) = edit_canvas();
        canvas.select_button(a);
        canvas.select_button(b);
        press(&mut canvas, Point::new(100.0, 100.0));
        drag(&mut canvas, Point::new(110.0, 130.0));
        assert_eq!(canvas.button(a).unwrap().position(), Point::new(110.0, 130.0));
        assert_eq!(canvas.button(b).unwrap().position(), Point::new(210.0, 130.0));
    }

    #[test]
    fn test_edit_press_on_unselected_replaces_selection() {
        let (mut canvas, a, b) = edit_canvas();
        canvas.select_button(a);
        press(&mut canvas, Point::new(200.0, 100.0));
        assert_eq!(canvas.selection().ids(), &[b]);
        assert!(!canvas.button(a).unwrap().is_selected());
    }

    #[test]
    fn test_edit_click_on_empty_space_requests_creation() {
        let (mut canvas, a, _) = edit_canvas();
        canvas.select_button(a);
        press(&mut canvas, Point::new(50.0, 50.0));
        assert!(canvas.selection().is_empty());
        drag(&mut canvas, Point::new(51.0, 51.5));
        let effects = release(&mut canvas, Point::new(51.0, 51.5), THRESHOLD);
        assert_eq!(
            effects,
            vec![Effect::CreateButtons(Point::new(51.0, 51.5)), Effect::Redraw]
        );
    }

    #[test]
    fn test_edit_box_select_without_push() {
        let (mut canvas, a, b) = edit_canvas();
        press(&mut canvas, Point::new(50.0, 50.0));
        drag(&mut canvas, Point::new(250.0, 150.0));
        assert!(canvas.selection_rect().is_some());
        let effects = release(&mut canvas, Point::new(250.0, 150.0), THRESHOLD);
        assert_eq!(effects, vec![Effect::Redraw]);
        assert_eq!(canvas.selection().ids(), &[a, b]);
        assert_eq!(canvas.selection_rect(), None);
    }

    #[test]
    fn test_browse_click_pushes_entities() {
        let (mut canvas, a, _) = edit_canvas();
        canvas.set_mode(Mode::Browse);
        press(&mut canvas, Point::new(101.0, 101.0));
        let effects = release(&mut canvas, Point::new(101.0, 101.0), THRESHOLD);
        assert_eq!(
            effects,
            vec![Effect::PushSelection(vec!["a".to_string()]), Effect::Redraw]
        );
        assert_eq!(canvas.selection().ids(), &[a]);
        // Browse mode never moves buttons.
        assert_eq!(canvas.button(a).unwrap().position(), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_browse_click_on_empty_clears_host() {
        let (mut canvas, a, _) = edit_canvas();
        canvas.select_button(a);
        canvas.set_mode(Mode::Browse);
        press(&mut canvas, Point::new(10.0, 10.0));
        let effects = release(&mut canvas, Point::new(10.0, 10.0), THRESHOLD);
        assert_eq!(effects[0], Effect::PushSelection(Vec::new()));
        assert!(canvas.selection().is_empty());
    }

    #[test]
    fn test_browse_box_select_skips_scripted() {
        let (mut canvas, a, _) = edit_canvas();
        canvas.add_button(
            Button::ellipse(Point::new(150.0, 100.0), Size::new(10.0, 10.0), "s")
                .with_script("clear"),
        );
        canvas.add_button(Button::group(
            Point::new(120.0, 100.0),
            Size::new(20.0, 10.0),
            vec!["a".to_string(), "c".to_string()],
        ));
        canvas.set_mode(Mode::Browse);
        press(&mut canvas, Point::new(90.0, 90.0));
        drag(&mut canvas, Point::new(160.0, 110.0));
        let effects = release(&mut canvas, Point::new(160.0, 110.0), THRESHOLD);
        assert_eq!(
            effects[0],
            Effect::PushSelection(vec!["a".to_string(), "c".to_string()])
        );
        assert_eq!(canvas.selection().len(), 2);
        assert!(canvas.selection().contains(a));
    }

    #[test]
    fn test_browse_click_on_scripted_runs_script() {
        let mut canvas = Canvas::default();
        let id = canvas.add_button(
            Button::ellipse(Point::new(30.0, 30.0), Size::new(10.0, 10.0), "a")
                .with_script("select a"),
        );
        press(&mut canvas, Point::new(30.0, 30.0));
        let effects = release(&mut canvas, Point::new(30.0, 30.0), THRESHOLD);
        assert_eq!(
            effects[0],
            Effect::RunScript {
                button: id,
                script: "select a".to_string()
            }
        );
        assert!(canvas.selection().is_empty());
    }

    #[test]
    fn test_browse_small_wiggle_is_a_click() {
        let (mut canvas, a, _) = edit_canvas();
        canvas.set_mode(Mode::Browse);
        press(&mut canvas, Point::new(100.0, 100.0));
        drag(&mut canvas, Point::new(101.0, 101.0));
        release(&mut canvas, Point::new(101.0, 101.0), THRESHOLD);
        assert_eq!(canvas.selection().ids(), &[a]);
    }

    #[test]
    fn test_release_without_press_does_nothing() {
        let (mut canvas, _, _) = edit_canvas();
        assert!(release(&mut canvas, Point::new(50.0, 50.0), THRESHOLD).is_empty());
        assert!(drag(&mut canvas, Point::new(50.0, 50.0)).is_empty());
    }
}
