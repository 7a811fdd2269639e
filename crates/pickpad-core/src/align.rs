//! Alignment and distribution of selected buttons.

use crate::button::{Button, ButtonId};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Directional alignment of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    /// Align X to the smallest X in the selection.
    Left,
    /// Align X to the largest X in the selection.
    Right,
    /// Align Y to the smallest Y in the selection.
    Top,
    /// Align Y to the largest Y in the selection.
    Bottom,
}

/// Align the selected buttons. Needs at least two selected buttons.
///
/// Returns true if any position was written.
pub fn align(buttons: &mut [Button], selection: &[ButtonId], alignment: Alignment) -> bool {
    let members: Vec<usize> = selection
        .iter()
        .filter_map(|id| buttons.iter().position(|b| b.id() == *id))
        .collect();
    if members.len() < 2 {
        return false;
    }

    let coords = members.iter().map(|&i| match alignment {
        Alignment::Left | Alignment::Right => buttons[i].position().x,
        Alignment::Top | Alignment::Bottom => buttons[i].position().y,
    });
    let target = match alignment {
        Alignment::Left | Alignment::Top => coords.fold(f64::INFINITY, f64::min),
        Alignment::Right | Alignment::Bottom => coords.fold(f64::NEG_INFINITY, f64::max),
    };

    for &i in &members {
        let p = buttons[i].position();
        let aligned = match alignment {
            Alignment::Left | Alignment::Right => Point::new(target, p.y),
            Alignment::Top | Alignment::Bottom => Point::new(p.x, target),
        };
        buttons[i].set_position(aligned);
    }
    true
}

/// Spread the selection evenly along the segment between the first and
/// second selected buttons.
///
/// The two anchors keep their positions; the remaining buttons are placed
/// at equal intervals between them, in selection order.
pub fn distribute(buttons: &mut [Button], selection: &[ButtonId]) -> bool {
    let members: Vec<usize> = selection
        .iter()
        .filter_map(|id| buttons.iter().position(|b| b.id() == *id))
        .collect();
    if members.len() < 2 {
        return false;
    }

    let start = buttons[members[0]].position();
    let end = buttons[members[1]].position();
    let step = (end - start) / (members.len() - 1) as f64;

    for (k, &i) in members[2..].iter().enumerate() {
        buttons[i].set_position(start + step * (k + 1) as f64);
    }
    true
}
