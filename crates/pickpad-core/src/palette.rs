//! Color policies for newly created buttons.

use crate::button::SerializableColor;
use crate::host::SelectionProvider;

/// Picks a color for a button bound to `entity`.
///
/// Returning `None` lets the editor fall back to its default color.
pub trait ColorPolicy {
    fn color_for(&self, entity: &str, host: &dyn SelectionProvider) -> Option<SerializableColor>;
}

/// Colors used for the two sides of a symmetric setup and its center line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideColors {
    pub left: SerializableColor,
    pub right: SerializableColor,
    pub center: SerializableColor,
}

impl Default for SideColors {
    fn default() -> Self {
        Self {
            left: SerializableColor::rgb(90, 140, 255),
            right: SerializableColor::rgb(255, 90, 90),
            center: SerializableColor::rgb(255, 220, 80),
        }
    }
}

/// Always yields no color, so the editor default applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralPolicy;

impl ColorPolicy for NeutralPolicy {
    fn color_for(&self, _entity: &str, _host: &dyn SelectionProvider) -> Option<SerializableColor> {
        None
    }
}

/// Colors by world X relative to the YZ plane.
///
/// Positive X is the character's left side, negative X its right side, and
/// anything within `dead_zone` of the plane counts as center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidePolicy {
    pub colors: SideColors,
    pub dead_zone: f64,
}

impl Default for SidePolicy {
    fn default() -> Self {
        Self {
            colors: SideColors::default(),
            dead_zone: 0.001,
        }
    }
}

impl ColorPolicy for SidePolicy {
    fn color_for(&self, entity: &str, host: &dyn SelectionProvider) -> Option<SerializableColor> {
        let x = host.entity_world_x(entity)?;
        Some(if x > self.dead_zone {
            self.colors.left
        } else if x < -self.dead_zone {
            self.colors.right
        } else {
            self.colors.center
        })
    }
}

/// Colors by naming convention: `L_`/`_L` for left, `R_`/`_R` for right.
///
/// Matching is case-insensitive. Names with no side marker get `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NamePolicy {
    pub colors: SideColors,
}

impl ColorPolicy for NamePolicy {
    fn color_for(&self, entity: &str, _host: &dyn SelectionProvider) -> Option<SerializableColor> {
        let name = entity.to_ascii_lowercase();
        // Hosts may prefix names with a namespace ("rig:L_arm").
        let short = name.rsplit([':', '|']).next().unwrap_or(&name);
        if short.starts_with("l_") || short.ends_with("_l") {
            Some(self.colors.left)
        } else if short.starts_with("r_") || short.ends_with("_r") {
            Some(self.colors.right)
        } else {
            None
        }
    }
}
