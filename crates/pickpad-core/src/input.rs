//! Pointer and keyboard input translated into editor commands.

use crate::align::Alignment;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Primary-button pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Press { position: Point },
    Drag { position: Point },
    Release { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            Self::Press { position } | Self::Drag { position } | Self::Release { position } => {
                *position
            }
        }
    }
}

/// Key commands understood by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyCommand {
    Delete,
    Save,
    Open,
    Align(Alignment),
    Distribute,
}

impl KeyCommand {
    /// Map a key press to a command. Key names follow the host's naming
    /// ("Delete", "ArrowLeft", "s", ...), compared case-insensitively.
    pub fn from_key(key: &str, modifiers: Modifiers) -> Option<Self> {
        let key = key.to_ascii_lowercase();
        if modifiers.command() {
            return match key.as_str() {
                "s" => Some(Self::Save),
                "o" => Some(Self::Open),
                _ => None,
            };
        }
        match key.as_str() {
            "delete" | "backspace" => Some(Self::Delete),
            "arrowleft" | "left" => Some(Self::Align(Alignment::Left)),
            "arrowright" | "right" => Some(Self::Align(Alignment::Right)),
            "arrowup" | "up" => Some(Self::Align(Alignment::Top)),
            "arrowdown" | "down" => Some(Self::Align(Alignment::Bottom)),
            "d" => Some(Self::Distribute),
            _ => None,
        }
    }

    /// Commands that only apply while editing.
    pub fn is_edit_only(&self) -> bool {
        matches!(self, Self::Align(_) | Self::Distribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_shortcuts() {
        assert_eq!(KeyCommand::from_key("S", Modifiers::CTRL), Some(KeyCommand::Save));
        assert_eq!(KeyCommand::from_key("o", Modifiers::CTRL), Some(KeyCommand::Open));
        assert_eq!(KeyCommand::from_key("d", Modifiers::CTRL), None);
    }

    #[test]
    fn test_plain_keys() {
        assert_eq!(KeyCommand::from_key("Delete", Modifiers::NONE), Some(KeyCommand::Delete));
        assert_eq!(
            KeyCommand::from_key("ArrowUp", Modifiers::NONE),
            Some(KeyCommand::Align(Alignment::Top))
        );
        assert_eq!(KeyCommand::from_key("D", Modifiers::NONE), Some(KeyCommand::Distribute));
        assert_eq!(KeyCommand::from_key("s", Modifiers::NONE), None);
    }

    #[test]
    fn test_meta_counts_as_command() {
        let modifiers = Modifiers {
            meta: true,
            ..Modifiers::NONE
        };
        assert_eq!(KeyCommand::from_key("s", modifiers), Some(KeyCommand::Save));
    }

    #[test]
    fn test_edit_only_commands() {
        assert!(KeyCommand::Distribute.is_edit_only());
        assert!(KeyCommand::Align(Alignment::Left).is_edit_only());
        assert!(!KeyCommand::Delete.is_edit_only());
    }

    #[test]
    fn test_pointer_position() {
        let event = PointerEvent::Drag {
            position: Point::new(3.0, 4.0),
        };
        assert_eq!(event.position(), Point::new(3.0, 4.0));
    }
}
