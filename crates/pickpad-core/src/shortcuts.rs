//! Keyboard shortcut registry and documentation.

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    /// Only active in edit mode.
    pub edit_only: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        edit_only: bool,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            edit_only,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        if self.ctrl {
            format!("Ctrl+{}", self.key)
        } else {
            self.key.to_string()
        }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("S", true, false, "Save layout..."),
            Shortcut::new("O", true, false, "Open layout..."),
            Shortcut::new("Delete", false, false, "Delete selected buttons"),
            Shortcut::new("Left", false, true, "Align selection to leftmost X"),
            Shortcut::new("Right", false, true, "Align selection to rightmost X"),
            Shortcut::new("Up", false, true, "Align selection to topmost Y"),
            Shortcut::new("Down", false, true, "Align selection to bottommost Y"),
            Shortcut::new("D", false, true, "Distribute between first two selected"),
        ]
    }

    /// Render the shortcut table, one per line.
    pub fn describe() -> String {
        Self::all()
            .iter()
            .map(|s| {
                let scope = if s.edit_only { " (edit)" } else { "" };
                format!("  {:12} {}{}", s.format(), s.description, scope)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
