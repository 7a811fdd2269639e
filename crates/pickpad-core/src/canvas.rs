//! Canvas state: buttons in paint order, selection, mode and background.

use crate::align::{self, Alignment};
use crate::button::{Button, ButtonId, ButtonRecord, TextMeasure};
use crate::hit;
use crate::selection::SelectionSet;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Current layout format version.
pub const LAYOUT_VERSION: u32 = 1;

/// Editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Clicking drives the host selection.
    #[default]
    Browse,
    /// Clicking creates, moves and selects buttons.
    Edit,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Browse => Self::Edit,
            Self::Edit => Self::Browse,
        }
    }
}

/// Pointer gesture in progress.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Moving these buttons with the pointer.
    DraggingButtons(Vec<ButtonId>),
    /// Rubber-band selection from `anchor`; `extent` may be negative.
    BoxSelecting { anchor: Point, extent: Vec2 },
}

/// Background image placed behind the buttons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub path: PathBuf,
    /// Pixel size of the image.
    pub image_size: Size,
}

/// Result of asking the canvas to select a button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected,
    /// The button carries a script; it stays unselected and the caller
    /// should run the script.
    ScriptActivation(String),
    NotFound,
}

/// Serialized layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Buttons in paint order.
    #[serde(default)]
    pub buttons: Vec<ButtonRecord>,
    #[serde(default)]
    pub background: Option<Background>,
}

fn default_version() -> u32 {
    LAYOUT_VERSION
}

impl Default for LayoutDocument {
    fn default() -> Self {
        Self {
            version: LAYOUT_VERSION,
            buttons: Vec::new(),
            background: None,
        }
    }
}

impl LayoutDocument {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The picker canvas.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Buttons in paint order; later entries draw on top.
    buttons: Vec<Button>,
    selection: SelectionSet,
    mode: Mode,
    drag: DragState,
    background: Option<Background>,
    /// Visible size without a background.
    base_size: Size,
    background_scale: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Size::new(400.0, 400.0), 1.0)
    }
}

impl Canvas {
    pub fn new(base_size: Size, background_scale: f64) -> Self {
        Self {
            buttons: Vec::new(),
            selection: SelectionSet::new(),
            mode: Mode::default(),
            drag: DragState::Idle,
            background: None,
            base_size,
            background_scale,
        }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn button(&self, id: ButtonId) -> Option<&Button> {
        self.buttons.iter().find(|b| b.id == id)
    }

    pub fn button_mut(&mut self, id: ButtonId) -> Option<&mut Button> {
        self.buttons.iter_mut().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Append a button on top of the paint order.
    ///
    /// A button whose id is already on the canvas (a clone, say) gets a
    /// fresh one, so ids stay unique.
    pub fn add_button(&mut self, mut button: Button) -> ButtonId {
        button.selected = false;
        button.drag_offset = Vec2::ZERO;
        if self.button(button.id).is_some() {
            button.id = ButtonId::new_v4();
        }
        let id = button.id;
        self.buttons.push(button);
        id
    }

    /// Remove a button, dropping it from the selection.
    pub fn remove_button(&mut self, id: ButtonId) -> Option<Button> {
        let index = self.buttons.iter().position(|b| b.id == id)?;
        let mut button = self.buttons.remove(index);
        self.selection.remove(&mut button);
        self.forget_dragged(id);
        Some(button)
    }

    /// Move a button's center.
    pub fn move_button(&mut self, id: ButtonId, position: Point) -> bool {
        match self.button_mut(id) {
            Some(button) => {
                button.set_position(position);
                true
            }
            None => false,
        }
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Selected buttons, in selection order.
    pub fn selected_buttons(&self) -> impl Iterator<Item = &Button> {
        self.selection.ids().iter().filter_map(|id| self.button(*id))
    }

    /// Select a button. In browse mode a scripted button is not selected;
    /// its script is handed back instead.
    pub fn select_button(&mut self, id: ButtonId) -> SelectOutcome {
        let mode = self.mode;
        let Some(button) = self.buttons.iter_mut().find(|b| b.id == id) else {
            return SelectOutcome::NotFound;
        };
        if mode == Mode::Browse {
            if let Some(script) = button.script() {
                return SelectOutcome::ScriptActivation(script.to_string());
            }
        }
        self.selection.insert(button);
        SelectOutcome::Selected
    }

    pub fn deselect_button(&mut self, id: ButtonId) -> bool {
        match self.buttons.iter_mut().find(|b| b.id == id) {
            Some(button) => self.selection.remove(button),
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear(&mut self.buttons);
    }

    /// Remove every selected button and return them in paint order.
    pub fn remove_selected(&mut self) -> Vec<Button> {
        if self.selection.is_empty() {
            return Vec::new();
        }
        let (removed, kept): (Vec<Button>, Vec<Button>) =
            std::mem::take(&mut self.buttons).into_iter().partition(|b| b.selected);
        self.buttons = kept;
        self.selection.retain_live(&self.buttons);
        self.drag = DragState::Idle;
        removed
            .into_iter()
            .map(|mut b| {
                b.selected = false;
                b
            })
            .collect()
    }

    /// Align the selection. Needs at least two selected buttons.
    pub fn align_selected(&mut self, alignment: Alignment) -> bool {
        align::align(&mut self.buttons, self.selection.ids(), alignment)
    }

    /// Distribute the selection between the first two selected buttons.
    pub fn distribute_selected(&mut self) -> bool {
        align::distribute(&mut self.buttons, self.selection.ids())
    }

    /// Apply `f` to each selected button. Returns how many were touched.
    pub fn update_selected(&mut self, mut f: impl FnMut(&mut Button)) -> usize {
        let mut count = 0;
        for button in self.buttons.iter_mut().filter(|b| b.selected) {
            f(button);
            count += 1;
        }
        count
    }

    /// Topmost button under `point`.
    pub fn hit_test(&self, point: Point) -> Option<ButtonId> {
        hit::hit_test(&self.buttons, point)
    }

    /// Buttons overlapping `rect`, in paint order.
    pub fn box_hit_test(&self, rect: Rect) -> Vec<ButtonId> {
        hit::box_hit_test(&self.buttons, rect)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch mode. Any gesture in progress is abandoned; the selection is
    /// kept.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.drag = DragState::Idle;
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub(crate) fn set_drag_state(&mut self, drag: DragState) {
        self.drag = drag;
    }

    pub(crate) fn take_drag_state(&mut self) -> DragState {
        std::mem::take(&mut self.drag)
    }

    pub(crate) fn buttons_mut(&mut self) -> &mut [Button] {
        &mut self.buttons
    }

    /// Rubber band currently being drawn, normalized.
    pub fn selection_rect(&self) -> Option<Rect> {
        match &self.drag {
            DragState::BoxSelecting { anchor, extent } => {
                Some(Rect::from_points(*anchor, *anchor + *extent))
            }
            _ => None,
        }
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    pub fn set_background(&mut self, path: PathBuf, image_size: Size) {
        self.background = Some(Background { path, image_size });
    }

    pub fn clear_background(&mut self) {
        self.background = None;
    }

    /// Visible canvas size: the scaled background when there is one.
    pub fn size(&self) -> Size {
        match &self.background {
            Some(bg) => bg.image_size * self.background_scale,
            None => self.base_size,
        }
    }

    pub fn to_document(&self) -> LayoutDocument {
        LayoutDocument {
            version: LAYOUT_VERSION,
            buttons: self.buttons.iter().map(Button::to_record).collect(),
            background: self.background.clone(),
        }
    }

    /// Replace every button and the background from a document.
    ///
    /// The selection is emptied and any gesture abandoned. The mode is kept.
    /// Records repeating an earlier id are re-keyed.
    pub fn replace_from_document(&mut self, document: LayoutDocument, measure: &dyn TextMeasure) {
        let mut seen = HashSet::with_capacity(document.buttons.len());
        let buttons: Vec<Button> = document
            .buttons
            .into_iter()
            .map(|record| {
                let mut button = Button::from_record(record, measure);
                if !seen.insert(button.id) {
                    log::warn!("Duplicate button id {} in layout, re-keyed", button.id);
                    button.id = ButtonId::new_v4();
                    seen.insert(button.id);
                }
                button
            })
            .collect();
        self.selection = SelectionSet::new();
        self.buttons = buttons;
        self.background = document.background;
        self.drag = DragState::Idle;
    }

    fn forget_dragged(&mut self, id: ButtonId) {
        if let DragState::DraggingButtons(ids) = &mut self.drag {
            ids.retain(|d| *d != id);
            if ids.is_empty() {
                self.drag = DragState::Idle;
            }
        }
    }
}
