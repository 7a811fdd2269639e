//! Editor session: ties the canvas to the host, storage and dialogs.

use crate::align::Alignment;
use crate::button::{
    Button, ButtonId, ButtonShape, FixedAdvanceMeasure, SerializableColor, TextMeasure,
};
use crate::canvas::{Canvas, Mode, SelectOutcome};
use crate::config::{ConfigError, EditorConfig};
use crate::host::{Dialogs, SelectionProvider, SubscriptionHandle};
use crate::input::{KeyCommand, PointerEvent};
use crate::interaction::{self, Effect};
use crate::palette::{ColorPolicy, NeutralPolicy};
use crate::script::{ScriptError, ScriptTrust};
use crate::storage::{FileStorage, LayoutStorage, StorageError};
use kurbo::{Point, Size};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

/// Errors surfaced by an editor session.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Script on button {button} failed: {source}")]
    Script {
        button: ButtonId,
        #[source]
        source: ScriptError,
    },
}

/// One picker editing session bound to a host.
///
/// The session subscribes to host selection changes on creation and
/// unsubscribes in [`close`](Self::close) or on drop. Notifications only set
/// a flag; call [`pump_host_events`](Self::pump_host_events) from the event
/// loop to apply them.
pub struct EditorSession {
    config: EditorConfig,
    canvas: Canvas,
    host: Box<dyn SelectionProvider>,
    storage: Box<dyn LayoutStorage>,
    measure: Box<dyn TextMeasure>,
    color_policy: Box<dyn ColorPolicy>,
    scripts: ScriptTrust,
    subscription: Option<SubscriptionHandle>,
    host_changed: Rc<Cell<bool>>,
    redraw_requested: bool,
    errors: Vec<EditorError>,
}

impl EditorSession {
    pub fn new(config: EditorConfig, mut host: Box<dyn SelectionProvider>) -> Self {
        let host_changed = Rc::new(Cell::new(false));
        let flag = host_changed.clone();
        let subscription = host.subscribe(Box::new(move || flag.set(true)));
        log::info!("Editor session started");

        Self {
            canvas: Canvas::new(config.canvas_size, config.background_scale),
            storage: Box::new(FileStorage::new(config.layout_extension.clone())),
            config,
            host,
            measure: Box::new(FixedAdvanceMeasure::default()),
            color_policy: Box::new(NeutralPolicy),
            scripts: ScriptTrust::default(),
            subscription: Some(subscription),
            host_changed,
            redraw_requested: true,
            errors: Vec::new(),
        }
    }

    pub fn with_color_policy(mut self, policy: impl ColorPolicy + 'static) -> Self {
        self.color_policy = Box::new(policy);
        self
    }

    pub fn with_script_trust(mut self, trust: ScriptTrust) -> Self {
        log::info!("Script trust set to {:?}", trust);
        self.scripts = trust;
        self
    }

    /// Use the render surface's text metrics for label sizing.
    pub fn with_text_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    pub fn with_storage(mut self, storage: impl LayoutStorage + 'static) -> Self {
        self.storage = Box::new(storage);
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn host(&self) -> &dyn SelectionProvider {
        self.host.as_ref()
    }

    pub fn mode(&self) -> Mode {
        self.canvas.mode()
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.canvas.mode() != mode {
            log::debug!("Mode: {:?}", mode);
            self.canvas.set_mode(mode);
            self.redraw_requested = true;
        }
    }

    pub fn toggle_mode(&mut self) -> Mode {
        let mode = self.canvas.mode().toggled();
        self.set_mode(mode);
        mode
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Press { position } => self.press(position),
            PointerEvent::Drag { position } => self.drag(position),
            PointerEvent::Release { position } => self.release(position),
        }
    }

    pub fn press(&mut self, point: Point) {
        let effects = interaction::press(&mut self.canvas, point);
        self.apply(effects);
    }

    pub fn drag(&mut self, point: Point) {
        let effects = interaction::drag(&mut self.canvas, point);
        self.apply(effects);
    }

    pub fn release(&mut self, point: Point) {
        let effects = interaction::release(&mut self.canvas, point, self.config.click_threshold);
        self.apply(effects);
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Redraw => self.redraw_requested = true,
                Effect::PushSelection(entities) => self.host.set_selection(&entities),
                Effect::CreateButtons(point) => {
                    self.create_buttons_at(point);
                }
                Effect::RunScript { button, script } => self.run_script(button, &script),
            }
        }
    }

    /// Handle a key command. Align and distribute only apply in edit mode.
    pub fn key(
        &mut self,
        command: KeyCommand,
        dialogs: &mut dyn Dialogs,
    ) -> Result<(), EditorError> {
        if command.is_edit_only() && self.mode() != Mode::Edit {
            return Ok(());
        }
        match command {
            KeyCommand::Delete => {
                self.delete_selected();
            }
            KeyCommand::Save => {
                self.save_with_dialog(dialogs)?;
            }
            KeyCommand::Open => {
                self.open_with_dialog(dialogs)?;
            }
            KeyCommand::Align(alignment) => {
                self.align(alignment);
            }
            KeyCommand::Distribute => {
                self.distribute();
            }
        }
        Ok(())
    }

    fn color_for(&self, entity: &str) -> SerializableColor {
        self.color_policy
            .color_for(entity, self.host.as_ref())
            .unwrap_or(self.config.default_color)
    }

    /// Create buttons for the current host selection at `point`.
    ///
    /// One entity gets one ellipse. Several get a group rect bound to all of
    /// them plus one ellipse per entity stacked below it.
    pub fn create_buttons_at(&mut self, point: Point) -> Vec<ButtonId> {
        let entities = self.host.selection();
        let mut created = Vec::new();
        match entities.as_slice() {
            [] => {
                log::debug!("Click with empty host selection, nothing to create");
            }
            [entity] => {
                let button = Button::ellipse(point, self.config.single_size, entity.clone())
                    .with_color(self.color_for(entity));
                created.push(self.canvas.add_button(button));
            }
            many => {
                let group = Button::group(point, self.config.group_size, many.to_vec())
                    .with_color(self.config.default_color);
                created.push(self.canvas.add_button(group));
                for (i, entity) in many.iter().enumerate() {
                    let y = point.y + self.config.row_spacing * (i + 1) as f64;
                    let position = Point::new(point.x, y);
                    let button = Button::ellipse(position, self.config.single_size, entity.clone())
                        .with_color(self.color_for(entity));
                    created.push(self.canvas.add_button(button));
                }
            }
        }
        if !created.is_empty() {
            log::info!("Created {} button(s) for {} entities", created.len(), entities.len());
            self.redraw_requested = true;
        }
        created
    }

    pub fn add_button(&mut self, button: Button) -> ButtonId {
        self.redraw_requested = true;
        self.canvas.add_button(button)
    }

    pub fn remove_button(&mut self, id: ButtonId) -> Option<Button> {
        let removed = self.canvas.remove_button(id);
        self.redraw_requested |= removed.is_some();
        removed
    }

    pub fn move_button(&mut self, id: ButtonId, position: Point) -> bool {
        let moved = self.canvas.move_button(id, position);
        self.redraw_requested |= moved;
        moved
    }

    /// Select a button. In browse mode a scripted button runs its script
    /// instead and stays unselected.
    pub fn select_button(&mut self, id: ButtonId) -> bool {
        match self.canvas.select_button(id) {
            SelectOutcome::Selected => {
                self.redraw_requested = true;
                true
            }
            SelectOutcome::ScriptActivation(script) => {
                self.run_script(id, &script);
                false
            }
            SelectOutcome::NotFound => false,
        }
    }

    pub fn deselect_button(&mut self, id: ButtonId) -> bool {
        let changed = self.canvas.deselect_button(id);
        self.redraw_requested |= changed;
        changed
    }

    pub fn clear_selection(&mut self) {
        self.canvas.clear_selection();
        self.redraw_requested = true;
    }

    fn run_script(&mut self, button: ButtonId, script: &str) {
        self.canvas.deselect_button(button);
        match self.scripts.run(script, self.host.as_mut()) {
            Ok(()) => log::debug!("Ran script of button {}", button),
            Err(source) => {
                log::error!("Script on button {} failed: {}", button, source);
                self.errors.push(EditorError::Script { button, source });
            }
        }
        self.redraw_requested = true;
    }

    /// Delete the selected buttons. In browse mode their bound entities are
    /// deleted from the host as well. Returns how many buttons were removed.
    pub fn delete_selected(&mut self) -> usize {
        let removed = self.canvas.remove_selected();
        if removed.is_empty() {
            return 0;
        }
        if self.mode() == Mode::Browse {
            let mut entities: Vec<String> = Vec::new();
            for entity in removed.iter().flat_map(|b| b.bound_entities()) {
                if !entities.contains(entity) {
                    entities.push(entity.clone());
                }
            }
            log::info!("Deleting {} host entities", entities.len());
            self.host.delete_entities(&entities);
        }
        log::info!("Deleted {} button(s)", removed.len());
        self.redraw_requested = true;
        removed.len()
    }

    /// Align the selection. Edit mode only, needs two or more selected.
    pub fn align(&mut self, alignment: Alignment) -> bool {
        if self.mode() != Mode::Edit {
            return false;
        }
        let changed = self.canvas.align_selected(alignment);
        self.redraw_requested |= changed;
        changed
    }

    /// Distribute the selection between the first two selected buttons.
    pub fn distribute(&mut self) -> bool {
        if self.mode() != Mode::Edit {
            return false;
        }
        let changed = self.canvas.distribute_selected();
        self.redraw_requested |= changed;
        changed
    }

    fn touched(&mut self, count: usize) -> usize {
        self.redraw_requested |= count > 0;
        count
    }

    pub fn set_color(&mut self, color: SerializableColor) -> usize {
        let count = self.canvas.update_selected(|b| b.set_color(color));
        self.touched(count)
    }

    pub fn set_label(&mut self, label: &str) -> usize {
        let measure = self.measure.as_ref();
        let count = self.canvas.update_selected(|b| b.set_label(label, measure));
        self.touched(count)
    }

    pub fn set_size_offset(&mut self, offset: f64) -> usize {
        let count = self.canvas.update_selected(|b| b.set_size_offset(offset));
        self.touched(count)
    }

    pub fn set_shape(&mut self, shape: ButtonShape) -> usize {
        let count = self.canvas.update_selected(|b| b.set_shape(shape));
        self.touched(count)
    }

    /// Attach a script to the selected buttons; `None` or blank detaches.
    pub fn attach_script(&mut self, script: Option<&str>) -> usize {
        let count = self
            .canvas
            .update_selected(|b| b.set_script(script.map(str::to_string)));
        self.touched(count)
    }

    pub fn set_background(&mut self, path: PathBuf, image_size: Size) {
        log::info!("Background image: {}", path.display());
        self.canvas.set_background(path, image_size);
        self.redraw_requested = true;
    }

    pub fn clear_background(&mut self) {
        self.canvas.clear_background();
        self.redraw_requested = true;
    }

    /// Prompt for a color for the selection. Cancel changes nothing.
    pub fn edit_color(&mut self, dialogs: &mut dyn Dialogs) -> bool {
        let Some(current) = self.canvas.selected_buttons().next().map(Button::color) else {
            return false;
        };
        match dialogs.pick_color(current) {
            Some(color) => self.set_color(color) > 0,
            None => false,
        }
    }

    pub fn edit_label(&mut self, dialogs: &mut dyn Dialogs) -> bool {
        let current = self
            .canvas
            .selected_buttons()
            .next()
            .map(|b| b.label().to_string());
        let Some(current) = current else {
            return false;
        };
        match dialogs.edit_text("Label", &current) {
            Some(label) => self.set_label(&label) > 0,
            None => false,
        }
    }

    pub fn edit_script(&mut self, dialogs: &mut dyn Dialogs) -> bool {
        let Some(current) = self
            .canvas
            .selected_buttons()
            .next()
            .map(|b| b.script().unwrap_or_default().to_string())
        else {
            return false;
        };
        match dialogs.edit_text("Script", &current) {
            Some(script) => self.attach_script(Some(&script)) > 0,
            None => false,
        }
    }

    pub fn choose_background(&mut self, dialogs: &mut dyn Dialogs) -> bool {
        match dialogs.pick_image() {
            Some((path, size)) => {
                self.set_background(path, size);
                true
            }
            None => false,
        }
    }

    /// Save the layout. `Ok(false)` when the extension doesn't match.
    pub fn save(&mut self, path: &Path) -> Result<bool, EditorError> {
        let document = self.canvas.to_document();
        self.storage.save(path, &document).map_err(|e| {
            log::error!("Failed to save {}: {}", path.display(), e);
            EditorError::from(e)
        })
    }

    /// Load a layout, replacing every button. On error the canvas is left as
    /// it was. `Ok(false)` when the extension doesn't match.
    pub fn load(&mut self, path: &Path) -> Result<bool, EditorError> {
        let document = match self.storage.load(path) {
            Ok(Some(document)) => document,
            Ok(None) => return Ok(false),
            Err(e) => {
                log::error!("Failed to load {}: {}", path.display(), e);
                return Err(e.into());
            }
        };
        self.canvas.replace_from_document(document, self.measure.as_ref());
        log::info!("Loaded {} button(s) from {}", self.canvas.len(), path.display());
        self.redraw_requested = true;
        Ok(true)
    }

    pub fn save_with_dialog(&mut self, dialogs: &mut dyn Dialogs) -> Result<bool, EditorError> {
        match dialogs.pick_save_path() {
            Some(path) => self.save(&path),
            None => Ok(false),
        }
    }

    pub fn open_with_dialog(&mut self, dialogs: &mut dyn Dialogs) -> Result<bool, EditorError> {
        match dialogs.pick_open_path() {
            Some(path) => self.load(&path),
            None => Ok(false),
        }
    }

    /// Mirror the host selection: a button is selected exactly when all of
    /// its bound entities are. Buttons with no entities or with a script are
    /// left alone.
    pub fn sync_from_host(&mut self) {
        let host_selection = self.host.selection();
        let wanted: Vec<(ButtonId, bool)> = self
            .canvas
            .buttons()
            .iter()
            .filter(|b| !b.bound_entities().is_empty() && !b.is_scripted())
            .map(|b| {
                let all = b.bound_entities().iter().all(|e| host_selection.contains(e));
                (b.id(), all)
            })
            .collect();
        for (id, selected) in wanted {
            if selected {
                self.canvas.select_button(id);
            } else {
                self.canvas.deselect_button(id);
            }
        }
        self.redraw_requested = true;
    }

    /// Apply a pending host selection change. Returns whether there was one.
    pub fn pump_host_events(&mut self) -> bool {
        if self.host_changed.replace(false) {
            self.sync_from_host();
            true
        } else {
            false
        }
    }

    /// Whether a redraw was requested since the last call.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Errors queued since the last call, oldest first.
    pub fn take_errors(&mut self) -> Vec<EditorError> {
        std::mem::take(&mut self.errors)
    }

    /// Stop listening to the host. Safe to call more than once.
    pub fn close(&mut self) {
        if let Some(handle) = self.subscription.take() {
            self.host.unsubscribe(handle);
            log::info!("Editor session closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.subscription.is_none()
    }
}

impl Drop for EditorSession {
    fn drop(&mut self) {
        self.close();
    }
}
