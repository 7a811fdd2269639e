//! Host collaborator interfaces.
//!
//! The editor never talks to the host application directly. Selection
//! queries and mutations go through [`SelectionProvider`], modal prompts go
//! through [`Dialogs`].

use crate::button::SerializableColor;
use kurbo::Size;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Callback invoked when the host selection changes.
pub type SelectionListener = Box<dyn FnMut()>;

/// Handle returned by [`SelectionProvider::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(pub u64);

/// Access to the host's selectable entities.
pub trait SelectionProvider {
    /// Currently selected entity names, in host order.
    fn selection(&self) -> Vec<String>;

    /// Replace the host selection.
    fn set_selection(&mut self, names: &[String]);

    /// Whether an entity with this name exists.
    fn entity_exists(&self, name: &str) -> bool;

    /// World-space X position of an entity, `None` if it doesn't exist.
    fn entity_world_x(&self, name: &str) -> Option<f64>;

    /// Delete entities from the host scene.
    fn delete_entities(&mut self, names: &[String]);

    /// Register a selection-change listener.
    fn subscribe(&mut self, listener: SelectionListener) -> SubscriptionHandle;

    /// Remove a listener registered with [`subscribe`](Self::subscribe).
    fn unsubscribe(&mut self, handle: SubscriptionHandle);
}

/// Modal prompts. Every method blocks until the user confirms or cancels;
/// `None` means cancel.
pub trait Dialogs {
    fn pick_color(&mut self, current: SerializableColor) -> Option<SerializableColor>;

    fn edit_text(&mut self, title: &str, current: &str) -> Option<String>;

    fn pick_save_path(&mut self) -> Option<PathBuf>;

    fn pick_open_path(&mut self) -> Option<PathBuf>;

    /// Pick a background image; returns its path and pixel size.
    fn pick_image(&mut self) -> Option<(PathBuf, Size)>;
}

/// Dialogs that cancel every prompt. Used by headless hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct CancelDialogs;

impl Dialogs for CancelDialogs {
    fn pick_color(&mut self, _current: SerializableColor) -> Option<SerializableColor> {
        None
    }

    fn edit_text(&mut self, _title: &str, _current: &str) -> Option<String> {
        None
    }

    fn pick_save_path(&mut self) -> Option<PathBuf> {
        None
    }

    fn pick_open_path(&mut self) -> Option<PathBuf> {
        None
    }

    fn pick_image(&mut self) -> Option<(PathBuf, Size)> {
        None
    }
}

#[derive(Default)]
struct MemoryHostState {
    /// Entity name and world X, in creation order.
    entities: Vec<(String, f64)>,
    selection: Vec<String>,
    listeners: Vec<(u64, SelectionListener)>,
    next_handle: u64,
}

/// In-memory host scene for tests and headless use.
///
/// Cloning yields another handle onto the same scene, so a test can keep a
/// handle while the editor owns another.
#[derive(Clone, Default)]
pub struct MemoryHost {
    state: Rc<RefCell<MemoryHostState>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host scene with the given entities and world X positions.
    pub fn with_entities<I, S>(entities: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let host = Self::new();
        for (name, x) in entities {
            host.add_entity(name, x);
        }
        host
    }

    pub fn add_entity(&self, name: impl Into<String>, world_x: f64) {
        self.state.borrow_mut().entities.push((name.into(), world_x));
    }

    /// Names of all entities still in the scene.
    pub fn entities(&self) -> Vec<String> {
        self.state
            .borrow()
            .entities
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Number of live selection listeners.
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    fn notify(&self) {
        // Listeners run without the state borrowed so they may query the host.
        let mut listeners = std::mem::take(&mut self.state.borrow_mut().listeners);
        for (_, listener) in listeners.iter_mut() {
            listener();
        }
        let mut state = self.state.borrow_mut();
        listeners.append(&mut state.listeners);
        state.listeners = listeners;
    }
}

impl SelectionProvider for MemoryHost {
    fn selection(&self) -> Vec<String> {
        self.state.borrow().selection.clone()
    }

    fn set_selection(&mut self, names: &[String]) {
        {
            let mut state = self.state.borrow_mut();
            let known: Vec<String> = names
                .iter()
                .filter(|n| state.entities.iter().any(|(e, _)| e == *n))
                .cloned()
                .collect();
            state.selection = known;
        }
        self.notify();
    }

    fn entity_exists(&self, name: &str) -> bool {
        self.state.borrow().entities.iter().any(|(e, _)| e == name)
    }

    fn entity_world_x(&self, name: &str) -> Option<f64> {
        self.state
            .borrow()
            .entities
            .iter()
            .find(|(e, _)| e == name)
            .map(|(_, x)| *x)
    }

    fn delete_entities(&mut self, names: &[String]) {
        let changed = {
            let mut state = self.state.borrow_mut();
            state.entities.retain(|(e, _)| !names.contains(e));
            let before = state.selection.len();
            state.selection.retain(|s| !names.contains(s));
            state.selection.len() != before
        };
        if changed {
            self.notify();
        }
    }

    fn subscribe(&mut self, listener: SelectionListener) -> SubscriptionHandle {
        let mut state = self.state.borrow_mut();
        state.next_handle += 1;
        let handle = state.next_handle;
        state.listeners.push((handle, listener));
        SubscriptionHandle(handle)
    }

    fn unsubscribe(&mut self, handle: SubscriptionHandle) {
        self.state
            .borrow_mut()
            .listeners
            .retain(|(id, _)| *id != handle.0);
    }
}
