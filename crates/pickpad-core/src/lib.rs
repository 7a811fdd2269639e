//! Pickpad Core Library
//!
//! Platform-agnostic picker canvas: buttons bound to host entities, selection
//! bookkeeping, hit testing, the pointer state machine and layout storage.

pub mod align;
pub mod button;
pub mod canvas;
pub mod config;
pub mod editor;
pub mod hit;
pub mod host;
pub mod input;
pub mod interaction;
pub mod palette;
pub mod script;
pub mod selection;
pub mod shortcuts;
pub mod storage;

pub use align::Alignment;
pub use button::{
    Button, ButtonId, ButtonRecord, ButtonShape, FixedAdvanceMeasure, SerializableColor,
    TextMeasure,
};
pub use canvas::{Background, Canvas, DragState, LayoutDocument, Mode, SelectOutcome};
pub use config::{ConfigError, EditorConfig};
pub use editor::{EditorError, EditorSession};
pub use host::{CancelDialogs, Dialogs, MemoryHost, SelectionProvider, SubscriptionHandle};
pub use input::{KeyCommand, Modifiers, PointerEvent};
pub use interaction::Effect;
pub use palette::{ColorPolicy, NamePolicy, NeutralPolicy, SideColors, SidePolicy};
pub use script::{CommandRunner, ScriptError, ScriptRunner, ScriptTrust};
pub use selection::SelectionSet;
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use storage::{FileStorage, LayoutStorage, MemoryStorage, StorageError, StorageResult};
