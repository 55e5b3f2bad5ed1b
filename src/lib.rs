//! Core library for MDE, the MiniMessage Dialog Editor.
//! Provides the dialog model, a MiniMessage renderer, a bounded undo/redo history and the
//! preview projection used by the editor window.

pub mod debounce;
pub mod dialog;
mod gui;
pub mod history;
pub mod markup;
pub mod notify;
pub mod presets;
pub mod preview;
pub mod session;
pub mod statics;

pub use dialog::DialogState;
pub use gui::{GuiOptions, run_gui};
pub use history::History;
pub use session::{EditorSession, SessionConfig};
