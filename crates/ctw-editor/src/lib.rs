pub mod bindings;
pub mod config;
pub mod editor;
pub mod engine;
pub mod history;
pub mod input;
pub mod notice;
pub mod outcome;
pub mod shortcuts;
pub mod tools;
pub mod viewport;

pub use config::EditorConfig;
pub use editor::MapEditor;
pub use engine::{GraphMutation, MapEngine};
pub use input::{InputEvent, Modifiers, PointerButton};
pub use notice::Notice;
pub use outcome::{EditOutcome, EditWarning};
pub use tools::{ToolKind, ToolOptions};
pub use viewport::Viewport;
