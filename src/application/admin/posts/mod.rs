mod commands;
mod editor;
mod queries;
mod service;
pub mod types;

pub use editor::PostEditor;
pub use service::*;
pub use types::{AdminPostError, LoadedEditor, PostEditorSnapshot};
