use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    application::repos::RepoError,
    domain::{
        editor::EditorTab,
        entities::{CategoryRecord, PostRecord},
        error::DomainError,
        form::{FieldErrors, PostField},
    },
};

use super::editor::PostEditor;

#[derive(Debug, Error)]
pub enum AdminPostError {
    #[error("post `{0}` not found")]
    NotFound(i64),
    #[error("form validation failed: {0}")]
    Validation(FieldErrors),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Result of the initial concurrent fetch: the seeded editor plus the records
/// it was seeded from.
#[derive(Debug, Clone)]
pub struct LoadedEditor {
    pub editor: PostEditor,
    pub post: PostRecord,
    pub categories: Vec<CategoryRecord>,
}

/// Client-held editor state carried between stateless requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostEditorSnapshot {
    pub values: BTreeMap<String, String>,
    #[serde(default)]
    pub unsaved: bool,
    #[serde(default)]
    pub tab: EditorTab,
}

impl PostEditorSnapshot {
    pub fn value(&self, field: PostField) -> Option<&str> {
        self.values.get(field.name()).map(String::as_str)
    }

    /// Known fields only; unknown keys are reported so callers can reject them.
    pub fn fields(&self) -> Result<Vec<(PostField, String)>, DomainError> {
        self.values
            .iter()
            .map(|(name, value)| PostField::from_name(name).map(|field| (field, value.clone())))
            .collect()
    }
}
