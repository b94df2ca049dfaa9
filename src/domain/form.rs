//! Form state for the post editor: field values, inline errors and the
//! unsaved-changes flag.

use std::{collections::BTreeMap, fmt};

use serde::Serialize;

use crate::domain::{entities::PostRecord, error::DomainError, types::PostStatus};

/// Inputs rendered by the post editor, keyed by their submitted names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PostField {
    Title,
    Category,
    Status,
    Content,
}

impl PostField {
    pub const ALL: [PostField; 4] = [
        PostField::Title,
        PostField::Category,
        PostField::Status,
        PostField::Content,
    ];

    /// Name used in form submissions and datastar signals.
    pub fn name(self) -> &'static str {
        match self {
            PostField::Title => "title",
            PostField::Category => "category.id",
            PostField::Status => "status",
            PostField::Content => "content",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, DomainError> {
        match name {
            "title" => Ok(PostField::Title),
            "category.id" | "category_id" => Ok(PostField::Category),
            "status" => Ok(PostField::Status),
            "content" => Ok(PostField::Content),
            other => Err(DomainError::unknown_field(other)),
        }
    }

    pub fn rule(self) -> FieldRule {
        match self {
            PostField::Title => FieldRule::required("Title is required"),
            PostField::Category => FieldRule::required("Category is required").as_number(),
            PostField::Status => FieldRule::required("Status is required"),
            PostField::Content => FieldRule::required("Content is required"),
        }
    }
}

impl fmt::Display for PostField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validation rule attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub required: &'static str,
    pub value_as_number: bool,
}

impl FieldRule {
    const fn required(message: &'static str) -> Self {
        Self {
            required: message,
            value_as_number: false,
        }
    }

    const fn as_number(mut self) -> Self {
        self.value_as_number = true;
        self
    }

    /// Returns the rule message when `value` does not satisfy the rule.
    pub fn check(&self, value: &str) -> Option<&'static str> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Some(self.required);
        }
        if self.value_as_number && trimmed.parse::<i64>().is_err() {
            return Some(self.required);
        }
        None
    }
}

/// A single observed edit. `value == None` is a reset artifact, not an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: PostField,
    pub value: Option<String>,
}

impl FieldChange {
    pub fn new(field: PostField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: Some(value.into()),
        }
    }

    pub fn reset(field: PostField) -> Self {
        Self { field, value: None }
    }
}

/// Inline error messages keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<PostField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: PostField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: PostField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PostField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Payload produced by a successful validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedPost {
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub category_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: BTreeMap<PostField, String>,
    errors: FieldErrors,
    dirty: bool,
}

impl FormState {
    /// Seed defaults from a fetched record. Seeding never marks the form dirty.
    pub fn seeded(post: &PostRecord) -> Self {
        let mut values = BTreeMap::new();
        values.insert(PostField::Title, post.title.clone());
        values.insert(PostField::Category, post.category_id.to_string());
        values.insert(PostField::Status, post.status.as_str().to_string());
        values.insert(PostField::Content, post.content.clone());
        Self {
            values,
            errors: FieldErrors::new(),
            dirty: false,
        }
    }

    /// Rebuild state from previously submitted values.
    pub fn from_values<I>(values: I, dirty: bool) -> Self
    where
        I: IntoIterator<Item = (PostField, String)>,
    {
        Self {
            values: values.into_iter().collect(),
            errors: FieldErrors::new(),
            dirty,
        }
    }

    pub fn value(&self, field: PostField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> impl Iterator<Item = (PostField, &str)> {
        self.values
            .iter()
            .map(|(field, value)| (*field, value.as_str()))
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Apply a batch of observed edits.
    ///
    /// Reset artifacts are skipped. The dirty flag is raised only when the batch
    /// carries at least one defined value and `track_unsaved` is enabled.
    /// Returns whether the flag changed.
    pub fn apply(&mut self, changes: &[FieldChange], track_unsaved: bool) -> bool {
        let mut touched = false;
        for change in changes {
            if let Some(value) = change.value.as_ref() {
                self.values.insert(change.field, value.clone());
                touched = true;
            }
        }

        if touched && track_unsaved && !self.dirty {
            self.dirty = true;
            return true;
        }
        false
    }

    /// Check every field; stores and returns the inline errors on failure.
    pub fn validate(&mut self) -> Result<ValidatedPost, FieldErrors> {
        let mut errors = FieldErrors::new();
        for field in PostField::ALL {
            if let Some(message) = field.rule().check(self.value(field)) {
                errors.insert(field, message);
            }
        }

        let status = match self.value(PostField::Status).parse::<PostStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                errors.insert(PostField::Status, "Status is invalid");
                None
            }
        };
        let category_id = self.value(PostField::Category).trim().parse::<i64>().ok();

        match (status, category_id) {
            (Some(status), Some(category_id)) if errors.is_empty() => {
                self.errors = FieldErrors::new();
                Ok(ValidatedPost {
                    title: self.value(PostField::Title).trim().to_string(),
                    content: self.value(PostField::Content).to_string(),
                    status,
                    category_id,
                })
            }
            _ => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }

    /// Record an error discovered outside of field rules (for example an
    /// unknown category id).
    pub fn reject(&mut self, field: PostField, message: impl Into<String>) {
        self.errors.insert(field, message);
    }
}
