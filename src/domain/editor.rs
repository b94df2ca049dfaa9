//! Editor lifecycle: which content tab is visible and where the page sits in
//! its load/edit/submit cycle.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorTab {
    #[default]
    Write,
    Preview,
}

impl EditorTab {
    pub fn as_str(self) -> &'static str {
        match self {
            EditorTab::Write => "write",
            EditorTab::Preview => "preview",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            EditorTab::Write => EditorTab::Preview,
            EditorTab::Preview => EditorTab::Write,
        }
    }
}

impl FromStr for EditorTab {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "write" => Ok(EditorTab::Write),
            "preview" => Ok(EditorTab::Preview),
            other => Err(DomainError::invariant(format!(
                "unknown editor tab `{other}`"
            ))),
        }
    }
}

impl fmt::Display for EditorTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Loading -> Ready -> (Editing <-> Submitting) -> Done`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorPhase {
    Loading,
    Ready,
    Editing,
    Submitting,
    Done,
}

impl EditorPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            EditorPhase::Loading => "loading",
            EditorPhase::Ready => "ready",
            EditorPhase::Editing => "editing",
            EditorPhase::Submitting => "submitting",
            EditorPhase::Done => "done",
        }
    }

    pub fn is_interactive(self) -> bool {
        matches!(self, EditorPhase::Ready | EditorPhase::Editing)
    }

    pub fn can_transition_to(self, next: EditorPhase) -> bool {
        use EditorPhase::*;
        matches!(
            (self, next),
            (Loading, Ready)
                | (Ready, Editing)
                | (Ready, Submitting)
                | (Editing, Editing)
                | (Editing, Submitting)
                | (Submitting, Editing)
                | (Submitting, Done)
        )
    }

    pub fn transition(self, next: EditorPhase) -> Result<EditorPhase, DomainError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(DomainError::invariant(format!(
                "editor cannot move from {} to {}",
                self.as_str(),
                next.as_str()
            )))
        }
    }
}
