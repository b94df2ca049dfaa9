//! Domain layer types and invariants.

pub mod editor;
pub mod entities;
pub mod error;
pub mod form;
pub mod types;
