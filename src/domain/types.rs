//! Shared domain enumerations aligned with persisted database enums.

pub use quire_api_types::PostStatus;
