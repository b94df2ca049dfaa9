//! Application services for the administrative surface.

pub mod chrome;
pub mod posts;
