//! Quire: an admin edit surface for blog posts.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
