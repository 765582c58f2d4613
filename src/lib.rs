//! bookmarkit library crate.
//!
//! This library provides the core functionality for bookmarkit, including:
//! - The YAML-backed bookmark store
//! - Selection line encoding and link classification
//! - The `add` / `find` workflows
//! - Desktop and terminal collaborators (clipboard, notifications, prompts)

pub mod action;
pub mod bookmarks;
pub mod commands;
pub mod config;
pub mod error;
pub mod selection;
pub mod system;
pub mod ui;

pub use error::{Error, Result};
