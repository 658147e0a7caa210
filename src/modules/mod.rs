//! Built-in feature modules.

pub mod bookmarks;
pub mod notes;
