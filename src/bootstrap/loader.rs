//! Built-in module loader.
//!
//! Module discovery is static: the built-in modules are constructed here in
//! a fixed order, and that order is the registration order every downstream
//! consumer (searchable index, endpoint mounting, widget listing) observes.

use std::sync::Arc;

use crate::modules::bookmarks::BookmarksModule;
use crate::modules::notes::NotesModule;
use crate::registry::Module;

/// Construct the built-in modules in their fixed load order.
pub fn load_builtin_modules() -> Vec<Arc<dyn Module>> {
    vec![
        Arc::new(NotesModule::new()),
        Arc::new(BookmarksModule::new()),
    ]
}
