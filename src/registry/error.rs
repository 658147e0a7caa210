//! Error types for module registration.
//!
//! Registration errors are fatal: they abort startup before any request can
//! be served.

use thiserror::Error;

/// Errors raised while registering modules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two modules declared the same key.
    ///
    /// Keys are the sole identity for search results and endpoint mounting,
    /// so aliasing is never recoverable.
    #[error("duplicate module key: {0}")]
    KeyCollision(String),

    /// A module declared an empty key.
    #[error("module \"{name}\" has an empty key")]
    EmptyKey {
        /// The module's display name, for diagnostics.
        name: String,
    },
}
