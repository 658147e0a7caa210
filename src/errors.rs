//! Top-level application error.

use thiserror::Error;

use crate::registry::RegistryError;

/// Errors that abort the node at startup or tear down the servers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// Module registration failed; the node must not serve requests.
    #[error("module registration failed: {0}")]
    Registry(#[from] RegistryError),

    /// Server I/O failure (bind, accept, serve).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
