//! Startup configuration and module loading.

pub mod config;
pub mod loader;
