//! Hearth node library.
//!
//! A modular home hub: feature modules are registered once at startup into a
//! capability registry, and a search coordinator fans free-text queries out
//! to every search-capable module concurrently, merging the results into one
//! deterministic aggregate.

pub mod api;
pub mod bootstrap;
pub mod errors;
pub mod modules;
pub mod registry;
pub mod runner;
pub mod search;
pub mod utils;
