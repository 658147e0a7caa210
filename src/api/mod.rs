//! HTTP API layer.

pub mod app_state;
pub mod dto;
pub mod rest;

pub use app_state::AppState;
