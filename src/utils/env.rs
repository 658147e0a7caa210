//! Environment variable parsing utilities.
//!
//! Provides consistent helpers for loading configuration from environment
//! variables. Each helper follows the pattern: try env var → parse → fallback
//! to default.

/// Get a u64 from environment, with default fallback.
///
/// Returns `default` if:
/// - Environment variable is not set
/// - Value cannot be parsed as u64
#[inline]
pub fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Get a u16 from environment, with default fallback.
#[inline]
pub fn env_u16(key: &str, default: u16) -> u16 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Get a usize from environment, with default fallback.
#[inline]
pub fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Get a bool from environment, with default fallback.
///
/// Accepts "true"/"false" case-insensitively.
#[inline]
pub fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| s.to_lowercase() == "true")
        .unwrap_or(default)
}

/// Get a string from environment, with default fallback.
#[inline]
pub fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
