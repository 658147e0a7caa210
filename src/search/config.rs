//! Configuration for aggregated search.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::utils::env::{env_u64, env_usize};

/// Default per-module timeout in milliseconds.
fn default_module_timeout_ms() -> u64 {
    200
}

/// Default bound on concurrent in-flight calls per module.
fn default_max_inflight_per_module() -> usize {
    32
}

/// Default maximum query length in characters.
fn default_max_query_length() -> usize {
    1000
}

/// Configuration for the search coordinator.
///
/// The per-module timeout is the sole latency bound for a request: total
/// wall-clock is `module_timeout + ε`, independent of how many modules are
/// dispatched. There is no separate request-level deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Per-module search timeout in milliseconds.
    #[serde(default = "default_module_timeout_ms")]
    pub module_timeout_ms: u64,

    /// Maximum concurrent in-flight search calls per module across all
    /// requests. Waiting for a slot counts against the module's timeout.
    #[serde(default = "default_max_inflight_per_module")]
    pub max_inflight_per_module: usize,

    /// Maximum allowed query length in characters.
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            module_timeout_ms: default_module_timeout_ms(),
            max_inflight_per_module: default_max_inflight_per_module(),
            max_query_length: default_max_query_length(),
        }
    }
}

impl SearchConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-module timeout in milliseconds.
    pub fn with_module_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.module_timeout_ms = timeout_ms;
        self
    }

    /// Set the per-module timeout as a Duration.
    pub fn with_module_timeout(mut self, timeout: Duration) -> Self {
        self.module_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Set the per-module in-flight bound.
    pub fn with_max_inflight_per_module(mut self, max: usize) -> Self {
        self.max_inflight_per_module = max;
        self
    }

    /// Set the maximum query length.
    pub fn with_max_query_length(mut self, max: usize) -> Self {
        self.max_query_length = max;
        self
    }

    /// Get the per-module timeout as a Duration.
    pub fn module_timeout(&self) -> Duration {
        Duration::from_millis(self.module_timeout_ms)
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `HEARTH_SEARCH_MODULE_TIMEOUT_MS`: per-module timeout in ms
    /// - `HEARTH_SEARCH_MAX_INFLIGHT_PER_MODULE`: in-flight bound per module
    /// - `HEARTH_SEARCH_MAX_QUERY_LENGTH`: max query length in characters
    pub fn from_env() -> Self {
        Self {
            module_timeout_ms: env_u64(
                "HEARTH_SEARCH_MODULE_TIMEOUT_MS",
                default_module_timeout_ms(),
            ),
            max_inflight_per_module: env_usize(
                "HEARTH_SEARCH_MAX_INFLIGHT_PER_MODULE",
                default_max_inflight_per_module(),
            ),
            max_query_length: env_usize(
                "HEARTH_SEARCH_MAX_QUERY_LENGTH",
                default_max_query_length(),
            ),
        }
    }
}
