//! Node configuration loaded from the environment.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::search::SearchConfig;
use crate::utils::env::{env_bool, env_string, env_u16};

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// REST server port.
    pub rest_port: u16,
}

/// CORS configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins.
    pub allowed_origins: Vec<String>,

    /// Whether to allow credentials.
    pub allow_credentials: bool,
}

/// Complete node configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub search: SearchConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `HEARTH_REST_PORT`: REST server port (default 4000)
    /// - `HEARTH_CORS_ALLOWED_ORIGINS`: comma-separated origins
    /// - `HEARTH_CORS_ALLOW_CREDENTIALS`: true/false
    /// - plus the `HEARTH_SEARCH_*` variables (see [`SearchConfig::from_env`])
    pub fn from_env() -> Result<Self, AppError> {
        let allowed_origins = env_string("HEARTH_CORS_ALLOWED_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            server: ServerConfig {
                rest_port: env_u16("HEARTH_REST_PORT", 4000),
            },
            cors: CorsConfig {
                allowed_origins,
                allow_credentials: env_bool("HEARTH_CORS_ALLOW_CREDENTIALS", false),
            },
            search: SearchConfig::from_env(),
        })
    }

    /// Configuration for tests: ephemeral port, default search settings.
    pub fn for_tests() -> Self {
        Self {
            server: ServerConfig { rest_port: 0 },
            cors: CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
                allow_credentials: false,
            },
            search: SearchConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_defaults() {
        let config = Config::from_env().unwrap();

        assert_eq!(config.server.rest_port, 4000);
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000"]);
        assert!(!config.cors.allow_credentials);
        assert_eq!(config.search.module_timeout_ms, 200);
    }
}
