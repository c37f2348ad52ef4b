// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use crate::services::trainer_api::DEFAULT_API_BASE_URL;
use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the personal trainer REST API (no trailing slash)
    pub trainer_api_url: String,
    /// Admin frontend URL (allowed CORS origin)
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable has a default, so a bare environment gives a working
    /// local setup against the public trainer API.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let trainer_api_url = env::var("TRAINER_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        if !trainer_api_url.starts_with("http://") && !trainer_api_url.starts_with("https://") {
            return Err(ConfigError::Invalid("TRAINER_API_URL", trainer_api_url));
        }

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => 8080,
        };

        Ok(Self {
            trainer_api_url,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port,
        })
    }

    /// Config for tests, pointing at a local trainer API.
    pub fn test_default() -> Self {
        Self {
            trainer_api_url: "http://127.0.0.1:9/api".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    Invalid(&'static str, String),
}
