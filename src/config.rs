//! Service configuration

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Path of the JSON configuration document.
    pub config_file: String,
    /// Path of the `NAME=VALUE` credential file.
    pub env_file: String,
    /// Gemini model used for prompt generation.
    pub gemini_model: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            config_file: env::var("TUNESMITH_CONFIG_FILE").unwrap_or_else(|_| "config.json".into()),
            env_file: env::var("TUNESMITH_ENV_FILE").unwrap_or_else(|_| ".env".into()),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".into()),
        })
    }
}
