use crate::error::{config_error, env_error, CalResult};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::fs;
use url::Url;

/// Default timeout for a single store request, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default capacity of the store actor's command mailbox
pub const DEFAULT_COMMAND_BUFFER: usize = 32;

/// Default capacity of the out-of-band failure channel
pub const DEFAULT_FAILURE_BUFFER: usize = 16;

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the calendar event store
    pub store_url: String,
    /// Timeout for a single store request, in seconds
    pub request_timeout_secs: u64,
    /// Capacity of the store actor's command mailbox
    pub command_buffer: usize,
    /// Capacity of the out-of-band failure channel
    pub failure_buffer: usize,
}

/// Optional file-based defaults, overridden by the environment
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    store_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from environment and optional config file
    pub fn load() -> CalResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // File values are fallbacks only; the environment wins
        let file_config = Self::load_file("config/store.toml")?;

        let store_url = env::var("CALENDAR_STORE_URL")
            .ok()
            .or(file_config.store_url)
            .ok_or_else(|| env_error("CALENDAR_STORE_URL"))?;

        // Validate eagerly so a bad URL fails at startup, not mid-request
        Url::parse(&store_url)
            .map_err(|e| config_error(&format!("Invalid CALENDAR_STORE_URL: {}", e)))?;

        let request_timeout_secs = match env::var("STORE_REQUEST_TIMEOUT_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| config_error("Invalid STORE_REQUEST_TIMEOUT_SECS format"))?,
            Err(_) => file_config
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Config {
            store_url,
            request_timeout_secs,
            command_buffer: DEFAULT_COMMAND_BUFFER,
            failure_buffer: DEFAULT_FAILURE_BUFFER,
        })
    }

    fn load_file(path: &str) -> CalResult<FileConfig> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(_) => Ok(FileConfig::default()),
        }
    }
}
