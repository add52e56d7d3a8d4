//! Runtime configuration for the album client.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
const CONFIG_JSON_ENV: &str = "DINO_ALBUM_CONFIG";
#[cfg(not(target_arch = "wasm32"))]
const API_URL_ENV: &str = "DINO_ALBUM_API_URL";
#[cfg(not(target_arch = "wasm32"))]
const TIMEOUT_ENV: &str = "DINO_ALBUM_TIMEOUT_SECS";
#[cfg(not(target_arch = "wasm32"))]
const PAGE_SIZE_ENV: &str = "DINO_ALBUM_PAGE_SIZE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the album API. Empty means same origin.
    #[serde(default)]
    pub api_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_request_timeout_secs() -> u32 {
    15
}

fn default_page_size() -> u32 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
            page_size: default_page_size(),
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(raw)?;
        Ok(config.normalized())
    }

    /// Native: start from the JSON blob in `DINO_ALBUM_CONFIG` (if any), then
    /// let the per-field variables override it.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let base = match std::env::var(CONFIG_JSON_ENV) {
            Ok(raw) => Self::from_json(&raw).unwrap_or_else(|err| {
                tracing::warn!("ignoring {CONFIG_JSON_ENV}: {err}");
                Self::default()
            }),
            Err(_) => Self::default(),
        };
        Self {
            api_base_url: std::env::var(API_URL_ENV).unwrap_or(base.api_base_url),
            request_timeout_secs: env_u32(TIMEOUT_ENV).unwrap_or(base.request_timeout_secs),
            page_size: env_u32(PAGE_SIZE_ENV).unwrap_or(base.page_size),
        }
        .normalized()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let origin = web_sys::window()
            .and_then(|window| window.location().origin().ok())
            .unwrap_or_default();
        Self {
            api_base_url: origin,
            ..Self::default()
        }
        .normalized()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs as u64)
    }

    fn normalized(mut self) -> Self {
        self.api_base_url = self.api_base_url.trim().trim_end_matches('/').to_string();
        self.request_timeout_secs = self.request_timeout_secs.clamp(1, 120);
        self.page_size = self.page_size.clamp(1, 100);
        self
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn env_u32(key: &str) -> Option<u32> {
    std::env::var(key).ok()?.trim().parse::<u32>().ok()
}
