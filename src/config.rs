use std::time::Duration;

use crate::api::gemini::{self, DEFAULT_BASE_URL, DEFAULT_DESCRIBE_MODEL, DEFAULT_RENDER_MODEL};
use crate::api::RetryPolicy;

/// Where the Gemini API lives and how hard to try reaching it.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub describe_model: String,
    pub render_model: String,
    pub max_retries: u32,
    pub initial_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            describe_model: DEFAULT_DESCRIBE_MODEL.to_owned(),
            render_model: DEFAULT_RENDER_MODEL.to_owned(),
            max_retries: policy.max_retries,
            initial_delay_ms: policy.initial_delay.as_millis() as u64,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("base_url", &self.base_url)
            .field("describe_model", &self.describe_model)
            .field("render_model", &self.render_model)
            .field("max_retries", &self.max_retries)
            .field("initial_delay_ms", &self.initial_delay_ms)
            .finish()
    }
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from any variable lookup. Unset or empty
    /// variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(api_key) = var("GEMINI_API_KEY") {
            config.api_key = api_key;
        } else {
            log::warn!("GEMINI_API_KEY is not set; requests will be rejected by the service");
        }
        if let Some(base_url) = var("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(model) = var("GEMINI_DESCRIBE_MODEL") {
            config.describe_model = model;
        }
        if let Some(model) = var("GEMINI_RENDER_MODEL") {
            config.render_model = model;
        }
        if let Some(value) = var("DOODLE_MAX_RETRIES") {
            match value.trim().parse() {
                Ok(max_retries) => config.max_retries = max_retries,
                Err(e) => log::warn!("Ignoring DOODLE_MAX_RETRIES={:?}: {}", value, e),
            }
        }
        if let Some(value) = var("DOODLE_INITIAL_DELAY_MS") {
            match value.trim().parse() {
                Ok(delay) => config.initial_delay_ms = delay,
                Err(e) => log::warn!("Ignoring DOODLE_INITIAL_DELAY_MS={:?}: {}", value, e),
            }
        }

        config
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.initial_delay_ms))
    }

    pub fn describe_url(&self) -> String {
        gemini::generate_content_url(&self.base_url, &self.describe_model, &self.api_key)
    }

    pub fn render_url(&self) -> String {
        gemini::generate_content_url(&self.base_url, &self.render_model, &self.api_key)
    }
}
