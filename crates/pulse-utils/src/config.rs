//! Configuration management utilities

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default Gemini endpoint root
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model used for every panel
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Market scope used by the trending news panel
pub const DEFAULT_MARKET: &str = "U.S. stock market";

/// Errors raised while loading or validating configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A setting was present but could not be parsed
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    /// A required setting was empty
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulseConfig {
    /// Credential for the generative service
    ///
    /// A missing key is not a configuration error; it surfaces later as a
    /// failed client initialization.
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,

    /// Base URL of the generative service
    pub api_base: String,

    /// Model identifier sent with every request
    pub model: String,

    /// Market scope for the trending news panel
    pub market: String,

    /// Optional per-request timeout (none by default)
    pub request_timeout: Option<Duration>,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            market: DEFAULT_MARKET.to_string(),
            request_timeout: None,
        }
    }
}

impl PulseConfig {
    /// Create a new configuration builder
    pub fn builder() -> PulseConfigBuilder {
        PulseConfigBuilder::default()
    }

    /// Load configuration from the process environment
    ///
    /// Reads `GEMINI_API_KEY` (falling back to `API_KEY`), `GEMINI_API_BASE`,
    /// `MARKET_PULSE_MODEL`, `MARKET_PULSE_MARKET` and
    /// `MARKET_PULSE_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(key) = lookup("GEMINI_API_KEY").or_else(|| lookup("API_KEY")) {
            builder = builder.api_key(key);
        }
        if let Some(base) = lookup("GEMINI_API_BASE") {
            builder = builder.api_base(base);
        }
        if let Some(model) = lookup("MARKET_PULSE_MODEL") {
            builder = builder.model(model);
        }
        if let Some(market) = lookup("MARKET_PULSE_MARKET") {
            builder = builder.market(market);
        }
        if let Some(raw) = lookup("MARKET_PULSE_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: "MARKET_PULSE_TIMEOUT_SECS".to_string(),
                reason: format!("{e}"),
            })?;
            builder = builder.request_timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base.trim().is_empty() {
            return Err(ConfigError::Empty("api_base"));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Empty("model"));
        }
        if self.market.trim().is_empty() {
            return Err(ConfigError::Empty("market"));
        }
        if self.request_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// API key with surrounding whitespace removed, if one is usable
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Builder for PulseConfig
#[derive(Debug, Default)]
pub struct PulseConfigBuilder {
    api_key: Option<String>,
    api_base: Option<String>,
    model: Option<String>,
    market: Option<String>,
    request_timeout: Option<Duration>,
}

impl PulseConfigBuilder {
    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the service base URL
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the news market scope
    pub fn market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    /// Set a per-request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<PulseConfig, ConfigError> {
        let defaults = PulseConfig::default();

        let config = PulseConfig {
            api_key: self.api_key,
            api_base: self.api_base.unwrap_or(defaults.api_base),
            model: self.model.unwrap_or(defaults.model),
            market: self.market.unwrap_or(defaults.market),
            request_timeout: self.request_timeout.or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}
