//! Process-wide generative client handle
//!
//! The handle is built once at startup and only read afterwards. A failed
//! construction is a representable state rather than a missing global, so
//! every dispatch checks it explicitly.

use pulse_llm::GenerativeProvider;
use pulse_llm::providers::{GeminiConfig, GeminiProvider};
use pulse_utils::PulseConfig;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info};

/// Alert shown on every panel when the client could not be constructed
pub const INIT_FAILURE_MESSAGE: &str =
    "AI client initialization failed. Check that GEMINI_API_KEY is set.";

/// Outcome of client initialization
#[derive(Clone)]
pub enum ClientHandle {
    /// The client is ready for requests
    Ready(Arc<dyn GenerativeProvider>),
    /// Construction failed; no request may be attempted this session
    Failed(String),
}

impl ClientHandle {
    /// Construct the Gemini client from configuration
    pub fn from_config(config: &PulseConfig) -> Self {
        let provider = GeminiConfig::from_pulse_config(config).and_then(GeminiProvider::with_config);

        match provider {
            Ok(provider) => {
                info!(provider = provider.name(), model = %config.model, "AI client initialized");
                Self::Ready(Arc::new(provider))
            }
            Err(e) => {
                error!(error = %e, "AI client initialization failed");
                Self::Failed(e.to_string())
            }
        }
    }

    /// Wrap an existing provider
    pub fn ready(provider: Arc<dyn GenerativeProvider>) -> Self {
        Self::Ready(provider)
    }

    /// Whether requests may be issued
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Initialization failure reason, if any
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Failed(reason) => Some(reason),
        }
    }
}

impl fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(provider) => f.debug_tuple("Ready").field(&provider.name()).finish(),
            Self::Failed(reason) => f.debug_tuple("Failed").field(reason).finish(),
        }
    }
}
