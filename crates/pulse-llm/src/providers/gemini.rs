//! Google Gemini provider implementation
//!
//! This module implements the GenerativeProvider trait for the Gemini
//! `generateContent` endpoint, with optional Google Search grounding.
//! See: https://ai.google.dev/api/generate-content
//!
//! # Example
//!
//! ```no_run
//! use pulse_llm::{GenerateRequest, GenerativeProvider};
//! use pulse_llm::providers::GeminiProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GeminiProvider::from_env()?;
//!
//!     let request = GenerateRequest::builder("gemini-2.5-flash")
//!         .prompt("What moved the Nasdaq today?")
//!         .web_search(true)
//!         .build();
//!
//!     let response = provider.generate(request).await?;
//!     println!("{}", response.text);
//!     for citation in &response.citations {
//!         println!("  {:?}", citation.uri);
//!     }
//!     Ok(())
//! }
//! ```

use crate::{
    Citation, FinishReason, GenerateRequest, GenerateResponse, GenerativeProvider, LLMError,
    Result, TokenUsage,
};
use async_trait::async_trait;
use pulse_utils::PulseConfig;
use pulse_utils::config::DEFAULT_API_BASE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Configuration for the Gemini provider
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key sent in the `x-goog-api-key` header
    pub api_key: String,

    /// Base URL (default: "https://generativelanguage.googleapis.com/v1beta")
    pub api_base: String,

    /// Optional request timeout; requests wait indefinitely when unset
    pub timeout: Option<Duration>,
}

impl GeminiConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: None,
        }
    }

    /// Create config from environment variables
    ///
    /// Reads the key from `GEMINI_API_KEY` (or `API_KEY`) and the base URL
    /// from `GEMINI_API_BASE` if set.
    pub fn from_env() -> Result<Self> {
        let config = PulseConfig::from_env()
            .map_err(|e| LLMError::ConfigurationError(e.to_string()))?;
        Self::from_pulse_config(&config)
    }

    /// Derive provider settings from the shared application config
    pub fn from_pulse_config(config: &PulseConfig) -> Result<Self> {
        let api_key = config.usable_api_key().ok_or_else(|| {
            LLMError::ConfigurationError("GEMINI_API_KEY environment variable not set".to_string())
        })?;

        Ok(Self {
            api_key: api_key.to_string(),
            api_base: config.api_base.clone(),
            timeout: config.request_timeout,
        })
    }

    /// Set a custom base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

}

/// Gemini provider
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Create a provider with default settings for the given key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(GeminiConfig::new(api_key))
    }

    /// Create a provider from environment variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(GeminiConfig::from_env()?)
    }

    /// Create a provider with a custom configuration
    ///
    /// Fails when the key is blank or the base URL is not an http(s) URL.
    pub fn with_config(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(LLMError::ConfigurationError(
                "API key must not be empty".to_string(),
            ));
        }

        let base = Url::parse(&config.api_base).map_err(|e| {
            LLMError::ConfigurationError(format!("Invalid API base '{}': {e}", config.api_base))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(LLMError::ConfigurationError(format!(
                "Unsupported API base scheme: {}",
                base.scheme()
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get the configuration
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:generateContent",
            self.config.api_base.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl GenerativeProvider for GeminiProvider {
    #[instrument(skip(self, request), fields(model = %request.model, web_search = request.web_search))]
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        debug!("Sending request to Gemini API");

        let model = request.model.clone();
        let body = build_request(request);

        let response = self
            .client
            .post(self.endpoint(&model))
            .header("x-goog-api-key", &self.config.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        let parsed = decode_response(status, &body, &model)?;

        debug!(
            "Received response - finish_reason: {:?}, citations: {}, tokens: {:?}",
            parsed.finish_reason,
            parsed.citations.len(),
            parsed.usage.map(|u| u.total())
        );

        Ok(parsed)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

fn build_request(request: GenerateRequest) -> GeminiRequest {
    GeminiRequest {
        contents: vec![GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart {
                text: Some(request.prompt),
            }],
        }],
        tools: if request.web_search {
            vec![GeminiTool {
                google_search: GoogleSearch {},
            }]
        } else {
            Vec::new()
        },
        generation_config: request
            .temperature
            .map(|temperature| GenerationConfig { temperature }),
    }
}

fn map_status(status: u16, error_text: String, model: &str) -> LLMError {
    match status {
        400 => LLMError::InvalidRequest(error_text),
        401 | 403 => LLMError::AuthenticationFailed,
        404 => LLMError::ModelNotFound(model.to_string()),
        429 => LLMError::RateLimitExceeded(error_text),
        _ => LLMError::RequestFailed(format!("HTTP {status}: {error_text}")),
    }
}

/// Turn a raw HTTP reply into a response or a typed error
fn decode_response(status: u16, body: &str, model: &str) -> Result<GenerateResponse> {
    if !(200..300).contains(&status) {
        return Err(map_status(status, body.to_string(), model));
    }

    let response: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| LLMError::UnexpectedResponse(format!("Failed to parse response: {e}")))?;

    parse_response(response)
}

fn parse_response(response: GeminiResponse) -> Result<GenerateResponse> {
    let usage = response.usage_metadata.map(|u| TokenUsage {
        input_tokens: u.prompt_token_count.unwrap_or(0),
        output_tokens: u.candidates_token_count.unwrap_or(0),
    });

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map_or_else(
                || "response contained no candidates".to_string(),
                |r| format!("prompt blocked: {r}"),
            );
        return Err(LLMError::UnexpectedResponse(reason));
    };

    let finish_reason = FinishReason::from_wire(candidate.finish_reason.as_deref());

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        return Err(LLMError::UnexpectedResponse(format!(
            "candidate contained no text (finish reason: {finish_reason:?})"
        )));
    }

    let citations = candidate
        .grounding_metadata
        .map(|m| m.grounding_chunks)
        .unwrap_or_default()
        .into_iter()
        .map(|chunk| chunk.web.unwrap_or_default())
        .collect();

    Ok(GenerateResponse {
        text,
        citations,
        finish_reason,
        usage,
    })
}

// Gemini-specific request/response types
// These match the REST API field names

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<GeminiTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GeminiTool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<UsageMetadata>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<Citation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<usize>,
    candidates_token_count: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}
