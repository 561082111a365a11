//! Generation request and response types

use serde::{Deserialize, Serialize};

/// Request for a single search-grounded generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model identifier (provider-specific)
    pub model: String,

    /// Prompt text sent as the only user turn
    pub prompt: String,

    /// Ask the service to ground its answer with live web search
    pub web_search: bool,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Response from a generation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Free-form answer text
    pub text: String,

    /// Grounding citations in the order the service returned them
    pub citations: Vec<Citation>,

    /// Why the model stopped generating
    pub finish_reason: FinishReason,

    /// Token usage statistics, when the service reports them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

/// A web source supporting part of a generated answer
///
/// Both fields are optional on the wire; the URI is the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Citation {
    /// Source URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// Display title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Citation {
    /// Create a citation with a URI and optional title
    pub fn new(uri: impl Into<String>, title: Option<&str>) -> Self {
        Self {
            uri: Some(uri.into()),
            title: title.map(str::to_string),
        }
    }

    /// Create a citation with a URI and a title
    pub fn titled(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            title: Some(title.into()),
        }
    }
}

/// Reason the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural completion
    Stop,

    /// Hit max tokens limit
    MaxTokens,

    /// Output withheld for safety reasons
    Safety,

    /// Output withheld for recitation reasons
    Recitation,

    /// Any other or missing reason
    Other,
}

impl FinishReason {
    /// Map the service's upper-case reason string
    pub fn from_wire(reason: Option<&str>) -> Self {
        match reason {
            Some("STOP") => Self::Stop,
            Some("MAX_TOKENS") => Self::MaxTokens,
            Some("SAFETY") => Self::Safety,
            Some("RECITATION") => Self::Recitation,
            _ => Self::Other,
        }
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of prompt tokens
    pub input_tokens: usize,

    /// Number of generated tokens
    pub output_tokens: usize,
}

impl TokenUsage {
    /// Total tokens used (input + output)
    pub fn total(&self) -> usize {
        self.input_tokens + self.output_tokens
    }
}

impl GenerateRequest {
    /// Create a builder for generation requests
    pub fn builder(model: impl Into<String>) -> GenerateRequestBuilder {
        GenerateRequestBuilder::new(model)
    }
}

/// Builder for GenerateRequest
pub struct GenerateRequestBuilder {
    model: String,
    prompt: String,
    web_search: bool,
    temperature: Option<f32>,
}

impl GenerateRequestBuilder {
    /// Create a new builder
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: String::new(),
            web_search: false,
            temperature: None,
        }
    }

    /// Set the prompt text
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Enable or disable web-search grounding
    pub fn web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Build the generation request
    pub fn build(self) -> GenerateRequest {
        GenerateRequest {
            model: self.model,
            prompt: self.prompt,
            web_search: self.web_search,
            temperature: self.temperature,
        }
    }
}
