//! Generative-language client for market-pulse
//!
//! This crate provides the narrow slice of a generative service that the
//! commentary panels consume:
//!
//! - Request/response types for a single search-grounded generation
//! - Citation types extracted from grounding metadata
//! - Provider trait for generative backends
//! - The Gemini provider implementation (behind the `gemini` feature)

pub mod error;
pub mod generate;
pub mod provider;

// Re-export main types
pub use error::{LLMError, Result};
pub use generate::{Citation, FinishReason, GenerateRequest, GenerateResponse, TokenUsage};
pub use provider::GenerativeProvider;

// Provider implementations (feature-gated)
#[cfg(feature = "gemini")]
pub mod providers;
