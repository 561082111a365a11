//! Generative provider trait definition

use crate::{GenerateRequest, GenerateResponse, Result};
use async_trait::async_trait;

/// Trait for generative-language backends
///
/// A provider performs exactly one outbound call per `generate` invocation.
/// Retrying is left to the caller.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Generate content for a single prompt
    ///
    /// # Arguments
    ///
    /// * `request` - Model, prompt text and search-grounding switch
    ///
    /// # Returns
    ///
    /// The answer text together with any grounding citations, in response order
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;

    /// Get the provider name (e.g., "gemini")
    fn name(&self) -> &'static str;
}
