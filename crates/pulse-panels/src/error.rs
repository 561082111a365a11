//! Error types for panel dispatch

use crate::kind::{PanelKind, Query};
use pulse_llm::LLMError;
use thiserror::Error;

/// Why a dispatch failed
#[derive(Debug, Error)]
pub enum DispatchCause {
    /// The client failed to initialize
    #[error("AI client unavailable: {0}")]
    ClientUnavailable(String),

    /// The prompt template could not be rendered
    #[error("Prompt rendering failed: {0}")]
    Prompt(#[from] minijinja::Error),

    /// The outbound call failed (network, service, or malformed response)
    #[error(transparent)]
    Request(#[from] LLMError),
}

/// A failed request, tagged with the panel and query that issued it
#[derive(Debug, Error)]
#[error("{kind} request{} failed: {cause}", query_suffix(.query.as_ref()))]
pub struct DispatchError {
    /// Panel that issued the request
    pub kind: PanelKind,
    /// Original query, absent for the news panel
    pub query: Option<Query>,
    /// Underlying cause
    #[source]
    pub cause: DispatchCause,
}

fn query_suffix(query: Option<&Query>) -> String {
    query.map(|q| format!(" for {q}")).unwrap_or_default()
}

impl DispatchError {
    /// Create a new dispatch error
    pub fn new(kind: PanelKind, query: Option<Query>, cause: impl Into<DispatchCause>) -> Self {
        Self {
            kind,
            query,
            cause: cause.into(),
        }
    }

    /// Alert text shown in the panel for this failure
    pub fn user_message(&self) -> String {
        self.kind.failure_message(self.query.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DispatchError::new(
            PanelKind::Financials,
            Query::parse("XYZ"),
            LLMError::AuthenticationFailed,
        );
        assert_eq!(
            err.to_string(),
            "financials request for XYZ failed: Invalid API key or authentication failed"
        );
        assert!(err.user_message().contains("XYZ"));
    }

    #[test]
    fn test_news_error_display() {
        let err = DispatchError::new(
            PanelKind::News,
            None,
            DispatchCause::ClientUnavailable("no key".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "news request failed: AI client unavailable: no key"
        );
        assert_eq!(
            err.user_message(),
            "Failed to fetch trending news. Please try again later."
        );
    }
}
