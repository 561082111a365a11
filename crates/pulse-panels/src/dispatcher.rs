//! Request dispatcher
//!
//! Builds the kind-specific prompt and performs exactly one search-grounded
//! generation through the client handle. Every failure comes back as a
//! [`DispatchError`] tagged with the panel kind and query; nothing is retried.

use crate::client::ClientHandle;
use crate::error::{DispatchCause, DispatchError};
use crate::kind::{PanelKind, Query};
use crate::prompts::PromptTemplates;
use pulse_llm::{Citation, GenerateRequest, LLMError, TokenUsage};
use pulse_utils::PulseConfig;
use tracing::{error, info, instrument};

/// A successful generation
#[derive(Debug, Clone)]
pub struct Answer {
    /// Answer text
    pub text: String,
    /// Citations in response order, unfiltered
    pub citations: Vec<Citation>,
    /// Token usage, if reported
    pub usage: Option<TokenUsage>,
}

/// Issues panel requests against the generative service
#[derive(Debug, Clone)]
pub struct Dispatcher {
    templates: PromptTemplates,
    model: String,
}

impl Dispatcher {
    /// Create a dispatcher for a model and news market scope
    pub fn new(model: impl Into<String>, market: impl Into<String>) -> Self {
        Self {
            templates: PromptTemplates::new(market),
            model: model.into(),
        }
    }

    /// Create a dispatcher from application configuration
    pub fn from_config(config: &PulseConfig) -> Self {
        Self::new(config.model.clone(), config.market.clone())
    }

    /// Run one request for a panel
    ///
    /// `query` must be present for chart and financials and is ignored for
    /// news.
    #[instrument(
        skip(self, client, kind, query),
        fields(kind = %kind, query = ?query.as_ref().map(Query::as_str))
    )]
    pub async fn dispatch(
        &self,
        client: &ClientHandle,
        kind: PanelKind,
        query: Option<Query>,
    ) -> Result<Answer, DispatchError> {
        let query = if kind.takes_query() { query } else { None };

        let result = self.try_dispatch(client, kind, query.as_ref()).await;

        match result {
            Ok(answer) => {
                info!(
                    citations = answer.citations.len(),
                    tokens = ?answer.usage.map(|u| u.total()),
                    "Request completed"
                );
                Ok(answer)
            }
            Err(cause) => {
                let err = DispatchError::new(kind, query, cause);
                error!(error = %err, "Request failed");
                Err(err)
            }
        }
    }

    async fn try_dispatch(
        &self,
        client: &ClientHandle,
        kind: PanelKind,
        query: Option<&Query>,
    ) -> Result<Answer, DispatchCause> {
        let provider = match client {
            ClientHandle::Ready(provider) => provider,
            ClientHandle::Failed(reason) => {
                return Err(DispatchCause::ClientUnavailable(reason.clone()));
            }
        };

        if kind.takes_query() && query.is_none() {
            return Err(LLMError::InvalidRequest(format!("{kind} panel requires a query")).into());
        }

        let prompt = self.templates.render(kind, query)?;

        info!(model = %self.model, "Dispatching request");

        let request = GenerateRequest::builder(self.model.as_str())
            .prompt(prompt.into_string())
            .web_search(true)
            .build();

        let response = provider.generate(request).await?;

        Ok(Answer {
            text: response.text,
            citations: response.citations,
            usage: response.usage,
        })
    }
}
