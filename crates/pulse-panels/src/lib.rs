//! Market commentary panels
//!
//! This crate drives three independent commentary panels (chart analysis,
//! financial metrics, trending news) on top of a search-grounded generative
//! service. It includes:
//!
//! - Prompt templates per panel kind
//! - A request dispatcher that issues exactly one call per request and never
//!   lets a failure escape as a fault
//! - A panel controller owning the Idle/Loading/Success/Error lifecycle
//! - A formatter that turns answers and citations into renderables, keeping
//!   the first citation per URI
//! - View adapters mapping renderables onto a surface (headless, HTML)
//!
//! # Example
//!
//! ```rust,ignore
//! use pulse_panels::{ClientHandle, Dashboard, MemoryView};
//! use pulse_utils::PulseConfig;
//!
//! let config = PulseConfig::from_env()?;
//! let client = ClientHandle::from_config(&config);
//! let mut dashboard = Dashboard::new(client, &config, |_| MemoryView::default());
//!
//! // Fetches trending news, or shows the init alert everywhere
//! dashboard.start().await;
//! dashboard.submit_chart("AAPL").await;
//! ```

pub mod client;
pub mod dashboard;
pub mod dispatcher;
pub mod error;
pub mod html;
pub mod kind;
pub mod panel;
pub mod prompts;
pub mod render;
pub mod view;

// Re-export main types for convenience
pub use client::{ClientHandle, INIT_FAILURE_MESSAGE};
pub use dashboard::Dashboard;
pub use dispatcher::{Answer, Dispatcher};
pub use error::{DispatchCause, DispatchError};
pub use html::HtmlView;
pub use kind::{PanelKind, Query};
pub use panel::{Panel, PanelState};
pub use prompts::{Prompt, PromptTemplates};
pub use render::{AnswerView, Renderable, Source};
pub use view::{MemoryView, PanelView, SubmitControl, ViewEvent};

#[cfg(test)]
pub(crate) mod testing {
    //! Shared test doubles

    use async_trait::async_trait;
    use mockall::mock;
    use pulse_llm::{
        Citation, FinishReason, GenerateRequest, GenerateResponse, GenerativeProvider,
    };

    mock! {
        pub Provider {}

        #[async_trait]
        impl GenerativeProvider for Provider {
            async fn generate(&self, request: GenerateRequest) -> pulse_llm::Result<GenerateResponse>;
            fn name(&self) -> &'static str;
        }
    }

    pub fn answer(text: &str, citations: Vec<Citation>) -> GenerateResponse {
        GenerateResponse {
            text: text.to_string(),
            citations,
            finish_reason: FinishReason::Stop,
            usage: None,
        }
    }
}
