//! Panel controller
//!
//! A [`Panel`] owns one panel's Idle → Loading → Success/Error lifecycle and
//! pushes every visible change through its [`PanelView`].

use crate::client::{ClientHandle, INIT_FAILURE_MESSAGE};
use crate::dispatcher::Dispatcher;
use crate::kind::{PanelKind, Query};
use crate::render::{Renderable, render_answer};
use crate::view::{PanelView, SubmitControl};
use serde::Serialize;
use tracing::{debug, warn};

/// Lifecycle state of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    /// Nothing requested yet
    Idle,
    /// A request is in flight
    Loading,
    /// The last request produced an answer
    Success,
    /// The last request failed, or the client never initialized
    Error,
}

/// One commentary panel bound to a view
pub struct Panel<V> {
    kind: PanelKind,
    state: PanelState,
    dispatcher: Dispatcher,
    view: V,
}

impl<V: PanelView> Panel<V> {
    /// Create an idle panel
    pub fn new(kind: PanelKind, dispatcher: Dispatcher, view: V) -> Self {
        Self {
            kind,
            state: PanelState::Idle,
            dispatcher,
            view,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// The bound view
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Handle a submit from the panel's input
    ///
    /// Blank input and a failed client are ignored without touching the
    /// view. Otherwise exactly one request is issued.
    pub async fn submit(&mut self, client: &ClientHandle, raw: &str) -> PanelState {
        if !self.kind.takes_query() {
            warn!(kind = %self.kind, "Panel has no query input; submit ignored");
            return self.state;
        }

        let Some(query) = Query::parse(raw) else {
            debug!(kind = %self.kind, "Empty query ignored");
            return self.state;
        };

        if !client.is_ready() {
            warn!(kind = %self.kind, query = %query, "AI client not initialized; submit ignored");
            return self.state;
        }

        self.run(client, Some(query)).await
    }

    /// Run the news pipeline once
    pub async fn fetch_news(&mut self, client: &ClientHandle) -> PanelState {
        if self.kind.takes_query() {
            warn!(kind = %self.kind, "fetch_news called on a query panel; ignored");
            return self.state;
        }

        if !client.is_ready() {
            warn!("AI client not initialized; news fetch skipped");
            return self.state;
        }

        self.run(client, None).await
    }

    /// Show the fixed initialization failure alert
    pub fn show_init_failure(&mut self) {
        self.view.show(Renderable::alert(INIT_FAILURE_MESSAGE));
        self.state = PanelState::Error;
    }

    async fn run(&mut self, client: &ClientHandle, query: Option<Query>) -> PanelState {
        self.enter_loading();

        let outcome = self.dispatcher.dispatch(client, self.kind, query).await;

        match outcome {
            Ok(answer) => {
                self.view
                    .show(render_answer(&answer.text, &answer.citations));
                self.state = PanelState::Success;
            }
            Err(err) => {
                self.view.show(Renderable::alert(err.user_message()));
                self.state = PanelState::Error;
            }
        }

        self.restore_submit();
        self.state
    }

    fn enter_loading(&mut self) {
        self.state = PanelState::Loading;
        if self.kind.has_submit_control() {
            self.view.set_submit(SubmitControl::busy(self.kind));
        }
        self.view.show(Renderable::Loading);
    }

    fn restore_submit(&mut self) {
        if self.kind.has_submit_control() {
            self.view.set_submit(SubmitControl::idle(self.kind));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockProvider, answer};
    use crate::view::{MemoryView, ViewEvent};
    use pulse_llm::{Citation, LLMError};
    use std::sync::Arc;

    fn panel(kind: PanelKind) -> Panel<MemoryView> {
        Panel::new(
            kind,
            Dispatcher::new("gemini-test", "U.S. stock market"),
            MemoryView::default(),
        )
    }

    fn client_with(provider: MockProvider) -> ClientHandle {
        ClientHandle::ready(Arc::new(provider))
    }

    #[tokio::test]
    async fn test_success_transitions() {
        let mut provider = MockProvider::new();
        provider.expect_generate().times(1).returning(|_| {
            Ok(answer(
                "Line one\nLine two",
                vec![Citation::titled("https://a.example", "A")],
            ))
        });
        let client = client_with(provider);
        let mut panel = panel(PanelKind::Chart);
        assert_eq!(panel.state(), PanelState::Idle);

        let state = panel.submit(&client, "  AAPL ").await;
        assert_eq!(state, PanelState::Success);

        let history = panel.view().history();
        assert_eq!(history.len(), 4);
        assert_eq!(
            history[0],
            ViewEvent::Submit {
                control: SubmitControl::busy(PanelKind::Chart)
            }
        );
        assert_eq!(
            history[1],
            ViewEvent::Show {
                content: Renderable::Loading
            }
        );
        match &history[2] {
            ViewEvent::Show {
                content: Renderable::Answer(view),
            } => {
                assert_eq!(view.lines, vec!["Line one", "Line two"]);
                assert_eq!(view.sources.len(), 1);
            }
            other => panic!("Expected answer, got {other:?}"),
        }
        assert_eq!(
            history[3],
            ViewEvent::Submit {
                control: SubmitControl::idle(PanelKind::Chart)
            }
        );
    }

    #[tokio::test]
    async fn test_financials_failure_alert_and_restore() {
        let mut provider = MockProvider::new();
        provider
            .expect_generate()
            .times(1)
            .returning(|_| Err(LLMError::RequestFailed("HTTP 502: bad gateway".to_string())));
        let client = client_with(provider);
        let mut panel = panel(PanelKind::Financials);

        let state = panel.submit(&client, "XYZ").await;
        assert_eq!(state, PanelState::Error);

        match panel.view().output() {
            Some(Renderable::Alert { message }) => {
                assert!(message.contains("XYZ"));
                assert!(message.contains("financial metrics"));
            }
            other => panic!("Expected alert, got {other:?}"),
        }
        let submit = panel.view().submit().unwrap();
        assert!(submit.enabled);
        assert_eq!(submit.label, PanelKind::Financials.submit_label());
    }

    #[tokio::test]
    async fn test_blank_query_issues_no_call() {
        let mut provider = MockProvider::new();
        provider.expect_generate().never();
        let client = client_with(provider);
        let mut panel = panel(PanelKind::Chart);

        for raw in ["", "   ", "\n\t"] {
            assert_eq!(panel.submit(&client, raw).await, PanelState::Idle);
        }
        assert!(panel.view().history().is_empty());
    }

    #[tokio::test]
    async fn test_failed_client_ignores_submit() {
        let client = ClientHandle::Failed("missing key".to_string());
        let mut panel = panel(PanelKind::Financials);
        panel.show_init_failure();

        let state = panel.submit(&client, "AAPL").await;

        assert_eq!(state, PanelState::Error);
        assert_eq!(panel.view().history().len(), 1);
    }

    #[tokio::test]
    async fn test_resubmit_after_error() {
        let mut provider = MockProvider::new();
        let mut calls = 0;
        provider.expect_generate().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(LLMError::RateLimitExceeded("quota".to_string()))
            } else {
                Ok(answer("Recovered", vec![]))
            }
        });
        let client = client_with(provider);
        let mut panel = panel(PanelKind::Chart);

        assert_eq!(panel.submit(&client, "AMD").await, PanelState::Error);
        assert_eq!(panel.submit(&client, "AMD").await, PanelState::Success);
        assert!(!panel.view().output().unwrap().is_alert());
    }

    #[tokio::test]
    async fn test_news_never_touches_submit_control() {
        let mut provider = MockProvider::new();
        provider
            .expect_generate()
            .times(1)
            .returning(|_| Err(LLMError::AuthenticationFailed));
        let client = client_with(provider);
        let mut panel = panel(PanelKind::News);

        assert_eq!(panel.fetch_news(&client).await, PanelState::Error);

        assert!(panel.view().submit().is_none());
        assert!(
            panel
                .view()
                .history()
                .iter()
                .all(|e| matches!(e, ViewEvent::Show { .. }))
        );
        assert_eq!(
            panel.view().output(),
            Some(&Renderable::alert(
                "Failed to fetch trending news. Please try again later."
            ))
        );
    }

    #[tokio::test]
    async fn test_news_panel_rejects_submit() {
        let mut provider = MockProvider::new();
        provider.expect_generate().never();
        let client = client_with(provider);
        let mut panel = panel(PanelKind::News);

        assert_eq!(panel.submit(&client, "AAPL").await, PanelState::Idle);
    }
}
