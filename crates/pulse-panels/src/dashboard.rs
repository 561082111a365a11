//! The three-panel dashboard
//!
//! Owns the client handle, which is built once and only read afterwards, and
//! one [`Panel`] per kind. Panels share no mutable state.

use crate::client::ClientHandle;
use crate::dispatcher::Dispatcher;
use crate::kind::PanelKind;
use crate::panel::{Panel, PanelState};
use crate::view::PanelView;
use pulse_utils::PulseConfig;
use tracing::{debug, info};

/// Chart, financials and news panels over one client
pub struct Dashboard<V> {
    client: ClientHandle,
    started: bool,
    chart: Panel<V>,
    financials: Panel<V>,
    news: Panel<V>,
}

impl<V: PanelView> Dashboard<V> {
    /// Create a dashboard, building one view per panel kind
    pub fn new<F>(client: ClientHandle, config: &PulseConfig, mut make_view: F) -> Self
    where
        F: FnMut(PanelKind) -> V,
    {
        let dispatcher = Dispatcher::from_config(config);

        Self {
            client,
            started: false,
            chart: Panel::new(PanelKind::Chart, dispatcher.clone(), make_view(PanelKind::Chart)),
            financials: Panel::new(
                PanelKind::Financials,
                dispatcher.clone(),
                make_view(PanelKind::Financials),
            ),
            news: Panel::new(PanelKind::News, dispatcher, make_view(PanelKind::News)),
        }
    }

    /// Startup: fetch trending news, or show the init alert everywhere
    ///
    /// When the client failed to initialize no request is attempted at all.
    /// Runs once; later calls do nothing.
    pub async fn start(&mut self) {
        if self.started {
            debug!("Dashboard already started");
            return;
        }
        self.started = true;

        if let Some(reason) = self.client.failure_reason() {
            info!(reason, "Client unavailable; disabling all panels");
            self.chart.show_init_failure();
            self.financials.show_init_failure();
            self.news.show_init_failure();
            return;
        }

        self.news.fetch_news(&self.client).await;
    }

    /// Submit the chart form
    pub async fn submit_chart(&mut self, raw: &str) -> PanelState {
        self.chart.submit(&self.client, raw).await
    }

    /// Submit the financials form
    pub async fn submit_financials(&mut self, raw: &str) -> PanelState {
        self.financials.submit(&self.client, raw).await
    }

    /// The client handle
    pub fn client(&self) -> &ClientHandle {
        &self.client
    }

    /// Panel for a kind
    pub fn panel(&self, kind: PanelKind) -> &Panel<V> {
        match kind {
            PanelKind::Chart => &self.chart,
            PanelKind::Financials => &self.financials,
            PanelKind::News => &self.news,
        }
    }

    /// Mutable panel for a kind
    pub fn panel_mut(&mut self, kind: PanelKind) -> &mut Panel<V> {
        match kind {
            PanelKind::Chart => &mut self.chart,
            PanelKind::Financials => &mut self.financials,
            PanelKind::News => &mut self.news,
        }
    }
}
