//! Panel kinds and user queries

use serde::{Deserialize, Serialize};
use std::fmt;

/// A trimmed, non-empty user query naming a stock or market
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Query(String);

impl Query {
    /// Parse raw user input
    ///
    /// Returns `None` for empty or whitespace-only input; such input must
    /// never reach the dispatcher.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The query text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The three commentary panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    /// Technical chart analysis for a stock
    Chart,
    /// Key financial metrics for a stock
    Financials,
    /// Trending market news, fetched once at startup
    News,
}

impl PanelKind {
    /// All panel kinds in display order
    pub const ALL: [PanelKind; 3] = [PanelKind::Chart, PanelKind::Financials, PanelKind::News];

    /// Short identifier used in logs and template names
    pub fn id(self) -> &'static str {
        match self {
            PanelKind::Chart => "chart",
            PanelKind::Financials => "financials",
            PanelKind::News => "news",
        }
    }

    /// Heading shown above the panel
    pub fn title(self) -> &'static str {
        match self {
            PanelKind::Chart => "Chart Analysis",
            PanelKind::Financials => "Financial Metrics",
            PanelKind::News => "Trending News",
        }
    }

    /// Whether the panel takes a user query
    pub fn takes_query(self) -> bool {
        !matches!(self, PanelKind::News)
    }

    /// Whether the panel has a submit control to disable and restore
    pub fn has_submit_control(self) -> bool {
        self.takes_query()
    }

    /// Label of the idle submit control
    pub fn submit_label(self) -> &'static str {
        match self {
            PanelKind::Chart => "Analyze",
            PanelKind::Financials => "Get Metrics",
            PanelKind::News => "",
        }
    }

    /// Label shown on the submit control while a request is in flight
    pub fn busy_label(self) -> &'static str {
        match self {
            PanelKind::Chart => "Analyzing…",
            PanelKind::Financials => "Fetching…",
            PanelKind::News => "",
        }
    }

    /// Alert text for a failed request
    pub fn failure_message(self, query: Option<&Query>) -> String {
        match (self, query) {
            (PanelKind::Chart, Some(q)) => {
                format!("Failed to analyze the chart for {q}. Please try again.")
            }
            (PanelKind::Financials, Some(q)) => {
                format!("Failed to fetch financial metrics for {q}. Please try again.")
            }
            _ => "Failed to fetch trending news. Please try again later.".to_string(),
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
