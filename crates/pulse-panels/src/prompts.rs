//! Prompt templates for the commentary panels
//!
//! Each panel kind has one fixed MiniJinja template. Chart and financials
//! templates take the user `query`; the news template takes the configured
//! `market` scope.

use crate::kind::{PanelKind, Query};
use minijinja::{Environment, context};
use std::fmt;

const CHART_TEMPLATE: &str = "\
Using current market data from web search, provide a technical chart analysis for {{ query }} \
covering the last 6 to 12 months. Describe the overall price trend, identify the key support \
and resistance levels, and point out any notable chart patterns. Finish with a short summary \
of recent performance and volatility.";

const FINANCIALS_TEMPLATE: &str = "\
Using current data from web search, list the key financial metrics for {{ query }}: market \
capitalization, trailing P/E ratio, trailing EPS, dividend yield, and the 52-week high and low. \
Then give a brief summary of the latest quarterly earnings report.";

const NEWS_TEMPLATE: &str = "\
Using web search, find the top 5 trending news stories about the {{ market }} right now. \
For each story give a headline followed by a one-paragraph summary.";

/// A rendered prompt, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// The prompt text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the prompt, returning its text
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Prompt templates for every panel kind
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    market: String,
}

impl PromptTemplates {
    /// Create templates with the given news market scope
    pub fn new(market: impl Into<String>) -> Self {
        Self {
            market: market.into(),
        }
    }

    /// Raw template source for a panel kind
    pub fn raw_template(kind: PanelKind) -> &'static str {
        match kind {
            PanelKind::Chart => CHART_TEMPLATE,
            PanelKind::Financials => FINANCIALS_TEMPLATE,
            PanelKind::News => NEWS_TEMPLATE,
        }
    }

    /// Render the prompt for a panel kind
    ///
    /// The news template ignores `query`; the other templates render an empty
    /// subject if it is missing, which the dispatcher never allows.
    pub fn render(&self, kind: PanelKind, query: Option<&Query>) -> Result<Prompt, minijinja::Error> {
        // Create a new environment for each render to avoid lifetime issues
        let env = Environment::new();

        let text = env.render_str(
            Self::raw_template(kind),
            context! {
                query => query.map(Query::as_str).unwrap_or_default(),
                market => self.market.as_str(),
            },
        )?;

        Ok(Prompt(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn templates() -> PromptTemplates {
        PromptTemplates::new("U.S. stock market")
    }

    #[test]
    fn test_chart_prompt() {
        let query = Query::parse("TSLA").unwrap();
        let prompt = templates().render(PanelKind::Chart, Some(&query)).unwrap();

        assert!(prompt.as_str().contains("TSLA"));
        assert!(prompt.as_str().contains("support"));
        assert!(prompt.as_str().contains("resistance"));
        assert!(prompt.as_str().contains("6 to 12 months"));
        assert!(prompt.as_str().contains("volatility"));
    }

    #[test]
    fn test_financials_prompt() {
        let query = Query::parse("MSFT").unwrap();
        let prompt = templates()
            .render(PanelKind::Financials, Some(&query))
            .unwrap();

        for needle in [
            "MSFT",
            "market capitalization",
            "P/E",
            "EPS",
            "dividend yield",
            "52-week high and low",
            "quarterly earnings",
        ] {
            assert!(prompt.as_str().contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn test_news_prompt_uses_market_scope() {
        let prompt = PromptTemplates::new("Tokyo stock market")
            .render(PanelKind::News, None)
            .unwrap();

        assert!(prompt.as_str().contains("top 5"));
        assert!(prompt.as_str().contains("Tokyo stock market"));
        assert!(prompt.as_str().contains("one-paragraph summary"));
    }

    #[test]
    fn test_query_is_not_escaped_or_interpreted() {
        let query = Query::parse("AT&T {{ market }}").unwrap();
        let prompt = templates().render(PanelKind::Chart, Some(&query)).unwrap();
        assert!(prompt.as_str().contains("AT&T {{ market }}"));
    }
}
