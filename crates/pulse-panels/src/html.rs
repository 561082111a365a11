//! HTML view adapter
//!
//! Maps renderables to markup. Every piece of service-provided text and every
//! attribute value is escaped, so answer text can never alter page structure.

use crate::kind::PanelKind;
use crate::render::{AnswerView, Renderable};
use crate::view::{PanelView, SubmitControl};

/// Escape text for use in element content or a quoted attribute value
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render a renderable to markup
pub fn to_html(content: &Renderable) -> String {
    match content {
        Renderable::Text { text } => format!("<p>{}</p>", escape(text)),
        Renderable::Loading => {
            r#"<div class="loader" aria-busy="true" aria-label="Loading"></div>"#.to_string()
        }
        Renderable::Alert { message } => {
            format!(r#"<div class="alert" role="alert">{}</div>"#, escape(message))
        }
        Renderable::Answer(answer) => answer_html(answer),
    }
}

fn answer_html(answer: &AnswerView) -> String {
    let paragraph = answer
        .lines
        .iter()
        .map(|line| escape(line))
        .collect::<Vec<_>>()
        .join("<br>");

    let mut html = format!("<p>{paragraph}</p>");

    if answer.has_sources() {
        html.push_str(r#"<div class="sources"><h4>Sources</h4><ul>"#);
        for source in &answer.sources {
            html.push_str(&format!(
                r#"<li><a href="{}" target="_blank" rel="noopener noreferrer">{}</a></li>"#,
                escape(&source.uri),
                escape(source.display_text())
            ));
        }
        html.push_str("</ul></div>");
    }

    html
}

/// View that keeps the latest markup for one panel
#[derive(Debug, Clone)]
pub struct HtmlView {
    kind: PanelKind,
    markup: String,
    submit: SubmitControl,
}

impl HtmlView {
    /// Create an empty view for a panel kind
    pub fn new(kind: PanelKind) -> Self {
        Self {
            kind,
            markup: String::new(),
            submit: SubmitControl::idle(kind),
        }
    }

    /// Markup of the output region
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Current submit control
    pub fn submit(&self) -> &SubmitControl {
        &self.submit
    }

    /// Markup for the whole panel: heading, submit button (if any), output
    pub fn panel_html(&self) -> String {
        let id = self.kind.id();
        let mut html = format!(
            r#"<section class="panel" id="{id}-panel"><h2>{}</h2>"#,
            escape(self.kind.title())
        );
        if self.kind.has_submit_control() {
            html.push_str(&format!(
                r#"<button type="submit" id="{id}-submit"{}>{}</button>"#,
                if self.submit.enabled { "" } else { " disabled" },
                escape(&self.submit.label)
            ));
        }
        html.push_str(&format!(
            r#"<div class="output" id="{id}-output">{}</div></section>"#,
            self.markup
        ));
        html
    }
}

impl PanelView for HtmlView {
    fn show(&mut self, content: Renderable) {
        self.markup = to_html(&content);
    }

    fn set_submit(&mut self, control: SubmitControl) {
        self.submit = control;
    }
}
