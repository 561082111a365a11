//! Terminal and serialized output views for the CLI

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use pulse_panels::html::HtmlView;
use pulse_panels::{MemoryView, PanelKind, PanelView, Renderable, SubmitControl};
use tracing::debug;

/// Render a panel update as plain terminal text
pub fn render_text(kind: PanelKind, content: &Renderable) -> String {
    let title = kind.title();
    match content {
        Renderable::Text { text } => format!("[{title}] {text}"),
        Renderable::Loading => {
            let label = if kind.has_submit_control() {
                kind.busy_label()
            } else {
                "Loading…"
            };
            format!("[{title}] {label}")
        }
        Renderable::Alert { message } => format!("[{title}] ⚠ {message}"),
        Renderable::Answer(answer) => {
            let mut out = format!("== {title} ==\n{}", answer.lines.join("\n"));
            if answer.has_sources() {
                let mut table = Table::new();
                table.load_preset(UTF8_FULL).set_header(vec!["#", "Source", "URL"]);
                for (i, source) in answer.sources.iter().enumerate() {
                    table.add_row(vec![
                        (i + 1).to_string(),
                        source.display_text().to_string(),
                        source.uri.clone(),
                    ]);
                }
                out.push_str(&format!("\n\nSources\n{table}"));
            }
            out
        }
    }
}

/// Prints every update to stdout as it happens
#[derive(Debug)]
pub struct TerminalView {
    kind: PanelKind,
}

impl TerminalView {
    /// Create a terminal view for a panel kind
    pub fn new(kind: PanelKind) -> Self {
        Self { kind }
    }
}

impl PanelView for TerminalView {
    fn show(&mut self, content: Renderable) {
        println!("{}\n", render_text(self.kind, &content));
    }

    fn set_submit(&mut self, control: SubmitControl) {
        debug!(kind = %self.kind, enabled = control.enabled, label = %control.label, "Submit control");
    }
}

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text, printed as updates happen
    Text,
    /// HTML markup for the panel, printed after each command
    Html,
    /// JSON snapshot of the panel, printed after each command
    Json,
}

/// View used by the CLI, chosen by output format
pub enum OutputView {
    Terminal(TerminalView),
    Html(HtmlView),
    Json(PanelKind, MemoryView),
}

impl OutputView {
    /// Create the view for a panel kind and format
    pub fn new(kind: PanelKind, format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Terminal(TerminalView::new(kind)),
            OutputFormat::Html => Self::Html(HtmlView::new(kind)),
            OutputFormat::Json => Self::Json(kind, MemoryView::default()),
        }
    }

    /// Final snapshot for buffered formats; `None` for text
    pub fn snapshot(&self) -> anyhow::Result<Option<String>> {
        match self {
            Self::Terminal(_) => Ok(None),
            Self::Html(view) => Ok(Some(view.panel_html())),
            Self::Json(kind, view) => {
                let value = serde_json::json!({
                    "panel": kind,
                    "output": view.output(),
                    "submit": view.submit(),
                });
                Ok(Some(serde_json::to_string_pretty(&value)?))
            }
        }
    }
}

impl PanelView for OutputView {
    fn show(&mut self, content: Renderable) {
        match self {
            Self::Terminal(view) => view.show(content),
            Self::Html(view) => view.show(content),
            Self::Json(_, view) => view.show(content),
        }
    }

    fn set_submit(&mut self, control: SubmitControl) {
        match self {
            Self::Terminal(view) => view.set_submit(control),
            Self::Html(view) => view.set_submit(control),
            Self::Json(_, view) => view.set_submit(control),
        }
    }
}
