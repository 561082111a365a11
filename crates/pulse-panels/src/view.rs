//! View adapter seam
//!
//! A panel only talks to its surface through [`PanelView`]. Adapters decide
//! how a [`Renderable`] and the submit control look on screen.

use crate::kind::PanelKind;
use crate::render::Renderable;
use serde::Serialize;

/// State of a panel's submit control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitControl {
    /// Whether the control accepts input
    pub enabled: bool,
    /// Current label
    pub label: String,
}

impl SubmitControl {
    /// Idle control for a panel kind
    pub fn idle(kind: PanelKind) -> Self {
        Self {
            enabled: true,
            label: kind.submit_label().to_string(),
        }
    }

    /// Disabled control showing the in-progress label
    pub fn busy(kind: PanelKind) -> Self {
        Self {
            enabled: false,
            label: kind.busy_label().to_string(),
        }
    }
}

/// Surface for one panel
pub trait PanelView {
    /// Replace the panel's output region
    fn show(&mut self, content: Renderable);

    /// Update the submit control
    fn set_submit(&mut self, control: SubmitControl);
}

/// One recorded view update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ViewEvent {
    /// Output region replaced
    Show { content: Renderable },
    /// Submit control changed
    Submit { control: SubmitControl },
}

/// Headless view that records every update
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemoryView {
    output: Option<Renderable>,
    submit: Option<SubmitControl>,
    history: Vec<ViewEvent>,
}

impl MemoryView {
    /// Current output, if anything has been shown
    pub fn output(&self) -> Option<&Renderable> {
        self.output.as_ref()
    }

    /// Current submit control, if it was ever set
    pub fn submit(&self) -> Option<&SubmitControl> {
        self.submit.as_ref()
    }

    /// All updates in order
    pub fn history(&self) -> &[ViewEvent] {
        &self.history
    }
}

impl PanelView for MemoryView {
    fn show(&mut self, content: Renderable) {
        self.history.push(ViewEvent::Show {
            content: content.clone(),
        });
        self.output = Some(content);
    }

    fn set_submit(&mut self, control: SubmitControl) {
        self.history.push(ViewEvent::Submit {
            control: control.clone(),
        });
        self.submit = Some(control);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_view_records_history() {
        let mut view = MemoryView::default();
        view.set_submit(SubmitControl::busy(PanelKind::Chart));
        view.show(Renderable::Loading);
        view.show(Renderable::text("done"));
        view.set_submit(SubmitControl::idle(PanelKind::Chart));

        assert_eq!(view.history().len(), 4);
        assert_eq!(view.output(), Some(&Renderable::text("done")));
        assert_eq!(view.submit(), Some(&SubmitControl::idle(PanelKind::Chart)));
    }

    #[test]
    fn test_submit_control_states() {
        let busy = SubmitControl::busy(PanelKind::Financials);
        assert!(!busy.enabled);
        assert_eq!(busy.label, "Fetching…");

        let idle = SubmitControl::idle(PanelKind::Financials);
        assert!(idle.enabled);
        assert_eq!(idle.label, "Get Metrics");
    }
}
