//! Renderables and the answer/source formatter
//!
//! The formatter never builds markup. It produces a [`Renderable`] that view
//! adapters map onto their surface, so answer text is always treated as text.

use pulse_llm::Citation;
use serde::Serialize;
use std::collections::HashSet;

/// Content for one panel's output region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Renderable {
    /// Plain informational text
    Text { text: String },
    /// Loading indicator
    Loading,
    /// Error alert with an accessible alert role
    Alert { message: String },
    /// Answer paragraph optionally followed by sources
    Answer(AnswerView),
}

impl Renderable {
    /// Plain text content
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Alert content
    pub fn alert(message: impl Into<String>) -> Self {
        Self::Alert {
            message: message.into(),
        }
    }

    /// Whether this is an alert
    pub fn is_alert(&self) -> bool {
        matches!(self, Self::Alert { .. })
    }
}

/// A formatted answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerView {
    /// Answer text split at line breaks
    pub lines: Vec<String>,
    /// Deduplicated sources; empty means no sources section
    pub sources: Vec<Source>,
}

impl AnswerView {
    /// Whether a sources section should be shown
    pub fn has_sources(&self) -> bool {
        !self.sources.is_empty()
    }
}

/// A citation that survived filtering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    /// Link target
    pub uri: String,
    /// Display title, if the service gave one
    pub title: Option<String>,
}

impl Source {
    /// Text to display for the link: the title if present, else the URI
    pub fn display_text(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(self.uri.as_str())
    }
}

/// Keep one source per distinct URI, first occurrence wins
///
/// Citations without a usable (non-blank) URI are dropped. The URI is the
/// identity key exactly as given. Order of first occurrences is preserved.
pub fn dedup_sources<'a, I>(citations: I) -> Vec<Source>
where
    I: IntoIterator<Item = &'a Citation>,
{
    let mut seen = HashSet::new();

    citations
        .into_iter()
        .filter_map(|c| {
            let uri = c.uri.as_deref().filter(|u| !u.trim().is_empty())?;
            Some((uri, c.title.as_deref()))
        })
        .filter(|(uri, _)| seen.insert(*uri))
        .map(|(uri, title)| Source {
            uri: uri.to_string(),
            title: title.map(str::to_string),
        })
        .collect()
}

/// Split answer text at line breaks
///
/// Handles `\n`, `\r\n` and a lone `\r`; the resulting lines carry no
/// line-break characters.
pub fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split(['\n', '\r'])
        .map(str::to_string)
        .collect()
}

/// Format an answer and its citations for display
pub fn render_answer(text: &str, citations: &[Citation]) -> Renderable {
    Renderable::Answer(AnswerView {
        lines: split_lines(text),
        sources: dedup_sources(citations),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cite(uri: &str, title: Option<&str>) -> Citation {
        Citation::new(uri, title)
    }

    fn uris(sources: &[Source]) -> Vec<&str> {
        sources.iter().map(|s| s.uri.as_str()).collect()
    }

    fn as_citations(sources: &[Source]) -> Vec<Citation> {
        sources
            .iter()
            .map(|s| Citation::new(s.uri.clone(), s.title.as_deref()))
            .collect()
    }

    #[test]
    fn test_first_duplicate_wins() {
        let citations = vec![
            cite("a", Some("A1")),
            cite("b", None),
            cite("a", Some("A2")),
        ];
        let sources = dedup_sources(&citations);

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].display_text(), "A1");
        assert_eq!(sources[0].uri, "a");
        assert_eq!(sources[1].display_text(), "b");
        assert_eq!(sources[1].uri, "b");
        assert!(sources.iter().all(|s| s.display_text() != "A2"));
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let citations = vec![
            cite("x", Some("X")),
            cite("y", None),
            cite("x", None),
            cite("z", Some("Z")),
            cite("y", Some("Y late")),
        ];
        let once = dedup_sources(&citations);
        let twice = dedup_sources(&as_citations(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_dedup_preserves_first_occurrence_order() {
        let citations = vec![
            cite("c", None),
            cite("a", None),
            cite("c", None),
            cite("b", None),
            cite("a", None),
        ];
        assert_eq!(uris(&dedup_sources(&citations)), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_dedup_length_matches_distinct_uris() {
        let raw = ["u1", "u2", "u1", "u3", "u2", "u4", "u4", "u1"];
        let citations: Vec<Citation> = raw.iter().map(|u| cite(u, None)).collect();
        let distinct: HashSet<&str> = raw.iter().copied().collect();
        assert_eq!(dedup_sources(&citations).len(), distinct.len());
    }

    #[test]
    fn test_unusable_uris_dropped() {
        let citations = vec![
            Citation::default(),
            cite("   ", Some("blank")),
            Citation {
                uri: None,
                title: Some("no uri".to_string()),
            },
            cite("https://ok.example", None),
        ];
        assert_eq!(uris(&dedup_sources(&citations)), vec!["https://ok.example"]);
    }

    #[test]
    fn test_uri_is_key_as_given() {
        let citations = vec![cite(" a", Some("padded")), cite("a", Some("plain"))];
        let sources = dedup_sources(&citations);

        assert_eq!(uris(&sources), vec![" a", "a"]);
    }

    #[test]
    fn test_blank_title_falls_back_to_uri() {
        let source = Source {
            uri: "https://x.example".to_string(),
            title: Some("  ".to_string()),
        };
        assert_eq!(source.display_text(), "https://x.example");
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines("one\ntwo\r\nthree"), vec!["one", "two", "three"]);
        assert_eq!(split_lines("single"), vec!["single"]);
        assert_eq!(split_lines("trailing\n"), vec!["trailing", ""]);
        assert_eq!(split_lines("one\rtwo"), vec!["one", "two"]);
        assert_eq!(split_lines("a\r\rb"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_render_answer_without_sources() {
        match render_answer("Hello", &[]) {
            Renderable::Answer(view) => {
                assert_eq!(view.lines, vec!["Hello"]);
                assert!(!view.has_sources());
            }
            other => panic!("Expected answer, got {other:?}"),
        }
    }

    #[test]
    fn test_render_answer_with_only_unusable_citations() {
        match render_answer("Hello", &[Citation::default()]) {
            Renderable::Answer(view) => assert!(!view.has_sources()),
            other => panic!("Expected answer, got {other:?}"),
        }
    }

    #[test]
    fn test_renderable_serialization() {
        let json = serde_json::to_value(Renderable::alert("boom")).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "alert", "message": "boom" }));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    // -- Strategy helpers --

    fn arb_uri() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some(String::new())),
            Just(Some("  ".to_string())),
            Just(Some("https://a.example".to_string())),
            Just(Some("https://b.example".to_string())),
            Just(Some("https://c.example".to_string())),
            Just(Some(" https://a.example".to_string())),
        ]
    }

    fn arb_citation() -> impl Strategy<Value = Citation> {
        (arb_uri(), prop::option::of("[A-Z][a-z]{0,4}"))
            .prop_map(|(uri, title)| Citation { uri, title })
    }

    fn arb_citations() -> impl Strategy<Value = Vec<Citation>> {
        prop::collection::vec(arb_citation(), 0..24)
    }

    fn usable_uris(citations: &[Citation]) -> Vec<&str> {
        citations
            .iter()
            .filter_map(|c| c.uri.as_deref())
            .filter(|u| !u.trim().is_empty())
            .collect()
    }

    proptest! {
        #[test]
        fn dedup_is_idempotent(citations in arb_citations()) {
            let once = dedup_sources(&citations);
            let again: Vec<Citation> = once
                .iter()
                .map(|s| Citation { uri: Some(s.uri.clone()), title: s.title.clone() })
                .collect();
            prop_assert_eq!(dedup_sources(&again), once);
        }

        #[test]
        fn dedup_keeps_first_occurrence_in_order(citations in arb_citations()) {
            let mut expected: Vec<&Citation> = Vec::new();
            for citation in &citations {
                let Some(uri) = citation.uri.as_deref() else { continue };
                if uri.trim().is_empty() || expected.iter().any(|e| e.uri.as_deref() == Some(uri)) {
                    continue;
                }
                expected.push(citation);
            }

            let sources = dedup_sources(&citations);
            prop_assert_eq!(sources.len(), expected.len());
            for (source, first) in sources.iter().zip(expected) {
                prop_assert_eq!(Some(source.uri.as_str()), first.uri.as_deref());
                prop_assert_eq!(&source.title, &first.title);
            }
        }

        #[test]
        fn dedup_length_is_distinct_usable_uris(citations in arb_citations()) {
            let distinct: HashSet<&str> = usable_uris(&citations).into_iter().collect();
            prop_assert_eq!(dedup_sources(&citations).len(), distinct.len());
        }

        #[test]
        fn split_lines_leaves_no_line_breaks(text in "[a-z \r\n]{0,40}") {
            let lines = split_lines(&text);
            prop_assert!(lines.iter().all(|l| !l.contains(['\n', '\r'])));
            let breaks = text.replace("\r\n", "\n").matches(['\n', '\r']).count();
            prop_assert_eq!(lines.len(), breaks + 1);
        }
    }
}
