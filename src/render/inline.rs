//! Inline Markup
//!
//! Two transforms, applied once each and in this order:
//!
//! 1. `**X**` becomes strong
//! 2. `*X*` becomes emphasis (also inside strong content)
//!
//! Both match the shortest enclosed span. Nothing else is recognised: no
//! escapes, no underscores, no emphasis that straddles a strong span.
//!
//! Emphasis is matched separately in the text before, inside and after each
//! strong span, so `*a **b** c*` keeps its outer asterisks as literal text
//! rather than wrapping the strong span in emphasis. A span type that held
//! strong children inside emphasis would be needed to express that.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid strong regex"));
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("valid emphasis regex"));

/// A run of inline content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Span {
    Text { text: String },
    /// Holds only `Text` and `Emphasis` children
    Strong { children: Vec<Span> },
    Emphasis { text: String },
}

impl Span {
    pub fn text(text: impl Into<String>) -> Self {
        Span::Text { text: text.into() }
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Span::Strong {
            children: vec![Span::text(text)],
        }
    }

    pub fn emphasis(text: impl Into<String>) -> Self {
        Span::Emphasis { text: text.into() }
    }

    /// Text with all markup removed
    pub fn plain_text(&self) -> String {
        match self {
            Span::Text { text } | Span::Emphasis { text } => text.clone(),
            Span::Strong { children } => children.iter().map(Span::plain_text).collect(),
        }
    }
}

/// Split a line of content into spans
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in STRONG.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_emphasis(&mut spans, &text[last..whole.start()]);

        let mut children = Vec::new();
        push_emphasis(&mut children, inner.as_str());
        spans.push(Span::Strong { children });

        last = whole.end();
    }
    push_emphasis(&mut spans, &text[last..]);

    spans
}

fn push_emphasis(out: &mut Vec<Span>, text: &str) {
    let mut last = 0;

    for caps in EMPHASIS.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_text(out, &text[last..whole.start()]);
        out.push(Span::emphasis(inner.as_str()));
        last = whole.end();
    }
    push_text(out, &text[last..]);
}

fn push_text(out: &mut Vec<Span>, text: &str) {
    if !text.is_empty() {
        out.push(Span::text(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(parse_inline("just words"), vec![Span::text("just words")]);
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn test_strong_then_emphasis() {
        assert_eq!(
            parse_inline("**bold** and *ital*"),
            vec![
                Span::strong("bold"),
                Span::text(" and "),
                Span::emphasis("ital"),
            ]
        );
    }

    #[test]
    fn test_non_greedy() {
        assert_eq!(
            parse_inline("**a** b **c**"),
            vec![Span::strong("a"), Span::text(" b "), Span::strong("c")]
        );
        assert_eq!(
            parse_inline("*x* *y*"),
            vec![Span::emphasis("x"), Span::text(" "), Span::emphasis("y")]
        );
    }

    #[test]
    fn test_emphasis_inside_strong() {
        assert_eq!(
            parse_inline("**very *important* note**"),
            vec![Span::Strong {
                children: vec![
                    Span::text("very "),
                    Span::emphasis("important"),
                    Span::text(" note"),
                ]
            }]
        );
    }

    #[test]
    fn test_unbalanced_delimiters_stay_literal() {
        assert_eq!(parse_inline("5 * 3 = 15"), vec![Span::text("5 * 3 = 15")]);
        assert_eq!(
            parse_inline("**open only"),
            vec![Span::emphasis(""), Span::text("open only")]
        );
    }

    #[test]
    fn test_emphasis_around_strong_stays_literal() {
        assert_eq!(
            parse_inline("*a **b** c*"),
            vec![Span::text("*a "), Span::strong("b"), Span::text(" c*")]
        );
    }

    #[test]
    fn test_plain_text_strips_markup() {
        let spans = parse_inline("**Tip:** drink *water*");
        let plain: String = spans.iter().map(Span::plain_text).collect();
        assert_eq!(plain, "Tip: drink water");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(parse_inline("*hi*")).unwrap();
        assert_eq!(json, serde_json::json!([{"kind": "emphasis", "text": "hi"}]));
    }
}
