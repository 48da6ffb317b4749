//! Terminal presenter
//!
//! Control characters in generated text are dropped, so only this module's
//! own styles ever emit escape sequences.

use super::block::{ListMarker, RenderNode};
use super::inline::Span;
use crate::chat::GroundingSource;

const BOLD: &str = "\x1b[1m";
const BOLD_OFF: &str = "\x1b[22m";
const ITALIC: &str = "\x1b[3m";
const ITALIC_OFF: &str = "\x1b[23m";

/// Terminal output options
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalStyle {
    /// Use ANSI escapes for strong/emphasis and headings
    pub ansi: bool,
}

impl TerminalStyle {
    pub fn plain() -> Self {
        Self { ansi: false }
    }

    pub fn ansi() -> Self {
        Self { ansi: true }
    }
}

/// Render sections for a terminal, one blank line between sections
pub fn to_terminal(
    sections: &[Vec<RenderNode>],
    sources: Option<&[GroundingSource]>,
    style: TerminalStyle,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        for node in section {
            push_node(&mut lines, node, style);
        }
    }

    if let Some(sources) = sources.filter(|s| !s.is_empty()) {
        lines.push(String::new());
        lines.push(styled("Sources:", BOLD, BOLD_OFF, style));
        for source in sources {
            let uri = sanitize(&source.uri);
            if source.title.is_empty() || source.title == source.uri {
                lines.push(format!("  - {}", uri));
            } else {
                lines.push(format!("  - {} <{}>", sanitize(source.display_title()), uri));
            }
        }
    }

    lines.join("\n")
}

fn push_node(lines: &mut Vec<String>, node: &RenderNode, style: TerminalStyle) {
    match node {
        RenderNode::Heading { level, content } => {
            let text = spans(content, style);
            let width = sanitize(&node.plain_text()).chars().count();
            lines.push(styled(&text, BOLD, BOLD_OFF, style));
            match level {
                1 => lines.push("=".repeat(width)),
                2 => lines.push("-".repeat(width)),
                _ => {}
            }
        }
        RenderNode::ListItem { marker, content } => {
            let marker = match marker {
                ListMarker::Bullet => "\u{2022}",
                ListMarker::Ordered(marker) => marker.as_str(),
            };
            lines.push(format!("  {} {}", marker, spans(content, style)));
        }
        RenderNode::Paragraph { content } => lines.push(spans(content, style)),
        RenderNode::LineBreak => lines.push(String::new()),
    }
}

fn spans(content: &[Span], style: TerminalStyle) -> String {
    content
        .iter()
        .map(|span| match span {
            Span::Text { text } => sanitize(text),
            Span::Emphasis { text } => styled(&sanitize(text), ITALIC, ITALIC_OFF, style),
            Span::Strong { children } => styled(&spans(children, style), BOLD, BOLD_OFF, style),
        })
        .collect()
}

/// Drop control characters other than tab
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|&c| c == '\t' || !c.is_control())
        .collect()
}

fn styled(text: &str, on: &str, off: &str, style: TerminalStyle) -> String {
    if style.ansi {
        format!("{}{}{}", on, text, off)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::block::render_sections;

    #[test]
    fn test_plain_layout() {
        let text = "# Plan\n## Food\n* **Eat** greens\n2. Walk\n\n### Sleep\nRest *well*";
        let out = to_terminal(&render_sections(text), None, TerminalStyle::plain());
        assert_eq!(
            out,
            "Plan\n====\nFood\n----\n  \u{2022} Eat greens\n  2. Walk\n\nSleep\nRest well"
        );
    }

    #[test]
    fn test_ansi_styles() {
        let out = to_terminal(&render_sections("**a** *b*"), None, TerminalStyle::ansi());
        assert_eq!(out, "\x1b[1ma\x1b[22m \x1b[3mb\x1b[23m");
    }

    #[test]
    fn test_control_sequences_dropped() {
        let text = "# \x1b[2JTitle\n\x1b[31mred\x07 *it\x1b]0;x\x07* and\ttab";
        let out = to_terminal(&render_sections(text), None, TerminalStyle::plain());
        assert!(!out.contains('\x1b'));
        assert!(!out.contains('\x07'));
        assert_eq!(out, "[2JTitle\n========\n[31mred it]0;x and\ttab");

        let out = to_terminal(&render_sections("\x1b[5m*x*"), None, TerminalStyle::ansi());
        assert_eq!(out, "[5m\x1b[3mx\x1b[23m");

        let sources = vec![GroundingSource {
            uri: "https://who.int/\x1b[0m".to_string(),
            title: "WHO\u{9b}".to_string(),
        }];
        let out = to_terminal(&render_sections("a"), Some(&sources), TerminalStyle::plain());
        assert!(out.ends_with("  - WHO <https://who.int/[0m>"));
    }

    #[test]
    fn test_sources_footer() {
        let sources = vec![
            GroundingSource {
                uri: "https://who.int".to_string(),
                title: "WHO".to_string(),
            },
            GroundingSource {
                uri: "https://example.org".to_string(),
                title: String::new(),
            },
        ];
        let out = to_terminal(&render_sections("answer"), Some(&sources), TerminalStyle::plain());
        assert_eq!(
            out,
            "answer\n\nSources:\n  - WHO <https://who.int>\n  - https://example.org"
        );
    }
}
