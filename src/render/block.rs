//! Block Rendering
//!
//! Turns generated text into typed display nodes, one node per line.
//!
//! Sections are separated by two or more line breaks. Each line of a
//! section is classified by its leading token, first match wins:
//!
//! | Prefix | Node |
//! |---|---|
//! | `### ` | heading level 3 |
//! | `## ` | heading level 2 |
//! | `# ` | heading level 1 |
//! | `* ` or `- ` | bulleted list item |
//! | optional whitespace, ASCII digits, `.`, whitespace | numbered list item, marker kept verbatim |
//! | blank | line break |
//! | anything else | paragraph |
//!
//! This is a deliberately small subset of markdown. `####` and deeper
//! headings, nested lists, code blocks, links and tables are shown as
//! paragraph text.

use super::inline::{parse_inline, Span};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static SECTION_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid section regex"));
static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([0-9]+\.)\s(.*)").expect("valid ordered item regex"));

/// How a list item is marked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListMarker {
    Bullet,
    /// The numeral marker as written, e.g. `"3."`
    Ordered(String),
}

/// One display line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderNode {
    Heading { level: u8, content: Vec<Span> },
    ListItem { marker: ListMarker, content: Vec<Span> },
    Paragraph { content: Vec<Span> },
    LineBreak,
}

impl RenderNode {
    pub fn heading(level: u8, text: &str) -> Self {
        RenderNode::Heading {
            level,
            content: parse_inline(text),
        }
    }

    pub fn bullet(text: &str) -> Self {
        RenderNode::ListItem {
            marker: ListMarker::Bullet,
            content: parse_inline(text),
        }
    }

    pub fn ordered(marker: &str, text: &str) -> Self {
        RenderNode::ListItem {
            marker: ListMarker::Ordered(marker.to_string()),
            content: parse_inline(text),
        }
    }

    pub fn paragraph(text: &str) -> Self {
        RenderNode::Paragraph {
            content: parse_inline(text),
        }
    }

    /// Inline content, empty for line breaks
    pub fn content(&self) -> &[Span] {
        match self {
            RenderNode::Heading { content, .. }
            | RenderNode::ListItem { content, .. }
            | RenderNode::Paragraph { content } => content,
            RenderNode::LineBreak => &[],
        }
    }

    /// Text of the node with markup removed
    pub fn plain_text(&self) -> String {
        self.content().iter().map(Span::plain_text).collect()
    }
}

/// Render a block of text into a flat list of nodes
pub fn render_block(text: &str) -> Vec<RenderNode> {
    render_sections(text).into_iter().flatten().collect()
}

/// Render a block of text, keeping section boundaries
pub fn render_sections(text: &str) -> Vec<Vec<RenderNode>> {
    let normalized = text.replace("\r\n", "\n");
    SECTION_BREAK
        .split(&normalized)
        .map(|section| section.split('\n').map(classify_line).collect())
        .collect()
}

/// Classify a single line
pub fn classify_line(line: &str) -> RenderNode {
    if let Some(rest) = line.strip_prefix("### ") {
        return RenderNode::heading(3, rest);
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return RenderNode::heading(2, rest);
    }
    if let Some(rest) = line.strip_prefix("# ") {
        return RenderNode::heading(1, rest);
    }
    if let Some(rest) = line
        .strip_prefix("* ")
        .or_else(|| line.strip_prefix("- "))
    {
        return RenderNode::bullet(rest);
    }
    if let Some(caps) = ORDERED_ITEM.captures(line) {
        if let (Some(marker), Some(rest)) = (caps.get(1), caps.get(2)) {
            return RenderNode::ordered(marker.as_str(), rest.as_str());
        }
    }
    if line.trim().is_empty() {
        return RenderNode::LineBreak;
    }
    RenderNode::paragraph(line)
}
