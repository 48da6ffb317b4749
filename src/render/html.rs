//! HTML presenter
//!
//! Every piece of text coming from nodes or sources is escaped here. Nothing
//! else in the crate produces markup.

use super::block::{ListMarker, RenderNode};
use super::inline::Span;
use crate::chat::GroundingSource;

/// Render sections as HTML, each section in its own `<div>`
pub fn to_html(sections: &[Vec<RenderNode>], sources: Option<&[GroundingSource]>) -> String {
    let mut out = String::new();
    for section in sections {
        out.push_str("<div class=\"section\">");
        push_nodes(&mut out, section);
        out.push_str("</div>");
    }

    if let Some(sources) = sources.filter(|s| !s.is_empty()) {
        push_sources(&mut out, sources);
    }
    out
}

fn push_nodes(out: &mut String, nodes: &[RenderNode]) {
    for node in nodes {
        push_node(out, node);
    }
}

fn push_node(out: &mut String, node: &RenderNode) {
    match node {
        RenderNode::Heading { level, content } => {
            out.push_str(&format!("<h{}>", level));
            push_spans(out, content);
            out.push_str(&format!("</h{}>", level));
        }
        RenderNode::ListItem { marker, content } => {
            out.push_str("<p class=\"list-item\"><span class=\"marker\">");
            match marker {
                ListMarker::Bullet => out.push_str("&bull;"),
                ListMarker::Ordered(marker) => out.push_str(&escape(marker)),
            }
            out.push_str("</span> ");
            push_spans(out, content);
            out.push_str("</p>");
        }
        RenderNode::Paragraph { content } => {
            out.push_str("<p>");
            push_spans(out, content);
            out.push_str("</p>");
        }
        RenderNode::LineBreak => out.push_str("<br>"),
    }
}

fn push_spans(out: &mut String, spans: &[Span]) {
    for span in spans {
        match span {
            Span::Text { text } => out.push_str(&escape(text)),
            Span::Emphasis { text } => {
                out.push_str("<em>");
                out.push_str(&escape(text));
                out.push_str("</em>");
            }
            Span::Strong { children } => {
                out.push_str("<strong>");
                push_spans(out, children);
                out.push_str("</strong>");
            }
        }
    }
}

fn push_sources(out: &mut String, sources: &[GroundingSource]) {
    out.push_str("<div class=\"sources\"><h4>Sources:</h4><ul>");
    for source in sources {
        if is_web_link(&source.uri) {
            out.push_str(&format!(
                "<li><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></li>",
                escape(source.uri.trim()),
                escape(source.display_title())
            ));
        } else {
            // Other schemes (javascript:, data:, ...) are shown, never linked
            out.push_str(&format!(
                "<li>{} ({})</li>",
                escape(source.display_title()),
                escape(&source.uri)
            ));
        }
    }
    out.push_str("</ul></div>");
}

/// Only http and https URIs become links
fn is_web_link(uri: &str) -> bool {
    let uri = uri.trim().to_ascii_lowercase();
    uri.starts_with("https://") || uri.starts_with("http://")
}

/// Escape text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
