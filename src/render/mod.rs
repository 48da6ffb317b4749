//! Response Rendering
//!
//! Generated text is parsed into inert [`RenderNode`]s. Presenters decide
//! how to show them: [`html`] escapes every text run, [`text`] targets a
//! terminal. Nodes never carry raw markup.
//!
//! ```rust
//! use health_saarthi::render::{render_block, RenderNode, Span};
//!
//! let nodes = render_block("## Hi\n* one");
//! assert_eq!(nodes[0], RenderNode::Heading { level: 2, content: vec![Span::text("Hi")] });
//! ```

mod block;
pub mod html;
mod inline;
pub mod text;

pub use block::{classify_line, render_block, render_sections, ListMarker, RenderNode};
pub use inline::{parse_inline, Span};
pub use text::TerminalStyle;
