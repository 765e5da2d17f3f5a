//! Markdown engine for the preview pane.
//!
//! Turns the lines of a markdown file into styled, width-aware terminal lines:
//! - [block]: line-oriented block parser producing a [Document]
//! - [inline]: inline parser for emphasis, code spans, links and breaks
//! - [links]: link destination sanitization
//! - [table]: table layout with width budgets, wrapping and cell truncation
//! - [render]: document to [StyledLine]s, plus [MarkdownPreview] for re-flowing
//! - [styled], [text]: output line types and display-width helpers
//!
//! Nothing in here fails: malformed markup falls back to literal text, and deep
//! nesting is flattened at fixed ceilings instead of recursing further.

pub mod ast;
pub mod block;
pub mod inline;
pub mod links;
pub mod render;
pub mod styled;
pub mod table;
pub mod text;

pub use ast::{Block, Document, Inline, ListItem, Table, TableAlignment};
pub use block::{MAX_BLOCK_DEPTH, parse};
pub use inline::{MAX_INLINE_DEPTH, parse_inline};
pub use links::sanitize_destination;
pub use render::{
    DEFAULT_ELLIPSIS, MarkdownPreview, RenderOptions, RenderedDocument, Renderer, render,
};
pub use styled::{LineMetrics, StyleTag, StyledLine, StyledSegment, line_metrics};
pub use table::{Cell, CellLine, layout_table};
