//! Core runtime logic for mdpane.
//!
//! This module contains the non-UI pieces between a file on disk and the pager:
//! - [preview]: size-capped file loading with binary detection (see [load_preview]).
//! - [formatter]: the [Formatters] registry choosing between markdown and plain text.
//! - [terminal]: terminal setup/teardown and the crossterm/ratatui event loop.
//!
//! Most callers will import [load_preview] and [Formatters] from this module.

pub mod formatter;
pub mod preview;
pub mod terminal;

pub use formatter::{
    Formatters, MarkdownFormatter, PreviewContext, PreviewFormatter, PreviewOutput,
    TextFormatter, sanitize_line, sanitize_to_exact_width,
};
pub use preview::{PreviewError, PreviewFile, load_preview};
