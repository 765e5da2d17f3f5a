//! Preview formatters: turn a loaded file into display lines.
//!
//! A [Formatters] registry holds an ordered list of [PreviewFormatter]s. The first
//! one whose `can_handle` accepts the file formats it:
//! - [MarkdownFormatter]: complete markdown files within the configured size limit
//! - [TextFormatter]: everything else, as sanitized plain text
//!
//! Also holds the line sanitization helpers shared with the UI.

use crate::config::MarkdownOptions;
use crate::core::preview::PreviewFile;
use crate::markdown::text::{expand_tabs, grapheme_width};
use crate::markdown::{
    MarkdownPreview, RenderOptions, RenderedDocument, StyleTag, StyledLine, line_metrics,
};

use unicode_segmentation::UnicodeSegmentation;

/// Shown for files without content.
const EMPTY_FILE_NOTICE: &str = "[Empty file]";

/// Everything a formatter may look at.
pub struct PreviewContext<'a> {
    pub file: &'a PreviewFile,
    pub markdown: &'a MarkdownOptions,
    pub render: &'a RenderOptions,
}

/// Formatted preview content.
#[derive(Debug, Clone)]
pub enum PreviewOutput {
    /// Parsed markdown, re-flowable for new pane widths.
    Markdown(MarkdownPreview),
    /// Sanitized plain text.
    Text(RenderedDocument),
}

impl PreviewOutput {
    pub fn rendered(&self) -> &RenderedDocument {
        match self {
            PreviewOutput::Markdown(preview) => preview.rendered(),
            PreviewOutput::Text(doc) => doc,
        }
    }

    /// Re-renders for new options. Plain text has nothing to re-flow.
    pub fn reflow(&mut self, options: &RenderOptions) {
        if let PreviewOutput::Markdown(preview) = self {
            preview.reflow(options);
        }
    }

    pub fn is_markdown(&self) -> bool {
        matches!(self, PreviewOutput::Markdown(_))
    }

    /// A single notice line, used in place of content.
    pub fn notice(text: &str) -> Self {
        PreviewOutput::Text(text_document(vec![StyledLine::styled(
            sanitize_line(text),
            StyleTag::Rule,
        )]))
    }
}

/// A capability-checked preview handler.
pub trait PreviewFormatter {
    fn name(&self) -> &'static str;
    fn can_handle(&self, ctx: &PreviewContext) -> bool;
    fn format(&self, ctx: &PreviewContext) -> PreviewOutput;
}

/// Renders markdown files through the markdown engine.
pub struct MarkdownFormatter;

impl PreviewFormatter for MarkdownFormatter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn can_handle(&self, ctx: &PreviewContext) -> bool {
        ctx.markdown.enabled()
            && !ctx.file.truncated
            && ctx.file.size <= ctx.markdown.max_format_size()
            && ctx
                .file
                .extension()
                .is_some_and(|ext| ctx.markdown.handles_extension(ext))
    }

    fn format(&self, ctx: &PreviewContext) -> PreviewOutput {
        let preview = MarkdownPreview::new(ctx.file.lines.as_slice(), ctx.render);
        if preview.document().is_empty() {
            return PreviewOutput::notice(EMPTY_FILE_NOTICE);
        }
        PreviewOutput::Markdown(preview)
    }
}

/// Shows any file as plain text, tabs expanded and control characters removed.
pub struct TextFormatter;

impl PreviewFormatter for TextFormatter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn can_handle(&self, _ctx: &PreviewContext) -> bool {
        true
    }

    fn format(&self, ctx: &PreviewContext) -> PreviewOutput {
        if ctx.file.lines.is_empty() {
            return PreviewOutput::notice(EMPTY_FILE_NOTICE);
        }
        let lines = ctx
            .file
            .lines
            .iter()
            .map(|line| StyledLine::styled(sanitize_line(line), StyleTag::Plain))
            .collect();
        PreviewOutput::Text(text_document(lines))
    }
}

fn text_document(lines: Vec<StyledLine>) -> RenderedDocument {
    RenderedDocument {
        metrics: line_metrics(&lines),
        lines,
    }
}

/// Ordered list of formatters; the first that can handle a file wins.
pub struct Formatters {
    handlers: Vec<Box<dyn PreviewFormatter + Send + Sync>>,
}

impl Formatters {
    /// A registry without handlers. Formatting falls back to plain text.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Markdown first, then plain text.
    pub fn with_defaults() -> Self {
        let mut formatters = Self::new();
        formatters.register(MarkdownFormatter);
        formatters.register(TextFormatter);
        formatters
    }

    pub fn register<F>(&mut self, formatter: F)
    where
        F: PreviewFormatter + Send + Sync + 'static,
    {
        self.handlers.push(Box::new(formatter));
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    pub fn format(&self, ctx: &PreviewContext) -> PreviewOutput {
        match self.handlers.iter().find(|h| h.can_handle(ctx)) {
            Some(handler) => {
                log::debug!(
                    "formatting {} with the {} formatter",
                    ctx.file.path.display(),
                    handler.name()
                );
                handler.format(ctx)
            }
            None => TextFormatter.format(ctx),
        }
    }
}

impl Default for Formatters {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Expands tabs to 4-column stops and removes control characters.
pub fn sanitize_line(line: &str) -> String {
    let expanded = expand_tabs(line);
    if expanded.chars().any(char::is_control) {
        expanded.chars().filter(|c| !c.is_control()).collect()
    } else {
        expanded
    }
}

/// Sanitizes a line and truncates or pads it to exactly `pane_width` columns.
/// # Returns
/// A sanitized string that fits exactly within the specified pane width.
pub fn sanitize_to_exact_width(line: &str, pane_width: usize) -> String {
    let clean = sanitize_line(line);
    let mut out = String::with_capacity(pane_width);
    let mut current_w = 0;

    for g in clean.graphemes(true) {
        let w = grapheme_width(g);
        if current_w + w > pane_width {
            break;
        }
        out.push_str(g);
        current_w += w;
    }

    // If the string is shorter than the pane, fill it with spaces.
    out.extend(std::iter::repeat_n(' ', pane_width - current_w));
    out
}
