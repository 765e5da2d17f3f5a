//! Renderer: turns a [Document] into styled terminal lines.
//!
//! Output rules:
//! - one blank line separates consecutive non-empty blocks
//! - headings keep their `#` markers, code blocks are indented four spaces
//! - list bullets cycle `•`, `◦`, `▪` with nesting depth
//! - blockquote lines start with `│ `, rules are a single `─`
//! - tables are delegated to [layout_table], with the width budget reduced by the
//!   list and quote prefixes they are nested under
//!
//! Rendering is a pure function of the document and [RenderOptions], so a resize
//! only needs a re-render of the parsed document.

use crate::markdown::ast::{Block, Document, Inline};
use crate::markdown::block::parse;
use crate::markdown::styled::{LineMetrics, StyleTag, StyledLine, line_metrics};
use crate::markdown::table::layout_table;
use crate::markdown::text::{display_width, expand_tabs};

pub const DEFAULT_ELLIPSIS: &str = "…";

const BULLETS: [&str; 3] = ["•", "◦", "▪"];
const CODE_INDENT: &str = "    ";
const QUOTE_PREFIX: &str = "│ ";

/// Layout knobs for rendering.
///
/// Zero means unlimited for both table limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub table_max_width: usize,
    pub table_max_lines_per_cell: usize,
    pub ellipsis: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            table_max_width: 0,
            table_max_lines_per_cell: 0,
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
        }
    }
}

impl RenderOptions {
    /// Options fitted to a pane of `width` columns.
    pub fn for_width(mut self, width: usize) -> Self {
        self.table_max_width = width;
        self
    }
}

pub struct Renderer<'a> {
    options: &'a RenderOptions,
}

impl<'a> Renderer<'a> {
    pub fn new(options: &'a RenderOptions) -> Self {
        Self { options }
    }

    pub fn render_styled(&self, document: &Document) -> Vec<StyledLine> {
        self.blocks(&document.blocks, 0, 0)
    }

    pub fn render_plain(&self, document: &Document) -> Vec<String> {
        self.render_styled(document)
            .iter()
            .map(StyledLine::text)
            .collect()
    }

    /// `indent` is the width of the prefixes the caller will put in front of
    /// every returned line.
    fn blocks(&self, blocks: &[Block], depth: usize, indent: usize) -> Vec<StyledLine> {
        let mut out: Vec<StyledLine> = Vec::new();
        for block in blocks {
            let lines = self.block(block, depth, indent);
            if lines.is_empty() {
                continue;
            }
            if out.last().is_some_and(|last| !last.is_blank()) {
                out.push(StyledLine::new());
            }
            out.extend(lines);
        }
        out
    }

    fn block(&self, block: &Block, depth: usize, indent: usize) -> Vec<StyledLine> {
        match block {
            Block::Heading { level, content } => {
                let mut lines: Vec<StyledLine> = inline_lines(content, StyleTag::Heading)
                    .into_iter()
                    .map(|line| line.with_style(StyleTag::Heading))
                    .collect();
                let mut marker = "#".repeat(usize::from(*level));
                if let Some(first) = lines.first_mut() {
                    if !first.is_empty() {
                        marker.push(' ');
                    }
                    first.prepend(marker, StyleTag::Heading);
                }
                lines
            }
            Block::Paragraph { content } => {
                let lines = inline_lines(content, StyleTag::Plain);
                if lines.iter().all(StyledLine::is_empty) {
                    Vec::new()
                } else {
                    lines
                }
            }
            Block::CodeBlock { info, lines, .. } => {
                let mut out = Vec::with_capacity(lines.len() + 1);
                if !info.is_empty() {
                    out.push(StyledLine::styled(
                        format!("{CODE_INDENT}[{info}]"),
                        StyleTag::Code,
                    ));
                }
                for line in lines {
                    out.push(StyledLine::styled(
                        format!("{CODE_INDENT}{}", expand_tabs(line)),
                        StyleTag::Code,
                    ));
                }
                out
            }
            Block::List {
                ordered,
                start,
                items,
            } => {
                let mut out = Vec::new();
                for (idx, item) in items.iter().enumerate() {
                    let marker = if *ordered {
                        format!("{}.", start.saturating_add(idx as u64))
                    } else {
                        BULLETS[depth % BULLETS.len()].to_string()
                    };
                    let prefix = format!("{}{marker} ", "  ".repeat(depth));
                    let prefix_width = display_width(&prefix);
                    let pad = " ".repeat(prefix_width);

                    let body = self.blocks(&item.blocks, depth + 1, indent + prefix_width);
                    if body.is_empty() {
                        out.push(StyledLine::styled(prefix.trim_end(), StyleTag::Plain));
                        continue;
                    }
                    for (n, mut line) in body.into_iter().enumerate() {
                        if n == 0 {
                            line.prepend(prefix.as_str(), StyleTag::Plain);
                        } else if !line.is_empty() {
                            line.prepend(pad.as_str(), StyleTag::Plain);
                        }
                        out.push(line);
                    }
                }
                out
            }
            Block::Blockquote { blocks } => self
                .blocks(blocks, depth, indent + display_width(QUOTE_PREFIX))
                .into_iter()
                .map(|mut line| {
                    line.prepend(QUOTE_PREFIX, StyleTag::Rule);
                    line
                })
                .collect(),
            Block::HorizontalRule => vec![StyledLine::styled("─", StyleTag::Rule)],
            Block::Table(table) => {
                let options = self.nested_table_options(indent);
                layout_table(&table.header, &table.rows, &table.alignments, &options)
            }
        }
    }

    /// Table options for a table whose lines get `indent` columns of prefix.
    ///
    /// The budget never drops to zero, which would lift the limit.
    fn nested_table_options(&self, indent: usize) -> RenderOptions {
        let mut options = self.options.clone();
        if options.table_max_width > 0 {
            options.table_max_width = options.table_max_width.saturating_sub(indent).max(1);
        }
        options
    }
}

/// Renders inline nodes into lines, starting a new line at each break.
///
/// The innermost style wins, except that link text always keeps the link style and
/// everything under `base == Heading` stays a heading.
pub(crate) fn inline_lines(inlines: &[Inline], base: StyleTag) -> Vec<StyledLine> {
    let mut lines = vec![StyledLine::new()];
    push_inlines(inlines, base, &mut lines);
    lines
}

fn push_inlines(inlines: &[Inline], style: StyleTag, lines: &mut Vec<StyledLine>) {
    for node in inlines {
        match node {
            Inline::Text(text) => push_text(lines, text, style),
            Inline::Emphasis(children) => {
                push_inlines(children, nested_style(style, StyleTag::Emphasis), lines)
            }
            Inline::Strong(children) => {
                push_inlines(children, nested_style(style, StyleTag::Strong), lines)
            }
            Inline::Strike(children) => {
                push_inlines(children, nested_style(style, StyleTag::Strike), lines)
            }
            Inline::Code(code) => push_text(lines, code, nested_style(style, StyleTag::Code)),
            Inline::Link {
                children,
                destination,
            } => {
                let style = nested_style(style, StyleTag::Link);
                if children.is_empty() {
                    push_text(lines, destination, style);
                } else {
                    push_inlines(children, style, lines);
                }
            }
            Inline::Image { alt, destination } => {
                let text = if alt.is_empty() { destination } else { alt };
                push_text(lines, text, nested_style(style, StyleTag::Link));
            }
            Inline::LineBreak => lines.push(StyledLine::new()),
        }
    }
}

fn push_text(lines: &mut Vec<StyledLine>, text: &str, style: StyleTag) {
    if let Some(line) = lines.last_mut() {
        line.push(text, style);
    }
}

fn nested_style(outer: StyleTag, inner: StyleTag) -> StyleTag {
    match outer {
        StyleTag::Link | StyleTag::Heading => outer,
        _ => inner,
    }
}

/// Rendered lines plus their [LineMetrics].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    pub lines: Vec<StyledLine>,
    pub metrics: Vec<LineMetrics>,
}

impl RenderedDocument {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn plain_lines(&self) -> Vec<String> {
        self.lines.iter().map(StyledLine::text).collect()
    }
}

/// Renders a document with its line metrics.
pub fn render(document: &Document, options: &RenderOptions) -> RenderedDocument {
    let lines = Renderer::new(options).render_styled(document);
    let metrics = line_metrics(&lines);
    RenderedDocument { lines, metrics }
}

/// A parsed document kept together with its current rendering.
///
/// Parsing happens once. [MarkdownPreview::reflow] re-renders for new options,
/// such as a changed pane width.
#[derive(Debug, Clone)]
pub struct MarkdownPreview {
    document: Document,
    rendered: RenderedDocument,
}

impl MarkdownPreview {
    pub fn new<S: AsRef<str>>(lines: &[S], options: &RenderOptions) -> Self {
        let document = parse(lines);
        let rendered = render(&document, options);
        Self { document, rendered }
    }

    pub fn reflow(&mut self, options: &RenderOptions) {
        self.rendered = render(&self.document, options);
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn rendered(&self) -> &RenderedDocument {
        &self.rendered
    }
}
