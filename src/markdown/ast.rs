//! Document tree for the markdown preview.
//!
//! The tree is built once by [crate::markdown::parse] and is read-only afterwards.
//! Every node owns its children, so a [Document] can be cached and rendered again
//! with different [crate::markdown::RenderOptions] without re-parsing.

/// A parsed markdown document: the top-level block sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Structural units of a document.
///
/// The set is closed: the block parser and the renderer both match on it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: u8,
        content: Vec<Inline>,
    },
    Paragraph {
        content: Vec<Inline>,
    },
    CodeBlock {
        info: String,
        lines: Vec<String>,
        fenced: bool,
    },
    List {
        ordered: bool,
        start: u64,
        items: Vec<ListItem>,
    },
    Blockquote {
        blocks: Vec<Block>,
    },
    HorizontalRule,
    Table(Table),
}

/// One entry of a [Block::List].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItem {
    pub blocks: Vec<Block>,
}

/// A pipe table. Every row has exactly `header.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<Vec<Inline>>,
    pub rows: Vec<Vec<Vec<Inline>>>,
    pub alignments: Vec<TableAlignment>,
}

/// Column alignment taken from the separator row (`:--`, `:-:`, `--:`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableAlignment {
    #[default]
    Default,
    Left,
    Center,
    Right,
}

/// Span-level content of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strike(Vec<Inline>),
    Code(String),
    Link {
        children: Vec<Inline>,
        destination: String,
    },
    Image {
        alt: String,
        destination: String,
    },
    LineBreak,
}

impl Inline {
    /// Concatenated visible text of this node, without any styling.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.push_plain(&mut out);
        out
    }

    fn push_plain(&self, out: &mut String) {
        match self {
            Inline::Text(t) | Inline::Code(t) => out.push_str(t),
            Inline::Emphasis(children) | Inline::Strong(children) | Inline::Strike(children) => {
                children.iter().for_each(|c| c.push_plain(out))
            }
            Inline::Link {
                children,
                destination,
            } => {
                if children.is_empty() {
                    out.push_str(destination);
                } else {
                    children.iter().for_each(|c| c.push_plain(out));
                }
            }
            Inline::Image { alt, destination } => {
                if alt.is_empty() {
                    out.push_str(destination)
                } else {
                    out.push_str(alt)
                }
            }
            Inline::LineBreak => out.push('\n'),
        }
    }
}
