//! Block parser: turns text lines into a [Document].
//!
//! A cursor walks the lines, skips blanks, and at each remaining line tries the
//! block starters in a fixed order. The first match wins:
//! table, indented code, fenced code, blockquote, ATX heading, horizontal rule,
//! setext heading, list, and finally paragraph.
//!
//! Lists and blockquotes re-parse their collected lines with a depth counter.
//! At [MAX_BLOCK_DEPTH] the collected lines become a single paragraph instead, so
//! thousands of nested `>` markers cannot grow the stack.

use crate::markdown::ast::{Block, Document, ListItem, Table, TableAlignment};
use crate::markdown::inline::parse_inline;

/// Recursion ceiling for list items and blockquotes.
pub const MAX_BLOCK_DEPTH: usize = 64;

/// Parses newline-stripped lines into a document. Never fails.
pub fn parse<S: AsRef<str>>(lines: &[S]) -> Document {
    Document::new(BlockParser::new(lines, 0, false).parse())
}

struct BlockParser<'a, S> {
    lines: &'a [S],
    pos: usize,
    depth: usize,
    /// Soft line breaks are kept as breaks (list item content).
    keep_breaks: bool,
}

impl<'a, S: AsRef<str>> BlockParser<'a, S> {
    fn new(lines: &'a [S], depth: usize, keep_breaks: bool) -> Self {
        Self {
            lines,
            pos: 0,
            depth,
            keep_breaks,
        }
    }

    fn line(&self, idx: usize) -> &'a str {
        self.lines[idx].as_ref()
    }

    fn len(&self) -> usize {
        self.lines.len()
    }

    fn parse(mut self) -> Vec<Block> {
        let mut blocks = Vec::new();
        while self.pos < self.len() {
            if is_blank(self.line(self.pos)) {
                self.pos += 1;
                continue;
            }
            let block = self
                .table()
                .or_else(|| self.indented_code())
                .or_else(|| self.fenced_code())
                .or_else(|| self.blockquote())
                .or_else(|| self.atx_heading())
                .or_else(|| self.horizontal_rule())
                .or_else(|| self.setext_heading())
                .or_else(|| self.list())
                .unwrap_or_else(|| self.paragraph());
            blocks.push(block);
        }
        blocks
    }

    /// Parses nested lines one level deeper, or flattens them at the ceiling.
    fn nested(&self, lines: &[String], keep_breaks: bool) -> Vec<Block> {
        if self.depth + 1 >= MAX_BLOCK_DEPTH {
            log::debug!("block depth ceiling reached, flattening nested content");
            return flatten_to_paragraph(lines);
        }
        BlockParser::new(lines, self.depth + 1, keep_breaks).parse()
    }

    fn table_alignments_at(&self, idx: usize) -> Option<Vec<TableAlignment>> {
        if idx + 1 >= self.len() {
            return None;
        }
        let header = self.line(idx);
        let separator = self.line(idx + 1);
        if !header.contains('|') {
            return None;
        }
        let alignments = parse_separator(separator)?;
        (split_row(header).len() == alignments.len()).then_some(alignments)
    }

    fn table(&mut self) -> Option<Block> {
        let alignments = self.table_alignments_at(self.pos)?;
        let header = split_row(self.line(self.pos))
            .iter()
            .map(|cell| parse_inline(cell))
            .collect::<Vec<_>>();
        self.pos += 2;

        let mut rows = Vec::new();
        while self.pos < self.len() {
            let line = self.line(self.pos);
            if is_blank(line) || !line.contains('|') {
                break;
            }
            let cells = split_row(line);
            if cells.len() == header.len() {
                rows.push(cells.iter().map(|cell| parse_inline(cell)).collect());
            }
            self.pos += 1;
        }

        Some(Block::Table(Table {
            header,
            rows,
            alignments,
        }))
    }

    fn indented_code(&mut self) -> Option<Block> {
        if indent_width(self.line(self.pos)) < 4 {
            return None;
        }
        let mut lines = Vec::new();
        while self.pos < self.len() {
            let line = self.line(self.pos);
            if is_blank(line) {
                lines.push(String::new());
            } else if indent_width(line) >= 4 {
                lines.push(strip_columns(line, 4));
            } else {
                break;
            }
            self.pos += 1;
        }
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        Some(Block::CodeBlock {
            info: String::new(),
            lines,
            fenced: false,
        })
    }

    fn fenced_code(&mut self) -> Option<Block> {
        let fence = Fence::open(self.line(self.pos))?;
        self.pos += 1;

        let mut lines = Vec::new();
        while self.pos < self.len() {
            let line = self.line(self.pos);
            self.pos += 1;
            if fence.is_closed_by(line) {
                break;
            }
            lines.push(strip_columns(line, fence.indent));
        }
        Some(Block::CodeBlock {
            info: fence.info,
            lines,
            fenced: true,
        })
    }

    fn blockquote(&mut self) -> Option<Block> {
        if !is_quote_line(self.line(self.pos)) {
            return None;
        }
        let mut inner = Vec::new();
        while self.pos < self.len() {
            let line = self.line(self.pos);
            if is_quote_line(line) {
                inner.push(strip_quote_marker(line).to_string());
                self.pos += 1;
            } else if is_blank(line) {
                let next = (self.pos..self.len()).find(|&i| !is_blank(self.line(i)));
                match next {
                    Some(i) if is_quote_line(self.line(i)) => {
                        inner.extend(std::iter::repeat_n(String::new(), i - self.pos));
                        self.pos = i;
                    }
                    _ => break,
                }
            } else {
                break;
            }
        }
        Some(Block::Blockquote {
            blocks: self.nested(&inner, self.keep_breaks),
        })
    }

    fn atx_heading(&mut self) -> Option<Block> {
        let (level, text) = parse_atx_heading(self.line(self.pos))?;
        self.pos += 1;
        Some(Block::Heading {
            level,
            content: parse_inline(text),
        })
    }

    fn horizontal_rule(&mut self) -> Option<Block> {
        if !is_horizontal_rule(self.line(self.pos)) {
            return None;
        }
        self.pos += 1;
        Some(Block::HorizontalRule)
    }

    fn setext_level_at(&self, idx: usize) -> Option<u8> {
        let line = self.line(idx);
        if is_blank(line) || idx + 1 >= self.len() || ListMarker::parse(line).is_some() {
            return None;
        }
        setext_underline(self.line(idx + 1))
    }

    fn setext_heading(&mut self) -> Option<Block> {
        let level = self.setext_level_at(self.pos)?;
        let text = self.line(self.pos).trim();
        self.pos += 2;
        Some(Block::Heading {
            level,
            content: parse_inline(text),
        })
    }

    fn list(&mut self) -> Option<Block> {
        let first = ListMarker::parse(self.line(self.pos))?;
        let base = first.indent;
        let ordered = first.ordered;
        let same_kind = |line: &str| {
            ListMarker::parse(line).is_some_and(|m| m.indent == base && m.ordered == ordered)
        };

        let mut content_indent = first.content_indent();
        let mut fence = Fence::open(first.content);
        let mut current = vec![first.content.to_string()];
        let mut items = Vec::new();
        self.pos += 1;

        while self.pos < self.len() {
            let line = self.line(self.pos);

            if let Some(open) = &fence {
                let stripped = strip_columns(line, content_indent);
                if open.is_closed_by(&stripped) {
                    fence = None;
                }
                current.push(stripped);
                self.pos += 1;
                continue;
            }

            if is_blank(line) {
                let next = (self.pos..self.len()).find(|&i| !is_blank(self.line(i)));
                let continues = next.is_some_and(|i| {
                    let l = self.line(i);
                    indent_width(l) >= content_indent || same_kind(l)
                });
                if !continues {
                    break;
                }
                current.push(String::new());
                self.pos += 1;
                continue;
            }

            if let Some(marker) = ListMarker::parse(line)
                && marker.indent == base
                && marker.ordered == ordered
            {
                items.push(std::mem::take(&mut current));
                current.push(marker.content.to_string());
                content_indent = marker.content_indent();
                fence = Fence::open(marker.content);
                self.pos += 1;
                continue;
            }

            if indent_width(line) >= content_indent {
                let stripped = strip_columns(line, content_indent);
                fence = Fence::open(&stripped);
                current.push(stripped);
                self.pos += 1;
                continue;
            }

            break;
        }
        items.push(current);

        let items = items
            .iter()
            .map(|lines| ListItem {
                blocks: self.nested(lines, true),
            })
            .collect();
        Some(Block::List {
            ordered,
            start: if ordered { first.number } else { 1 },
            items,
        })
    }

    /// True when the line at `idx` would start a block other than a paragraph.
    fn starts_block(&self, idx: usize) -> bool {
        let line = self.line(idx);
        self.table_alignments_at(idx).is_some()
            || Fence::open(line).is_some()
            || is_quote_line(line)
            || parse_atx_heading(line).is_some()
            || is_horizontal_rule(line)
            || self.setext_level_at(idx).is_some()
            || ListMarker::parse(line).is_some()
    }

    fn paragraph(&mut self) -> Block {
        let mut lines = vec![self.line(self.pos)];
        self.pos += 1;
        while self.pos < self.len() {
            let line = self.line(self.pos);
            if is_blank(line) || indent_width(line) >= 4 || self.starts_block(self.pos) {
                break;
            }
            lines.push(line);
            self.pos += 1;
        }
        Block::Paragraph {
            content: parse_inline(&join_paragraph_lines(&lines, self.keep_breaks)),
        }
    }
}

fn flatten_to_paragraph(lines: &[String]) -> Vec<Block> {
    let text = lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        return Vec::new();
    }
    vec![Block::Paragraph {
        content: parse_inline(&text),
    }]
}

/// Joins paragraph lines into one inline run.
///
/// Two or more trailing spaces, or an odd run of trailing backslashes, make a hard
/// break (`\n`). Other line ends collapse to a single space unless `keep_breaks`.
fn join_paragraph_lines(lines: &[&str], keep_breaks: bool) -> String {
    let mut out = String::new();
    for (idx, line) in lines.iter().enumerate() {
        let line = line.trim_start();
        if idx + 1 == lines.len() {
            out.push_str(line.trim_end());
            break;
        }
        let (text, hard) = split_hard_break(line);
        out.push_str(text);
        out.push(if hard || keep_breaks { '\n' } else { ' ' });
    }
    out
}

fn split_hard_break(line: &str) -> (&str, bool) {
    let without_spaces = line.trim_end_matches(' ');
    if line.len() - without_spaces.len() >= 2 {
        return (without_spaces.trim_end(), true);
    }
    let trimmed = line.trim_end();
    let backslashes = trimmed.chars().rev().take_while(|&c| c == '\\').count();
    if backslashes % 2 == 1 {
        return (&trimmed[..trimmed.len() - 1], true);
    }
    (trimmed, false)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Leading whitespace in columns, tabs advancing to the next multiple of four.
fn indent_width(line: &str) -> usize {
    let mut col = 0;
    for c in line.chars() {
        match c {
            ' ' => col += 1,
            '\t' => col = (col / 4 + 1) * 4,
            _ => break,
        }
    }
    col
}

/// Removes up to `n` columns of leading whitespace.
fn strip_columns(line: &str, n: usize) -> String {
    let mut col = 0;
    for (idx, c) in line.char_indices() {
        if col >= n {
            return line[idx..].to_string();
        }
        match c {
            ' ' => col += 1,
            '\t' => {
                let next = (col / 4 + 1) * 4;
                if next > n {
                    return " ".repeat(next - n) + &line[idx + 1..];
                }
                col = next;
            }
            _ => return line[idx..].to_string(),
        }
    }
    String::new()
}

fn is_quote_line(line: &str) -> bool {
    indent_width(line) < 4 && line.trim_start().starts_with('>')
}

fn strip_quote_marker(line: &str) -> &str {
    let rest = &line.trim_start()[1..];
    rest.strip_prefix([' ', '\t']).unwrap_or(rest)
}

fn parse_atx_heading(line: &str) -> Option<(u8, &str)> {
    if indent_width(line) >= 4 {
        return None;
    }
    let t = line.trim_start();
    let level = t.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = t[level..].trim();
    let without = rest.trim_end_matches('#');
    let text = if without.is_empty() {
        ""
    } else if without.ends_with([' ', '\t']) {
        without.trim_end()
    } else {
        rest
    };
    Some((level as u8, text))
}

fn is_horizontal_rule(line: &str) -> bool {
    let mut marks = line.chars().filter(|c| *c != ' ' && *c != '\t');
    let Some(first) = marks.next() else {
        return false;
    };
    if !matches!(first, '-' | '*' | '_') {
        return false;
    }
    let mut count = 1;
    for c in marks {
        if c != first {
            return false;
        }
        count += 1;
    }
    count >= 3
}

fn setext_underline(line: &str) -> Option<u8> {
    let t = line.trim();
    if t.is_empty() {
        None
    } else if t.chars().all(|c| c == '=') {
        Some(1)
    } else if t.chars().all(|c| c == '-') {
        Some(2)
    } else {
        None
    }
}

/// An opening code fence.
struct Fence {
    marker: char,
    len: usize,
    indent: usize,
    info: String,
}

impl Fence {
    fn open(line: &str) -> Option<Self> {
        let indent = indent_width(line);
        if indent > 3 {
            return None;
        }
        let t = line.trim_start();
        let marker = t.chars().next().filter(|c| *c == '`' || *c == '~')?;
        let len = t.chars().take_while(|&c| c == marker).count();
        if len < 3 {
            return None;
        }
        let info = t[len..].trim();
        if marker == '`' && info.contains('`') {
            return None;
        }
        Some(Self {
            marker,
            len,
            indent,
            info: info.to_string(),
        })
    }

    fn is_closed_by(&self, line: &str) -> bool {
        if indent_width(line) > 3 {
            return false;
        }
        let t = line.trim();
        let run = t.chars().take_while(|&c| c == self.marker).count();
        run >= self.len && run == t.chars().count()
    }
}

/// A list item marker: `-`, `+`, `*` or `1.`/`1)` followed by whitespace.
struct ListMarker<'a> {
    indent: usize,
    ordered: bool,
    number: u64,
    width: usize,
    content: &'a str,
}

impl<'a> ListMarker<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let indent = indent_width(line);
        let t = line.trim_start();
        let bytes = t.as_bytes();

        let (ordered, width, number) = match bytes.first()? {
            b'-' | b'+' | b'*' => (false, 1, 0),
            b'0'..=b'9' => {
                let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
                if digits > 9 || !matches!(bytes.get(digits), Some(b'.' | b')')) {
                    return None;
                }
                (true, digits + 1, t[..digits].parse().ok()?)
            }
            _ => return None,
        };
        if !matches!(bytes.get(width), Some(b' ' | b'\t')) {
            return None;
        }
        Some(Self {
            indent,
            ordered,
            number,
            width,
            content: &t[width + 1..],
        })
    }

    fn content_indent(&self) -> usize {
        self.indent + self.width + 1
    }
}

/// Splits a table row on unescaped pipes, dropping the outer pipes.
fn split_row(line: &str) -> Vec<String> {
    let mut t = line.trim();
    t = t.strip_prefix('|').unwrap_or(t);
    if t.ends_with('|') && !t.ends_with("\\|") {
        t = &t[..t.len() - 1];
    }

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = t.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                cell.push('|');
                chars.next();
            }
            '\\' => {
                cell.push('\\');
                if let Some(next) = chars.next() {
                    cell.push(next);
                }
            }
            '|' => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(c),
        }
    }
    cells.push(cell.trim().to_string());
    cells
}

fn parse_separator(line: &str) -> Option<Vec<TableAlignment>> {
    split_row(line)
        .iter()
        .map(|cell| {
            let left = cell.starts_with(':');
            let right = cell.len() > 1 && cell.ends_with(':');
            let dashes = cell.trim_start_matches(':').trim_end_matches(':');
            if dashes.is_empty() || !dashes.chars().all(|c| c == '-') {
                return None;
            }
            Some(match (left, right) {
                (true, true) => TableAlignment::Center,
                (true, false) => TableAlignment::Left,
                (false, true) => TableAlignment::Right,
                (false, false) => TableAlignment::Default,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::ast::Inline;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    fn paragraph(s: &str) -> Block {
        Block::Paragraph {
            content: vec![text(s)],
        }
    }

    #[test]
    fn headings_atx_and_setext() {
        let doc = parse(&["# Title ##", "###### six", "####### seven", "Sub", "---", "Top", "==="]);
        assert_eq!(
            doc.blocks,
            vec![
                Block::Heading {
                    level: 1,
                    content: vec![text("Title")]
                },
                Block::Heading {
                    level: 6,
                    content: vec![text("six")]
                },
                paragraph("####### seven"),
                Block::Heading {
                    level: 2,
                    content: vec![text("Sub")]
                },
                Block::Heading {
                    level: 1,
                    content: vec![text("Top")]
                },
            ]
        );
    }

    #[test]
    fn paragraph_joining_and_hard_breaks() {
        let doc = parse(&["one  ", "two\\", "three", "four"]);
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph {
                content: vec![
                    text("one"),
                    Inline::LineBreak,
                    text("two"),
                    Inline::LineBreak,
                    text("three four"),
                ]
            }]
        );

        let doc = parse(&["even\\\\", "next"]);
        assert_eq!(doc.blocks, vec![paragraph("even\\ next")]);
    }

    #[test]
    fn horizontal_rules() {
        for line in ["---", "* * *", "___", "- - -", "  ***  "] {
            assert_eq!(parse(&[line]).blocks, vec![Block::HorizontalRule], "{line}");
        }
        assert_eq!(parse(&["--"]).blocks, vec![paragraph("--")]);
        assert_eq!(parse(&["-*-"]).blocks, vec![paragraph("-*-")]);
    }

    #[test]
    fn fenced_code_keeps_content_verbatim() {
        let doc = parse(&["```rust", "fn main() {", "", "    *x*", "```", "after"]);
        assert_eq!(
            doc.blocks,
            vec![
                Block::CodeBlock {
                    info: "rust".into(),
                    lines: vec!["fn main() {".into(), "".into(), "    *x*".into()],
                    fenced: true,
                },
                paragraph("after"),
            ]
        );
    }

    #[test]
    fn fence_needs_matching_marker_and_length() {
        let doc = parse(&["~~~~", "```", "~~~", "~~~~~"]);
        assert_eq!(
            doc.blocks,
            vec![Block::CodeBlock {
                info: String::new(),
                lines: vec!["```".into(), "~~~".into()],
                fenced: true,
            }]
        );
    }

    #[test]
    fn unterminated_fence_runs_to_end() {
        let doc = parse(&["```", "a", "b"]);
        assert_eq!(
            doc.blocks,
            vec![Block::CodeBlock {
                info: String::new(),
                lines: vec!["a".into(), "b".into()],
                fenced: true,
            }]
        );
    }

    #[test]
    fn indented_code_block() {
        let doc = parse(&["    let x = 1;", "", "      y", "", "back"]);
        assert_eq!(
            doc.blocks,
            vec![
                Block::CodeBlock {
                    info: String::new(),
                    lines: vec!["let x = 1;".into(), "".into(), "  y".into()],
                    fenced: false,
                },
                paragraph("back"),
            ]
        );
    }

    #[test]
    fn blockquote_with_blank_lines_inside() {
        let doc = parse(&["> first", ">", "> second", "", "> third", "outside"]);
        assert_eq!(
            doc.blocks,
            vec![
                Block::Blockquote {
                    blocks: vec![paragraph("first"), paragraph("second"), paragraph("third")]
                },
                paragraph("outside"),
            ]
        );
    }

    #[test]
    fn deeply_nested_quotes_are_flattened() {
        let line = ">".repeat(10_000) + " deep";
        let doc = parse(&[line]);

        let mut depth = 0;
        let mut blocks = &doc.blocks;
        while let [Block::Blockquote { blocks: inner }] = blocks.as_slice() {
            depth += 1;
            blocks = inner;
        }
        assert_eq!(depth, MAX_BLOCK_DEPTH);
        assert!(matches!(blocks.as_slice(), [Block::Paragraph { .. }]));
    }

    #[test]
    fn bullet_list_with_continuation() {
        let doc = parse(&["- item", "  continued", "- second"]);
        assert_eq!(
            doc.blocks,
            vec![Block::List {
                ordered: false,
                start: 1,
                items: vec![
                    ListItem {
                        blocks: vec![Block::Paragraph {
                            content: vec![text("item"), Inline::LineBreak, text("continued")]
                        }]
                    },
                    ListItem {
                        blocks: vec![paragraph("second")]
                    },
                ]
            }]
        );
    }

    #[test]
    fn ordered_list_start_and_nesting() {
        let doc = parse(&["3. three", "   - nested", "4) four", "", "after"]);
        let Block::List {
            ordered,
            start,
            items,
        } = &doc.blocks[0]
        else {
            panic!("expected list, got {:?}", doc.blocks);
        };
        assert!(ordered);
        assert_eq!(*start, 3);
        assert_eq!(items.len(), 2);
        assert!(matches!(
            items[0].blocks.as_slice(),
            [Block::Paragraph { .. }, Block::List { ordered: false, .. }]
        ));
        assert_eq!(doc.blocks[1], paragraph("after"));
    }

    #[test]
    fn list_kind_change_ends_list() {
        let doc = parse(&["- a", "1. b"]);
        assert_eq!(doc.blocks.len(), 2);
        assert!(matches!(doc.blocks[1], Block::List { ordered: true, .. }));
    }

    #[test]
    fn fenced_code_inside_list_item_spans_blank_lines() {
        let doc = parse(&["- code:", "  ```", "- not an item", "", "x", "  ```", "- next"]);
        let Block::List { items, .. } = &doc.blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].blocks[1],
            Block::CodeBlock {
                info: String::new(),
                lines: vec!["- not an item".into(), "".into(), "x".into()],
                fenced: true,
            }
        );
    }

    #[test]
    fn table_with_alignments_and_bad_rows() {
        let doc = parse(&[
            "| A | B | C |",
            "|:--|:-:|--:|",
            "| 1 | 2 | 3 |",
            "| short |",
            "| a \\| b | x | y |",
            "",
        ]);
        let Block::Table(table) = &doc.blocks[0] else {
            panic!("expected table, got {:?}", doc.blocks);
        };
        assert_eq!(
            table.alignments,
            vec![
                TableAlignment::Left,
                TableAlignment::Center,
                TableAlignment::Right
            ]
        );
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][0], vec![text("a | b")]);
    }

    #[test]
    fn separator_without_pipes_still_makes_a_table() {
        let doc = parse(&["| A |", "---", "| 1 |"]);
        let Block::Table(table) = &doc.blocks[0] else {
            panic!("expected table, got {:?}", doc.blocks);
        };
        assert_eq!(table.header.len(), 1);
        assert_eq!(table.rows, vec![vec![vec![text("1")]]]);

        let doc = parse(&["Title", "---"]);
        assert!(matches!(doc.blocks[0], Block::Heading { level: 2, .. }));
    }

    #[test]
    fn table_needs_matching_column_count() {
        let doc = parse(&["| A | B |", "| --- |"]);
        assert!(!matches!(doc.blocks[0], Block::Table(_)));
    }

    #[test]
    fn paragraph_stops_at_block_starters() {
        let doc = parse(&["text", "# heading", "more", "> quote"]);
        assert_eq!(doc.blocks.len(), 4);
    }

    #[test]
    fn strip_columns_expands_partial_tabs() {
        assert_eq!(strip_columns("\tx", 2), "  x");
        assert_eq!(strip_columns("      x", 4), "  x");
        assert_eq!(strip_columns("  x", 4), "x");
    }
}
