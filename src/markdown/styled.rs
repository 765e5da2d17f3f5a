//! Styled output lines produced by the renderer.
//!
//! A [StyledLine] is a run of [StyledSegment]s. Concatenating the segment texts gives
//! the plain line, so plain and styled output never drift apart.

use crate::markdown::text::{display_width, truncate_to_width};

/// Style classes the renderer assigns. Colors are chosen later by the theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StyleTag {
    #[default]
    Plain,
    Emphasis,
    Strong,
    Strike,
    Code,
    Link,
    Heading,
    Rule,
}

/// A piece of text with a single style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSegment {
    pub text: String,
    pub style: StyleTag,
}

impl StyledSegment {
    pub fn new(text: impl Into<String>, style: StyleTag) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One output line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledLine {
    pub segments: Vec<StyledSegment>,
}

impl StyledLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// A line holding one segment.
    pub fn styled(text: impl Into<String>, style: StyleTag) -> Self {
        let mut line = Self::new();
        line.push(text, style);
        line
    }

    /// Appends text, merging it into the last segment when the style matches.
    pub fn push(&mut self, text: impl Into<String>, style: StyleTag) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if last.style == style => last.text.push_str(&text),
            _ => self.segments.push(StyledSegment::new(text, style)),
        }
    }

    /// Inserts text at the start of the line.
    pub fn prepend(&mut self, text: impl Into<String>, style: StyleTag) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        match self.segments.first_mut() {
            Some(first) if first.style == style => first.text.insert_str(0, &text),
            _ => self.segments.insert(0, StyledSegment::new(text, style)),
        }
    }

    pub fn extend(&mut self, other: StyledLine) {
        for segment in other.segments {
            self.push(segment.text, segment.style);
        }
    }

    /// The plain text of the line.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn width(&self) -> usize {
        self.segments.iter().map(|s| display_width(&s.text)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when the line has no visible characters.
    pub fn is_blank(&self) -> bool {
        self.segments.iter().all(|s| s.text.trim().is_empty())
    }

    /// Replaces every `from` segment style with `to`.
    pub fn restyle(&mut self, from: StyleTag, to: StyleTag) {
        for segment in &mut self.segments {
            if segment.style == from {
                segment.style = to;
            }
        }
    }

    /// Applies one style to the whole line.
    pub fn with_style(mut self, style: StyleTag) -> Self {
        let text = self.text();
        self.segments.clear();
        self.push(text, style);
        self
    }

    /// Longest prefix that fits in `max` columns, cut at grapheme boundaries.
    pub fn truncated(&self, max: usize) -> StyledLine {
        let mut out = StyledLine::new();
        let mut remaining = max;
        for segment in &self.segments {
            let (prefix, width) = truncate_to_width(&segment.text, remaining);
            out.push(prefix, segment.style);
            remaining -= width;
            if prefix.len() < segment.text.len() {
                break;
            }
        }
        out
    }

    /// Drops trailing whitespace.
    pub fn trim_end(&mut self) {
        while let Some(last) = self.segments.last_mut() {
            let trimmed_len = last.text.trim_end().len();
            if trimmed_len == 0 {
                self.segments.pop();
                continue;
            }
            last.text.truncate(trimmed_len);
            break;
        }
    }
}

/// Position data for one rendered line, used to map scroll offsets back to the
/// plain text (lines joined with `\n`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineMetrics {
    pub byte_offset: usize,
    pub byte_length: usize,
    pub display_width: usize,
    pub rune_count: usize,
}

/// Computes [LineMetrics] for each line.
pub fn line_metrics(lines: &[StyledLine]) -> Vec<LineMetrics> {
    let mut offset = 0;
    lines
        .iter()
        .map(|line| {
            let text = line.text();
            let metrics = LineMetrics {
                byte_offset: offset,
                byte_length: text.len(),
                display_width: display_width(&text),
                rune_count: text.chars().count(),
            };
            offset += text.len() + 1;
            metrics
        })
        .collect()
}
