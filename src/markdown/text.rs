//! Display-width helpers for terminal output.
//!
//! Everything here measures in terminal columns, one grapheme cluster at a time,
//! so text is never cut inside a cluster (combining marks, ZWJ emoji, flags).

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Columns occupied by a single grapheme cluster.
#[inline]
pub fn grapheme_width(grapheme: &str) -> usize {
    grapheme.width().min(2)
}

/// Display width of a string in terminal columns.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_width).sum()
}

/// Longest prefix of `s` that fits in `max` columns.
///
/// # Returns
/// The prefix and its display width.
pub fn truncate_to_width(s: &str, max: usize) -> (&str, usize) {
    let mut width = 0;
    for (idx, g) in s.grapheme_indices(true) {
        let w = grapheme_width(g);
        if width + w > max {
            return (&s[..idx], width);
        }
        width += w;
    }
    (s, width)
}

/// Replaces tabs with spaces up to the next multiple of four columns.
pub fn expand_tabs(s: &str) -> String {
    if !s.contains('\t') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + 8);
    let mut column = 0;
    for g in s.graphemes(true) {
        if g == "\t" {
            let stop = 4 - column % 4;
            out.extend(std::iter::repeat_n(' ', stop));
            column += stop;
        } else {
            out.push_str(g);
            column += grapheme_width(g);
        }
    }
    out
}
