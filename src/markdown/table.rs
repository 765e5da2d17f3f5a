//! Table layout for the markdown renderer.
//!
//! Tables are drawn with box characters and fitted to a width budget:
//! - natural column width is the widest rendered line in the column
//! - while too wide, the widest column (leftmost on ties) gives up one column, never below 3
//! - cell text is wrapped word-aware at grapheme boundaries
//! - cells taller than the line budget are cut and end with the ellipsis
//!
//! If the floor keeps a table wider than the budget, finished lines are clipped so the
//! width budget always holds.

use unicode_segmentation::UnicodeSegmentation;

use crate::markdown::ast::{Inline, TableAlignment};
use crate::markdown::render::{RenderOptions, inline_lines};
use crate::markdown::styled::{StyleTag, StyledLine};
use crate::markdown::text::{display_width, grapheme_width, truncate_to_width};

/// Columns are never shrunk below this width.
pub const MIN_COLUMN_WIDTH: usize = 3;

/// One wrapped line of a cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellLine {
    pub text: String,
    pub segments: StyledLine,
    pub width: usize,
}

impl CellLine {
    fn from_line(segments: StyledLine) -> Self {
        let text = segments.text();
        let width = display_width(&text);
        Self {
            text,
            segments,
            width,
        }
    }
}

/// The lines of one table cell.
pub type Cell = Vec<CellLine>;

/// Lays out a table and returns its lines, borders included.
///
/// The column count is the header's. Missing alignments fall back to the default.
pub fn layout_table(
    header: &[Vec<Inline>],
    rows: &[Vec<Vec<Inline>>],
    alignments: &[TableAlignment],
    options: &RenderOptions,
) -> Vec<StyledLine> {
    let columns = header.len();
    if columns == 0 {
        return Vec::new();
    }

    let header_lines: Vec<Vec<StyledLine>> = header
        .iter()
        .map(|cell| {
            let mut lines = inline_lines(cell, StyleTag::Plain);
            for line in &mut lines {
                line.restyle(StyleTag::Plain, StyleTag::Strong);
            }
            lines
        })
        .collect();
    let row_lines: Vec<Vec<Vec<StyledLine>>> = rows
        .iter()
        .map(|row| {
            (0..columns)
                .map(|c| match row.get(c) {
                    Some(cell) => inline_lines(cell, StyleTag::Plain),
                    None => vec![StyledLine::new()],
                })
                .collect()
        })
        .collect();

    let mut widths = vec![0usize; columns];
    for row in std::iter::once(&header_lines).chain(row_lines.iter()) {
        for (c, cell) in row.iter().enumerate() {
            let natural = cell.iter().map(StyledLine::width).max().unwrap_or(0);
            widths[c] = widths[c].max(natural);
        }
    }
    if options.table_max_width > 0 {
        shrink_columns(&mut widths, options.table_max_width);
    }

    let fit = |row: &[Vec<StyledLine>]| -> Vec<Cell> {
        row.iter()
            .zip(&widths)
            .map(|(lines, &width)| fit_cell(lines, width, options))
            .collect()
    };

    let mut out = Vec::new();
    out.push(border(&widths, '┌', '┬', '┐'));
    out.extend(assemble_row(&fit(&header_lines), &widths, alignments));
    out.push(border(&widths, '├', '┼', '┤'));
    for row in &row_lines {
        out.extend(assemble_row(&fit(row), &widths, alignments));
    }
    out.push(border(&widths, '└', '┴', '┘'));

    if options.table_max_width > 0 {
        for line in &mut out {
            if line.width() > options.table_max_width {
                *line = line.truncated(options.table_max_width);
            }
        }
    }
    out
}

/// Total drawn width for the given column widths: `│ a │ b │`.
pub fn table_width(widths: &[usize]) -> usize {
    widths.iter().sum::<usize>() + 3 * widths.len() + 1
}

fn shrink_columns(widths: &mut [usize], max_width: usize) {
    while table_width(widths) > max_width {
        let mut widest: Option<usize> = None;
        for (c, &w) in widths.iter().enumerate() {
            if w > MIN_COLUMN_WIDTH && widest.is_none_or(|best| w > widths[best]) {
                widest = Some(c);
            }
        }
        match widest {
            Some(c) => widths[c] -= 1,
            None => break,
        }
    }
    log::trace!("table columns shrunk to {widths:?} for max width {max_width}");
}

/// Wraps a cell's lines to `width` and applies the per-cell line budget.
fn fit_cell(lines: &[StyledLine], width: usize, options: &RenderOptions) -> Cell {
    let mut wrapped: Cell = lines
        .iter()
        .flat_map(|line| wrap_line(line, width))
        .map(CellLine::from_line)
        .collect();

    let max_lines = options.table_max_lines_per_cell;
    if max_lines > 0 && wrapped.len() > max_lines {
        wrapped.truncate(max_lines);
        if let Some(last) = wrapped.last_mut() {
            *last = CellLine::from_line(with_ellipsis(&last.segments, width, &options.ellipsis));
        }
    }
    wrapped
}

fn with_ellipsis(line: &StyledLine, width: usize, ellipsis: &str) -> StyledLine {
    let (ellipsis, ellipsis_width) = truncate_to_width(ellipsis, width);
    let mut kept = line.truncated(width - ellipsis_width);
    kept.trim_end();
    kept.push(ellipsis, StyleTag::Plain);
    kept
}

/// Word-aware wrapping: a line breaks after its last space when one fits, otherwise
/// mid-word. Leading spaces of continuation lines are dropped.
fn wrap_line(line: &StyledLine, width: usize) -> Vec<StyledLine> {
    let width = width.max(1);
    if line.width() <= width {
        return vec![line.clone()];
    }

    let graphemes: Vec<(&str, StyleTag)> = line
        .segments
        .iter()
        .flat_map(|s| s.text.graphemes(true).map(move |g| (g, s.style)))
        .collect();

    let mut out = Vec::new();
    let mut start = 0;
    while start < graphemes.len() {
        if !out.is_empty() {
            while start < graphemes.len() && graphemes[start].0 == " " {
                start += 1;
            }
            if start == graphemes.len() {
                break;
            }
        }

        let mut used = 0;
        let mut end = start;
        let mut last_space = None;
        while end < graphemes.len() {
            let (g, _) = graphemes[end];
            let w = grapheme_width(g);
            if used + w > width {
                break;
            }
            if g == " " {
                last_space = Some(end);
            }
            used += w;
            end += 1;
        }

        if end == start {
            // A cluster wider than the column; the final clip handles the overflow.
            end = start + 1;
        } else if end < graphemes.len()
            && graphemes[end].0 != " "
            && let Some(space) = last_space
            && space > start
        {
            end = space + 1;
        }

        let mut piece = StyledLine::new();
        for &(g, style) in &graphemes[start..end] {
            piece.push(g, style);
        }
        piece.trim_end();
        out.push(piece);
        start = end;
    }

    if out.is_empty() {
        out.push(StyledLine::new());
    }
    out
}

fn border(widths: &[usize], left: char, mid: char, right: char) -> StyledLine {
    let mut text = String::new();
    text.push(left);
    for (c, &w) in widths.iter().enumerate() {
        if c > 0 {
            text.push(mid);
        }
        text.extend(std::iter::repeat_n('─', w + 2));
    }
    text.push(right);
    StyledLine::styled(text, StyleTag::Rule)
}

fn assemble_row(cells: &[Cell], widths: &[usize], alignments: &[TableAlignment]) -> Vec<StyledLine> {
    let height = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);
    (0..height)
        .map(|r| {
            let mut line = StyledLine::styled("│", StyleTag::Rule);
            for (c, cell) in cells.iter().enumerate() {
                let width = widths[c];
                line.push(" ", StyleTag::Plain);
                match cell.get(r) {
                    Some(content) => {
                        let alignment = alignments.get(c).copied().unwrap_or_default();
                        push_aligned(&mut line, content, width, alignment);
                    }
                    None => line.push(" ".repeat(width), StyleTag::Plain),
                }
                line.push(" ", StyleTag::Plain);
                line.push("│", StyleTag::Rule);
            }
            line
        })
        .collect()
}

fn push_aligned(line: &mut StyledLine, content: &CellLine, width: usize, alignment: TableAlignment) {
    let pad = width.saturating_sub(content.width);
    let (left, right) = match alignment {
        TableAlignment::Default | TableAlignment::Left => (0, pad),
        TableAlignment::Center => (pad / 2, pad - pad / 2),
        TableAlignment::Right => (pad, 0),
    };
    line.push(" ".repeat(left), StyleTag::Plain);
    line.extend(content.segments.clone());
    line.push(" ".repeat(right), StyleTag::Plain);
}
