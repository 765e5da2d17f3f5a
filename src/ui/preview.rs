//! Styled lines to ratatui text.
//!
//! Every [StyleTag] resolves to a ratatui [Style] through the [Theme]; segment
//! text is sanitized so control characters never reach the terminal.

use crate::config::Theme;
use crate::core::sanitize_line;
use crate::markdown::{StyleTag, StyledLine};

use ratatui::style::Style;
use ratatui::text::{Line, Span};

/// One styled line as a ratatui [Line].
pub fn styled_line(line: &StyledLine, theme: &Theme) -> Line<'static> {
    let spans: Vec<Span<'static>> = line
        .segments
        .iter()
        .map(|seg| Span::styled(sanitize_line(&seg.text), theme.style_for(seg.style)))
        .collect();
    Line::from(spans)
}

/// The lines visible from `scroll` in a pane `height` rows tall.
pub fn visible_lines(
    lines: &[StyledLine],
    scroll: usize,
    height: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    lines
        .iter()
        .skip(scroll)
        .take(height)
        .map(|line| styled_line(line, theme))
        .collect()
}

/// Style of plain text, used to fill the pane background.
pub fn base_style(theme: &Theme) -> Style {
    theme.style_for(StyleTag::Plain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Modifier};

    #[test]
    fn segments_keep_their_theme_styles() {
        let theme = Theme::default();
        let mut line = StyledLine::styled("see ", StyleTag::Plain);
        line.push("docs", StyleTag::Link);

        let out = styled_line(&line, &theme);
        assert_eq!(out.spans.len(), 2);
        assert_eq!(out.spans[1].content, "docs");
        assert_eq!(out.spans[1].style.fg, Some(Color::Blue));
        assert!(out.spans[1].style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn only_the_viewport_is_converted() {
        let theme = Theme::default();
        let lines: Vec<StyledLine> = (0..10)
            .map(|i| StyledLine::styled(format!("line {i}"), StyleTag::Plain))
            .collect();

        let visible = visible_lines(&lines, 8, 5, &theme);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].spans[0].content, "line 8");
    }
}
