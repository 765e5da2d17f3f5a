//! Non-interactive output for `mdp --print` and `mdp --plain`.
//!
//! Styled output maps theme styles to crossterm attributes directly; plain output
//! writes the rendered text only.

use crate::config::Theme;
use crate::core::sanitize_line;
use crate::markdown::StyledLine;

use crossterm::queue;
use crossterm::style::{self as ct, Attribute, ContentStyle, PrintStyledContent, StyledContent};
use ratatui::style::{Color, Modifier, Style};
use std::io::{self, Write};

/// Writes lines with terminal styles.
pub fn write_styled<W: Write>(out: &mut W, lines: &[StyledLine], theme: &Theme) -> io::Result<()> {
    for line in lines {
        for seg in &line.segments {
            let content = StyledContent::new(
                content_style(theme.style_for(seg.style)),
                sanitize_line(&seg.text),
            );
            queue!(out, PrintStyledContent(content))?;
        }
        writeln!(out)?;
    }
    out.flush()
}

/// Writes the plain text of each line.
pub fn write_plain<W: Write>(out: &mut W, lines: &[StyledLine]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", sanitize_line(&line.text()))?;
    }
    out.flush()
}

fn content_style(style: Style) -> ContentStyle {
    let mut content = ContentStyle::new();
    content.foreground_color = style.fg.and_then(to_crossterm_color);
    content.background_color = style.bg.and_then(to_crossterm_color);

    for (modifier, attribute) in [
        (Modifier::BOLD, Attribute::Bold),
        (Modifier::DIM, Attribute::Dim),
        (Modifier::ITALIC, Attribute::Italic),
        (Modifier::UNDERLINED, Attribute::Underlined),
        (Modifier::REVERSED, Attribute::Reverse),
        (Modifier::CROSSED_OUT, Attribute::CrossedOut),
    ] {
        if style.add_modifier.contains(modifier) {
            content.attributes.set(attribute);
        }
    }
    content
}

/// Reset maps to None so unstyled text carries no escape codes.
fn to_crossterm_color(color: Color) -> Option<ct::Color> {
    let c = match color {
        Color::Reset => return None,
        Color::Black => ct::Color::Black,
        Color::Red => ct::Color::DarkRed,
        Color::Green => ct::Color::DarkGreen,
        Color::Yellow => ct::Color::DarkYellow,
        Color::Blue => ct::Color::DarkBlue,
        Color::Magenta => ct::Color::DarkMagenta,
        Color::Cyan => ct::Color::DarkCyan,
        Color::Gray => ct::Color::Grey,
        Color::DarkGray => ct::Color::DarkGrey,
        Color::LightRed => ct::Color::Red,
        Color::LightGreen => ct::Color::Green,
        Color::LightYellow => ct::Color::Yellow,
        Color::LightBlue => ct::Color::Blue,
        Color::LightMagenta => ct::Color::Magenta,
        Color::LightCyan => ct::Color::Cyan,
        Color::White => ct::Color::White,
        Color::Indexed(i) => ct::Color::AnsiValue(i),
        Color::Rgb(r, g, b) => ct::Color::Rgb { r, g, b },
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::StyleTag;

    #[test]
    fn plain_output_has_no_escapes() -> io::Result<()> {
        let lines = vec![
            StyledLine::styled("# Title", StyleTag::Heading),
            StyledLine::new(),
            StyledLine::styled("body", StyleTag::Plain),
        ];
        let mut out = Vec::new();
        write_plain(&mut out, &lines)?;
        assert_eq!(String::from_utf8_lossy(&out), "# Title\n\nbody\n");
        Ok(())
    }

    #[test]
    fn styled_output_carries_attributes() -> io::Result<()> {
        let lines = vec![StyledLine::styled("# Title", StyleTag::Heading)];
        let mut out = Vec::new();
        write_styled(&mut out, &lines, &Theme::default())?;
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("# Title"));
        assert!(text.contains("\u{1b}[1m"));
        Ok(())
    }

    #[test]
    fn reset_is_not_emitted() {
        assert_eq!(to_crossterm_color(Color::Reset), None);
        assert_eq!(
            to_crossterm_color(Color::Rgb(1, 2, 3)),
            Some(ct::Color::Rgb { r: 1, g: 2, b: 3 })
        );
    }
}
