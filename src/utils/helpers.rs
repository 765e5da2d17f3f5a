//! Helpers for mdpane.
//!
//! Small utilities used throughout mdpane:
//! - Color parsing from strings or hex codes
//! - Locating the home directory
//! - Displaying home directories as "~" in file paths

use ratatui::style::Color;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Parses a string (color name or hex) into a ratatui::style::color
///
/// Supports standard names (red, green, etc.) as well as hex values (#RRGGBB or #RGB)
pub fn parse_color(s: &str) -> Color {
    match s.to_lowercase().as_str() {
        "default" | "reset" => Color::Reset,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        "gray" => Color::Gray,
        "darkgray" => Color::DarkGray,
        _ => {
            if let Some(color) = s.strip_prefix('#') {
                match color.len() {
                    6 => {
                        if let Ok(rgb) = u32::from_str_radix(color, 16) {
                            return Color::Rgb(
                                ((rgb >> 16) & 0xFF) as u8,
                                ((rgb >> 8) & 0xFF) as u8,
                                (rgb & 0xFF) as u8,
                            );
                        }
                    }
                    3 => {
                        let expanded = color
                            .chars()
                            .map(|c| format!("{}{}", c, c))
                            .collect::<String>();
                        if let Ok(rgb) = u32::from_str_radix(&expanded, 16) {
                            return Color::Rgb(
                                ((rgb >> 16) & 0xFF) as u8,
                                ((rgb >> 8) & 0xFF) as u8,
                                (rgb & 0xFF) as u8,
                            );
                        }
                    }
                    _ => {}
                }
            }
            // fallback
            Color::Reset
        }
    }
}

/// The user's home directory, if it can be determined.
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Util function to shorten home directory to ~.
/// Used for paths in CLI messages.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if let Some(home_dir) = get_home()
        && let Ok(stripped) = path.strip_prefix(&home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        } else {
            let mut short = stripped.display().to_string();
            if short.starts_with(MAIN_SEPARATOR) {
                short.remove(0);
            }
            return format!("~{}{}", MAIN_SEPARATOR, short);
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_hex_colors() {
        assert_eq!(parse_color("Yellow"), Color::Yellow);
        assert_eq!(parse_color("darkgray"), Color::DarkGray);
        assert_eq!(parse_color("#ff8000"), Color::Rgb(255, 128, 0));
        assert_eq!(parse_color("#f80"), Color::Rgb(255, 136, 0));
    }

    #[test]
    fn unknown_colors_reset() {
        assert_eq!(parse_color("default"), Color::Reset);
        assert_eq!(parse_color("not-a-color"), Color::Reset);
        assert_eq!(parse_color("#12"), Color::Reset);
        assert_eq!(parse_color("#gggggg"), Color::Reset);
    }

    #[test]
    fn home_is_shortened() {
        let Some(home) = get_home().filter(|h| h.parent().is_some()) else {
            return;
        };
        assert_eq!(shorten_home_path(&home), "~");
        let doc = home.join("notes").join("todo.md");
        assert_eq!(
            shorten_home_path(&doc),
            format!("~{MAIN_SEPARATOR}notes{MAIN_SEPARATOR}todo.md")
        );
        assert_eq!(shorten_home_path("/definitely/elsewhere.md"), "/definitely/elsewhere.md");
    }
}
