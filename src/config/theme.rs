//! Theme configuration options for mdpane
//!
//! This module defines the `[theme]` options which are read from the mdpane.toml
//! configuration file: one color pair per markdown style, plus the pane frame.
//!
//! Also holds the preset lookup and the logic to apply user overrides on top of a preset.

use crate::config::presets::preset;
use crate::markdown::StyleTag;
use crate::utils::parse_color;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use std::sync::LazyLock;

/// Theme configuration options
/// # Examples
/// ```toml
/// [theme]
/// name = "gruvbox-dark"
/// [theme.heading]
/// fg = "#fabd2f"
/// [theme.code]
/// fg = "yellow"
/// bg = "black"
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Theme {
    name: Option<String>,
    plain: ColorPair,
    emphasis: ColorPair,
    strong: ColorPair,
    strike: ColorPair,
    code: ColorPair,
    link: ColorPair,
    heading: ColorPair,
    rule: ColorPair,
    border: ColorPair,
    title: ColorPair,
    status_line: ColorPair,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            name: None,
            plain: ColorPair::default(),
            emphasis: ColorPair::default(),
            strong: ColorPair::default(),
            strike: ColorPair::fg(Color::DarkGray),
            code: ColorPair::fg(Color::Yellow),
            link: ColorPair::fg(Color::Blue),
            heading: ColorPair::fg(Color::Magenta),
            rule: ColorPair::fg(Color::DarkGray),
            border: ColorPair::fg(Color::DarkGray),
            title: ColorPair::fg(Color::Magenta),
            status_line: ColorPair::default(),
        }
    }
}

/// Macro to override a field in the target theme if it differs from the default theme.
/// This is used to apply user-defined overrides on top of a preset theme.
macro_rules! override_if_changed {
    ($target:ident, $user:ident, $default:ident, $field:ident) => {
        if $user.$field != $default.$field {
            $target.$field = $user.$field;
        }
    };
}

impl Theme {
    /// Internal default theme, used as the fallback when a color is set to Reset.
    pub fn internal_defaults() -> &'static Self {
        static DEFAULT: LazyLock<Theme> = LazyLock::new(Theme::default);
        &DEFAULT
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Style for a markdown style tag.
    ///
    /// Colors come from the theme, falling back to the internal defaults. The text
    /// attributes are fixed per tag.
    pub fn style_for(&self, tag: StyleTag) -> Style {
        let defaults = Theme::internal_defaults();
        let (pair, fallback, modifier) = match tag {
            StyleTag::Plain => (&self.plain, &defaults.plain, Modifier::empty()),
            StyleTag::Emphasis => (&self.emphasis, &defaults.emphasis, Modifier::ITALIC),
            StyleTag::Strong => (&self.strong, &defaults.strong, Modifier::BOLD),
            StyleTag::Strike => (&self.strike, &defaults.strike, Modifier::CROSSED_OUT),
            StyleTag::Code => (&self.code, &defaults.code, Modifier::empty()),
            StyleTag::Link => (&self.link, &defaults.link, Modifier::UNDERLINED),
            StyleTag::Heading => (&self.heading, &defaults.heading, Modifier::BOLD),
            StyleTag::Rule => (&self.rule, &defaults.rule, Modifier::empty()),
        };
        pair.style_or(fallback).add_modifier(modifier)
    }

    pub fn border_style(&self) -> Style {
        self.border.style_or(&Theme::internal_defaults().border)
    }

    pub fn title_style(&self) -> Style {
        self.title.style_or(&Theme::internal_defaults().title)
    }

    pub fn status_line_style(&self) -> Style {
        self.status_line
            .style_or(&Theme::internal_defaults().status_line)
    }

    /// Apply user overrides on top of a preset theme if a known preset name is provided.
    /// If no preset name is provided or the name is unknown, returns the theme as is.
    pub fn with_overrides(self) -> Self {
        let Some(mut base) = self.name.as_deref().and_then(preset) else {
            if let Some(name) = self.name.as_deref()
                && name != "default"
            {
                log::warn!("unknown theme preset {name:?}, using the default theme");
            }
            return self;
        };
        base.apply_user_overrides(self);
        base
    }

    /// Apply user overrides on top of the current theme.
    /// Compares each field with the default theme and overrides if changed,
    /// so users only specify the fields they want to change.
    fn apply_user_overrides(&mut self, user: Theme) {
        let defaults = Theme::default();

        override_if_changed!(self, user, defaults, plain);
        override_if_changed!(self, user, defaults, emphasis);
        override_if_changed!(self, user, defaults, strong);
        override_if_changed!(self, user, defaults, strike);
        override_if_changed!(self, user, defaults, code);
        override_if_changed!(self, user, defaults, link);
        override_if_changed!(self, user, defaults, heading);
        override_if_changed!(self, user, defaults, rule);
        override_if_changed!(self, user, defaults, border);
        override_if_changed!(self, user, defaults, title);
        override_if_changed!(self, user, defaults, status_line);

        if user.name.is_some() {
            self.name = user.name;
        }
    }
}

/// ColorPair struct to hold foreground and background colors.
/// Used throughout the theme configuration.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    #[serde(default, deserialize_with = "deserialize_color_field")]
    fg: Color,
    #[serde(default, deserialize_with = "deserialize_color_field")]
    bg: Color,
}

/// Sets both foreground and background to Color::Reset
impl Default for ColorPair {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

impl ColorPair {
    pub fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }

    /// A pair with only the foreground set.
    pub fn fg(fg: Color) -> Self {
        Self {
            fg,
            ..Self::default()
        }
    }

    /// Resolves the ColorPair by replacing Reset colors with those from another ColorPair.
    pub fn resolve(&self, other: &ColorPair) -> Self {
        Self {
            fg: if self.fg == Color::Reset {
                other.fg
            } else {
                self.fg
            },
            bg: if self.bg == Color::Reset {
                other.bg
            } else {
                self.bg
            },
        }
    }

    /// Converts the ColorPair to a Style, falling back to the provided fallback ColorPair for Reset colors.
    pub fn style_or(&self, fallback: &ColorPair) -> Style {
        let resolved = self.resolve(fallback);
        Style::default().fg(resolved.fg).bg(resolved.bg)
    }
}

// Helper function to deserialize Theme colors
fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}

/// Helper function to convert RGB tuples to [Color] instances.
fn rgb(c: (u8, u8, u8)) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

/// Palette struct to apply internal themes to the central [make_theme] function.
pub struct Palette {
    pub base: (u8, u8, u8),
    pub surface: (u8, u8, u8),
    pub overlay: (u8, u8, u8),
    pub primary: (u8, u8, u8),
    pub secondary: (u8, u8, u8),
    pub code: (u8, u8, u8),
}

/// Centralized function to create a Theme from a Palette.
/// Used by all internal themes to avoid code duplication.
pub fn make_theme(name: &str, palette: Palette) -> Theme {
    let primary = rgb(palette.primary);
    let secondary = rgb(palette.secondary);
    let muted = rgb(palette.overlay);
    let struct_color = rgb(palette.surface);

    Theme {
        name: Some(name.to_string()),
        strike: ColorPair::fg(muted),
        code: ColorPair::new(rgb(palette.code), struct_color),
        link: ColorPair::fg(secondary),
        heading: ColorPair::fg(primary),
        rule: ColorPair::fg(muted),
        border: ColorPair::fg(struct_color),
        title: ColorPair::fg(muted),
        status_line: ColorPair::new(Color::Reset, rgb(palette.base)),
        ..Theme::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_modifiers_per_tag() {
        let theme = Theme::default();
        assert!(
            theme
                .style_for(StyleTag::Heading)
                .add_modifier
                .contains(Modifier::BOLD)
        );
        assert!(
            theme
                .style_for(StyleTag::Link)
                .add_modifier
                .contains(Modifier::UNDERLINED)
        );
        assert!(
            theme
                .style_for(StyleTag::Emphasis)
                .add_modifier
                .contains(Modifier::ITALIC)
        );
        assert_eq!(theme.style_for(StyleTag::Plain).add_modifier, Modifier::empty());
    }

    #[test]
    fn user_colors_override_preset() -> Result<(), toml::de::Error> {
        let user: Theme = toml::from_str(
            r##"
            name = "nord"
            [link]
            fg = "#ff0000"
            "##,
        )?;
        let theme = user.with_overrides();
        assert_eq!(theme.name(), Some("nord"));
        assert_eq!(
            theme.style_for(StyleTag::Link).fg,
            Some(Color::Rgb(255, 0, 0))
        );
        // untouched fields come from the preset
        assert_ne!(theme.style_for(StyleTag::Heading).fg, Some(Color::Magenta));
        Ok(())
    }

    #[test]
    fn reset_colors_fall_back_to_defaults() -> Result<(), toml::de::Error> {
        let user: Theme = toml::from_str("[code]\nfg = \"default\"")?;
        assert_eq!(user.style_for(StyleTag::Code).fg, Some(Color::Yellow));
        Ok(())
    }
}
