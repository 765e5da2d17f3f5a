//! The main config loading module for mdpane.
//!
//! Handles loading and deserializing settings from `mdpane.toml`.
//!
//! Provides the main [Config] struct, as well as the internal [RawConfig] used for parsing.
//!
//! Also implements default config generation for `mdp --init`.

use crate::config::{Display, MarkdownOptions, PreviewLimits, Theme};
use crate::markdown::RenderOptions;
use crate::utils::get_home;

use serde::Deserialize;
use std::{fs, io, path::Path, path::PathBuf};

/// Raw configuration as read from the toml file.
/// It is converted into the main [Config] struct, which resolves theme presets.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    markdown: MarkdownOptions,
    preview: PreviewLimits,
    display: Display,
    theme: Theme,
}

/// Main configuration struct for mdpane.
#[derive(Debug, Default)]
pub struct Config {
    markdown: MarkdownOptions,
    preview: PreviewLimits,
    display: Display,
    theme: Theme,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            markdown: raw.markdown,
            preview: raw.preview,
            display: raw.display,
            theme: raw.theme.with_overrides(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    /// If the file does not exist or fails to parse, returns the default configuration.
    ///
    /// Called by the entry point at startup.
    pub fn load() -> Self {
        let path = Self::default_path();

        if !path.exists() {
            log::debug!(
                "no config file at {}, using internal defaults (tip: run 'mdp --init')",
                path.display()
            );
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("error parsing config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("cannot read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parses a config from toml text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawConfig>(content).map(Config::from)
    }

    // Getters

    #[inline]
    pub fn markdown(&self) -> &MarkdownOptions {
        &self.markdown
    }

    #[inline]
    pub fn preview(&self) -> &PreviewLimits {
        &self.preview
    }

    #[inline]
    pub fn display(&self) -> &Display {
        &self.display
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Render options for a pane of `pane_width` columns, or unbounded when `None`.
    pub fn render_options(&self, pane_width: Option<usize>) -> RenderOptions {
        self.markdown.render_options(pane_width)
    }

    /// Determine the default configuration file path.
    /// Checks the MDPANE_CONFIG environment variable first,
    /// then XDG_CONFIG_HOME,
    /// then defaults to ~/.config/mdpane/mdpane.toml.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("MDPANE_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("mdpane/mdpane.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/mdpane/mdpane.toml");
        }
        PathBuf::from("mdpane.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path, minimal: bool) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = if minimal { MINIMAL_TOML } else { FULL_TOML };
        fs::write(path, content)?;
        println!(
            "{} default config generated at {:?}",
            if minimal { "Minimal" } else { "Full" },
            path
        );
        Ok(())
    }
}

const FULL_TOML: &str = r##"# mdpane.toml - default configuration for mdpane

# Note:
# Commented values are the internal defaults of mdpane
# Use hex codes (eg. "#RRGGBB") or terminal colors ("cyan")

[markdown]
# enabled = true
# Maximum table width in columns. 0 = pane width in the pager, unlimited in --print
# table_max_width = 0
# Maximum lines per table cell. 0 = unlimited
# table_max_lines_per_cell = 0
# ellipsis = "…"
# Files larger than this are shown as plain text
# max_format_size = 1048576
# extensions = ["md", "markdown", "mdown", "mkd"]

[preview]
# Files larger than this are not previewed
# max_size = 10485760
# max_lines = 5000

[display]
# border_shape = "square"    # "square", "rounded", "double" or "thick"
# titles = true
# status_line = true

[theme]
name = "default"

# [theme.plain]
# fg = "default"
# bg = "default"

# [theme.heading]
# fg = "magenta"

# [theme.emphasis]
# fg = "default"

# [theme.strong]
# fg = "default"

# [theme.strike]
# fg = "darkgray"

# [theme.code]
# fg = "yellow"

# [theme.link]
# fg = "blue"

# [theme.rule]
# fg = "darkgray"

# [theme.border]
# fg = "darkgray"

# [theme.title]
# fg = "magenta"

# [theme.status_line]
# fg = "default"
# bg = "default"
"##;

const MINIMAL_TOML: &str = r##"# mdpane.toml - minimal configuration
# Only a few basic options. The rest uses internal defaults.
# For all options, see mdp --config-help.

[markdown]
table_max_lines_per_cell = 4

[display]
border_shape = "rounded"

[theme]
name = "default"
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn generated_configs_parse() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        for minimal in [true, false] {
            let path = dir.path().join(format!("nested/{minimal}/mdpane.toml"));
            Config::generate_default(&path, minimal)?;
            let content = fs::read_to_string(&path)?;
            Config::from_toml(&content)?;
        }
        Ok(())
    }

    #[test]
    fn generate_refuses_to_overwrite() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("mdpane.toml");
        fs::write(&path, "# mine")?;

        let err = Config::generate_default(&path, true).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read_to_string(&path)?, "# mine");
        Ok(())
    }

    #[test]
    fn invalid_values_fail_to_parse() {
        assert!(Config::from_toml("[markdown]\ntable_max_width = \"wide\"").is_err());
        assert!(Config::from_toml("").is_ok());
    }
}
