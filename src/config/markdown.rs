//! Markdown rendering options, read from the `[markdown]` section.

use crate::markdown::{DEFAULT_ELLIPSIS, RenderOptions};
use serde::Deserialize;

/// Markdown options
/// # Examples
/// ```toml
/// [markdown]
/// table_max_lines_per_cell = 3
/// ellipsis = "..."
/// extensions = ["md", "txt"]
/// ```
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MarkdownOptions {
    enabled: bool,
    table_max_width: usize,
    table_max_lines_per_cell: usize,
    ellipsis: String,
    max_format_size: u64,
    extensions: Vec<String>,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        MarkdownOptions {
            enabled: true,
            table_max_width: 0,
            table_max_lines_per_cell: 0,
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
            max_format_size: 1024 * 1024,
            extensions: ["md", "markdown", "mdown", "mkd"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl MarkdownOptions {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn max_format_size(&self) -> u64 {
        self.max_format_size
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// True if files with this extension are rendered as markdown. Case-insensitive.
    pub fn handles_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Builds [RenderOptions] for a pane.
    ///
    /// A configured `table_max_width` of 0 means "use the pane width"; otherwise the
    /// smaller of the two wins. Without a pane the configured value is used as is.
    pub fn render_options(&self, pane_width: Option<usize>) -> RenderOptions {
        let table_max_width = match (self.table_max_width, pane_width) {
            (0, Some(pane)) => pane,
            (configured, Some(pane)) => configured.min(pane),
            (configured, None) => configured,
        };
        RenderOptions {
            table_max_width,
            table_max_lines_per_cell: self.table_max_lines_per_cell,
            ellipsis: self.ellipsis.clone(),
        }
    }
}
