//! File loading limits, read from the `[preview]` section.

use serde::Deserialize;

/// Minimum number of lines loaded for any preview.
pub const MIN_PREVIEW_LINES: usize = 3;
/// Default maximum file size for previews (10mb).
pub const DEFAULT_MAX_PREVIEW_SIZE: u64 = 10 * 1024 * 1024;
/// Default number of lines loaded from a file.
pub const DEFAULT_MAX_PREVIEW_LINES: usize = 5000;

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(default)]
pub struct PreviewLimits {
    max_size: u64,
    max_lines: usize,
}

impl Default for PreviewLimits {
    fn default() -> Self {
        PreviewLimits {
            max_size: DEFAULT_MAX_PREVIEW_SIZE,
            max_lines: DEFAULT_MAX_PREVIEW_LINES,
        }
    }
}

impl PreviewLimits {
    pub fn new(max_size: u64, max_lines: usize) -> Self {
        Self {
            max_size,
            max_lines,
        }
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Line limit, never below [MIN_PREVIEW_LINES].
    pub fn max_lines(&self) -> usize {
        self.max_lines.max(MIN_PREVIEW_LINES)
    }
}
