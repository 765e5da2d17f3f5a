//! Pager state for a single previewed file.
//!
//! Holds the formatted [PreviewOutput], the scroll position and the current
//! viewport. Resizing re-flows markdown at the new pane width from the cached
//! document; nothing is re-read or re-parsed.

use crate::app::keymap::{Action, Keymap};
use crate::config::Config;
use crate::core::{Formatters, PreviewContext, PreviewOutput, load_preview};

use crossterm::event::KeyEvent;
use std::path::Path;

/// Result of a processed keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypressResult {
    /// Not bound to anything.
    Continue,
    /// Handled; the view may have changed.
    Consumed,
    Quit,
}

/// Inner size of the preview pane in cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

pub struct Pager<'a> {
    config: &'a Config,
    keymap: Keymap,
    title: String,
    output: PreviewOutput,
    truncated: bool,
    scroll: usize,
    viewport: Viewport,
}

impl<'a> Pager<'a> {
    /// A pager over already formatted output.
    pub fn new(config: &'a Config, title: impl Into<String>, output: PreviewOutput) -> Self {
        Self {
            config,
            keymap: Keymap::new(),
            title: title.into(),
            output,
            truncated: false,
            scroll: 0,
            viewport: Viewport::default(),
        }
    }

    /// Loads and formats `path`. Load failures become a notice in the pane.
    pub fn open(config: &'a Config, path: &Path, formatters: &Formatters) -> Self {
        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match load_preview(path, config.preview()) {
            Ok(file) => {
                let render = config.render_options(None);
                let output = formatters.format(&PreviewContext {
                    file: &file,
                    markdown: config.markdown(),
                    render: &render,
                });
                let mut pager = Self::new(config, file.file_name(), output);
                pager.truncated = file.truncated;
                pager
            }
            Err(e) => {
                log::debug!("preview of {} refused: {e:?}", path.display());
                Self::new(config, title, PreviewOutput::notice(&e.notice()))
            }
        }
    }

    // Getters/ accessors

    #[inline]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn output(&self) -> &PreviewOutput {
        &self.output
    }

    #[inline]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn line_count(&self) -> usize {
        self.output.rendered().len()
    }

    /// Highest useful scroll offset: the last page starts here.
    pub fn max_scroll(&self) -> usize {
        self.line_count()
            .saturating_sub(self.viewport.height.max(1))
    }

    /// Updates the viewport. A width change re-flows markdown tables.
    ///
    /// Returns true if anything changed.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        let next = Viewport { width, height };
        if next == self.viewport {
            return false;
        }

        if next.width != self.viewport.width && self.output.is_markdown() {
            self.output
                .reflow(&self.config.render_options(Some(width)));
            log::trace!("re-flowed preview at width {width}");
        }

        self.viewport = next;
        self.scroll = self.scroll.min(self.max_scroll());
        true
    }

    pub fn handle_keypress(&mut self, key: KeyEvent) -> KeypressResult {
        match self.keymap.lookup(key) {
            Some(action) => self.apply(action),
            None => KeypressResult::Continue,
        }
    }

    pub fn apply(&mut self, action: Action) -> KeypressResult {
        let page = self.viewport.height.max(1);
        match action {
            Action::ScrollUp => self.scroll_by(-1),
            Action::ScrollDown => self.scroll_by(1),
            Action::HalfPageUp => self.scroll_by(-((page / 2).max(1) as isize)),
            Action::HalfPageDown => self.scroll_by((page / 2).max(1) as isize),
            Action::PageUp => self.scroll_by(-(page as isize)),
            Action::PageDown => self.scroll_by(page as isize),
            Action::Top => self.scroll = 0,
            Action::Bottom => self.scroll = self.max_scroll(),
            Action::Quit => return KeypressResult::Quit,
        }
        KeypressResult::Consumed
    }

    fn scroll_by(&mut self, delta: isize) {
        self.scroll = self
            .scroll
            .saturating_add_signed(delta)
            .min(self.max_scroll());
    }

    fn top_byte_offset(&self) -> Option<usize> {
        self.output
            .rendered()
            .metrics
            .get(self.scroll)
            .map(|m| m.byte_offset)
    }

    /// Position text for the status line: top line, total lines and the byte
    /// offset of the top line in the rendered text.
    pub fn status_text(&self) -> String {
        let total = self.line_count();
        let top = if total == 0 { 0 } else { self.scroll + 1 };
        let byte = self.top_byte_offset().unwrap_or(0);
        let mut status = format!("{} {top}/{total} @{byte}", self.title);
        if self.truncated {
            status.push_str(" [truncated]");
        }
        status
    }
}
