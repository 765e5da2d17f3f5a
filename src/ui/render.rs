//! UI renderer implementation.
//!
//! Contains the top-level `render` entry point used by the terminal loop: the
//! bordered preview pane on top and an optional status line below it.
//!
//! Rendering reads pager state and config; the only mutation is reporting the
//! pane size back to the [Pager] so it can re-flow before lines are drawn.

use crate::app::Pager;
use crate::core::sanitize_to_exact_width;
use crate::ui::preview::{base_style, visible_lines};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Renders the whole pager UI for one frame.
pub fn render(frame: &mut Frame, pager: &mut Pager) {
    let (pane_area, status_area) = layout_chunks(frame.area(), pager);

    let block = pane_block(pager);
    let inner = block.inner(pane_area);
    pager.resize(inner.width as usize, inner.height as usize);

    let theme = pager.config().theme();
    let lines = visible_lines(
        &pager.output().rendered().lines,
        pager.scroll(),
        inner.height as usize,
        theme,
    );

    frame.render_widget(
        Paragraph::new(lines).style(base_style(theme)).block(block),
        pane_area,
    );

    if let Some(area) = status_area {
        draw_status_line(frame, pager, area);
    }
}

/// Splits the screen into the preview pane and, if enabled, a one-row status line.
fn layout_chunks(area: Rect, pager: &Pager) -> (Rect, Option<Rect>) {
    if !pager.config().display().status_line() || area.height < 2 {
        return (area, None);
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    (chunks[0], Some(chunks[1]))
}

fn pane_block(pager: &Pager) -> Block<'static> {
    let cfg = pager.config();
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(cfg.display().border_shape().as_border_type())
        .border_style(cfg.theme().border_style());
    if cfg.display().titles() {
        block = block.title(Span::styled(
            format!(" {} ", pager.title()),
            cfg.theme().title_style(),
        ));
    }
    block
}

fn draw_status_line(frame: &mut Frame, pager: &Pager, area: Rect) {
    let text = sanitize_to_exact_width(&pager.status_text(), area.width as usize);
    let style = pager.config().theme().status_line_style();
    frame.render_widget(Paragraph::new(Line::from(Span::styled(text, style))), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::PreviewOutput;
    use crate::markdown::MarkdownPreview;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn draws_pane_and_status_line() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let lines = ["# Title", "", "body"];
        let preview = MarkdownPreview::new(&lines, &config.render_options(None));
        let mut pager = Pager::new(&config, "doc.md", PreviewOutput::Markdown(preview));

        let mut terminal = Terminal::new(TestBackend::new(30, 6))?;
        terminal.draw(|f| render(f, &mut pager))?;

        assert!(row(&terminal, 0).contains(" doc.md "));
        assert!(row(&terminal, 1).starts_with("│# Title"));
        assert!(row(&terminal, 3).starts_with("│body"));
        assert!(row(&terminal, 5).starts_with("doc.md 1/3 @0"));
        assert_eq!(pager.viewport().width, 28);
        assert_eq!(pager.viewport().height, 3);
        Ok(())
    }

    #[test]
    fn narrow_terminals_reflow_tables() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let lines = ["| a | b |", "| - | - |", "| some long cell | other long cell |"];
        let preview = MarkdownPreview::new(&lines, &config.render_options(None));
        let mut pager = Pager::new(&config, "t.md", PreviewOutput::Markdown(preview));

        let mut terminal = Terminal::new(TestBackend::new(22, 12))?;
        terminal.draw(|f| render(f, &mut pager))?;

        assert!(
            pager
                .output()
                .rendered()
                .lines
                .iter()
                .all(|l| l.width() <= 20)
        );
        Ok(())
    }
}
