//! Preview pipeline tests for mdpane
//!
//! These tests cover the path from a file on disk to rendered lines: config
//! parsing, size-capped loading, formatter selection and the pager state.
//!
//! Temporary files are created with tempfile and cleaned up automatically.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mdpane::app::{KeypressResult, Pager};
use mdpane::config::{BorderShape, Config};
use mdpane::core::{self, Formatters, PreviewContext, PreviewError, load_preview};
use mdpane::markdown::StyleTag;
use std::error;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_ui_sanitization_and_exact_width() {
    let pane_width = 10;

    let cases = vec![
        ("short.txt", 10),
        ("very_long_filename.txt", 10),
        ("🦀_crab.rs", 10),
        ("\t_tab", 10),
    ];

    for (input, expected_width) in cases {
        let result = core::sanitize_to_exact_width(input, pane_width);

        let actual_width = unicode_width::UnicodeWidthStr::width(result.as_str());

        assert_eq!(
            actual_width, expected_width,
            "Failed to produce exact width for input: '{}'. Result was: '{}' (width: {})",
            input, result, actual_width
        );

        assert!(
            !result.chars().any(|c| c.is_control() && c != ' '),
            "Result contains control characters: {:?}",
            result
        );
    }
}

#[test]
fn test_config_from_toml() -> Result<(), Box<dyn error::Error>> {
    let config = Config::from_toml(
        r##"
        [markdown]
        table_max_width = 60
        table_max_lines_per_cell = 2
        ellipsis = "..."
        extensions = ["md", "txt"]

        [preview]
        max_lines = 1

        [display]
        border_shape = "rounded"
        status_line = false

        [theme]
        name = "gruvbox-dark"
        [theme.link]
        fg = "#00ff00"
        "##,
    )?;

    let narrow = config.render_options(Some(40));
    assert_eq!(narrow.table_max_width, 40);
    assert_eq!(narrow.table_max_lines_per_cell, 2);
    assert_eq!(narrow.ellipsis, "...");
    assert_eq!(config.render_options(Some(100)).table_max_width, 60);

    assert!(config.markdown().handles_extension("TXT"));
    assert_eq!(config.preview().max_lines(), 3);
    assert_eq!(config.display().border_shape(), &BorderShape::Rounded);
    assert!(!config.display().status_line());
    assert_eq!(config.theme().name(), Some("gruvbox-dark"));
    assert_eq!(
        config.theme().style_for(StyleTag::Link).fg,
        Some(ratatui::style::Color::Rgb(0, 255, 0))
    );
    Ok(())
}

#[test]
fn test_markdown_file_end_to_end() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("README.md");
    fs::write(
        &path,
        "# Project\r\n\r\n| A | B |\r\n| --- | --- |\r\n| 1 | 2 |\r\n",
    )?;

    let config = Config::default();
    let file = load_preview(&path, config.preview())?;
    let render = config.render_options(Some(80));
    let output = Formatters::default().format(&PreviewContext {
        file: &file,
        markdown: config.markdown(),
        render: &render,
    });

    assert!(output.is_markdown());
    assert_eq!(
        output.rendered().plain_lines(),
        vec![
            "# Project",
            "",
            "┌───┬───┐",
            "│ A │ B │",
            "├───┼───┤",
            "│ 1 │ 2 │",
            "└───┴───┘",
        ]
    );
    Ok(())
}

#[test]
fn test_truncated_markdown_is_not_parsed() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("cut.md");
    fs::write(&path, "```\ncode\nmore\n```\n# after\n")?;

    let config = Config::from_toml("[preview]\nmax_lines = 3")?;
    let file = load_preview(&path, config.preview())?;
    assert!(file.truncated);

    let render = config.render_options(None);
    let output = Formatters::default().format(&PreviewContext {
        file: &file,
        markdown: config.markdown(),
        render: &render,
    });
    assert!(!output.is_markdown());
    assert_eq!(output.rendered().plain_lines(), vec!["```", "code", "more"]);
    Ok(())
}

#[test]
fn test_text_files_are_sanitized() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("notes.txt");
    fs::write(&path, "a\tb\u{1b}[31m\n**not markdown**\n")?;

    let config = Config::default();
    let file = load_preview(&path, config.preview())?;
    let render = config.render_options(None);
    let output = Formatters::default().format(&PreviewContext {
        file: &file,
        markdown: config.markdown(),
        render: &render,
    });

    assert!(!output.is_markdown());
    assert_eq!(
        output.rendered().plain_lines(),
        vec!["a   b[31m", "**not markdown**"]
    );
    Ok(())
}

#[test]
fn test_too_large_files_are_refused() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("big.md");
    fs::write(&path, "x".repeat(4096))?;

    let config = Config::from_toml("[preview]\nmax_size = 1024")?;
    match load_preview(&path, config.preview()) {
        Err(e @ PreviewError::TooLarge { .. }) => {
            assert_eq!(e.notice(), "[File too large for preview]")
        }
        other => panic!("expected TooLarge, got {other:?}"),
    }

    let pager = Pager::open(&config, &path, &Formatters::default());
    assert_eq!(
        pager.output().rendered().plain_lines(),
        vec!["[File too large for preview]"]
    );
    Ok(())
}

#[test]
fn test_pager_scrolls_and_reports_status() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("long.md");
    let body: String = (1..=30).map(|i| format!("- item {i}\n")).collect();
    fs::write(&path, body)?;

    let config = Config::default();
    let mut pager = Pager::open(&config, &path, &Formatters::default());
    assert!(pager.resize(40, 10));
    assert_eq!(pager.line_count(), 30);

    let page_down = KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE);
    assert_eq!(pager.handle_keypress(page_down), KeypressResult::Consumed);
    assert_eq!(pager.scroll(), 10);
    assert!(pager.status_text().starts_with("long.md 11/30 @"));

    let end = KeyEvent::new(KeyCode::End, KeyModifiers::NONE);
    pager.handle_keypress(end);
    assert_eq!(pager.scroll(), 20);

    // growing the pane clamps the scroll position
    pager.resize(40, 25);
    assert_eq!(pager.scroll(), 5);
    Ok(())
}
