//! main.rs
//! Entry point for mdp

use mdpane::app::Pager;
use mdpane::config::Config;
use mdpane::core::{Formatters, PreviewContext, PreviewOutput, load_preview, terminal};
use mdpane::ui;
use mdpane::utils::cli::{CliAction, handle_args};
use mdpane::utils::shorten_home_path;

use std::io;
use std::path::Path;

fn main() -> io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[mdp] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let action = handle_args();
    if let CliAction::Exit = action {
        return Ok(());
    }

    let config = Config::load();
    let formatters = Formatters::default();

    match action {
        CliAction::Pager(path) => {
            if !path.exists() {
                eprintln!(
                    "\n[mdp] Error: Path '{}' cannot be opened.",
                    shorten_home_path(&path)
                );
                std::process::exit(1);
            }
            let mut pager = Pager::open(&config, &path, &formatters);
            terminal::run_terminal(&mut pager)
        }
        CliAction::Print { path, plain, width } => {
            print_preview(&config, &formatters, &path, plain, width)
        }
        CliAction::Exit => Ok(()),
    }
}

/// Renders `path` once and writes it to stdout. Load failures print the notice
/// and exit with status 1.
fn print_preview(
    config: &Config,
    formatters: &Formatters,
    path: &Path,
    plain: bool,
    width: Option<usize>,
) -> io::Result<()> {
    let file = match load_preview(path, config.preview()) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("[mdp] {}: {}", shorten_home_path(path), e.notice());
            std::process::exit(1);
        }
    };

    // --width replaces the configured table width; 0 still means unlimited
    let render = match width {
        Some(w) => config.render_options(None).for_width(w),
        None => config.render_options(None),
    };
    let output: PreviewOutput = formatters.format(&PreviewContext {
        file: &file,
        markdown: config.markdown(),
        render: &render,
    });

    let lines = &output.rendered().lines;
    let mut stdout = io::stdout().lock();
    if plain {
        ui::write_plain(&mut stdout, lines)
    } else {
        ui::write_styled(&mut stdout, lines, config.theme())
    }
}
