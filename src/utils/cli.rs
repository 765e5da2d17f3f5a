//! Command-line argument parsing and help for mdp.
//!
//! `mdp PATH` opens the pager. `--print`/`--plain` write the rendered preview to
//! stdout instead; the remaining flags print help or generate a config file.

use crate::config::Config;

use std::path::PathBuf;

/// What the binary should do after argument handling.
#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    /// Open `path` in the full-screen pager.
    Pager(PathBuf),
    /// Write the rendered preview of `path` to stdout.
    Print {
        path: PathBuf,
        plain: bool,
        width: Option<usize>,
    },
    Exit,
}

/// Parsed command line, before any side effects.
#[derive(Debug, PartialEq, Eq)]
pub enum CliCommand {
    Run(CliAction),
    Help,
    Version,
    ConfigHelp,
    Keybinds,
    Init { minimal: bool },
    Invalid(String),
}

/// Reads the process arguments and handles help/init flags.
pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match parse_args(&args) {
        CliCommand::Run(action) => action,
        CliCommand::Help => {
            print_help();
            CliAction::Exit
        }
        CliCommand::Version => {
            print_version();
            CliAction::Exit
        }
        CliCommand::ConfigHelp => {
            print_config_help();
            CliAction::Exit
        }
        CliCommand::Keybinds => {
            println!("{KEYBINDS_TEXT}");
            CliAction::Exit
        }
        CliCommand::Init { minimal } => {
            if let Err(e) = Config::generate_default(&Config::default_path(), minimal) {
                eprintln!("[mdp] Error: {}", e);
            }
            CliAction::Exit
        }
        CliCommand::Invalid(msg) => {
            eprintln!("[mdp] Error: {}", msg);
            eprintln!("Usage: mdp [--print | --plain] [--width N] PATH");
            eprintln!("Try --help for available options");
            CliAction::Exit
        }
    }
}

/// Parses arguments (without the program name).
///
/// Informational flags win as soon as they are seen; otherwise exactly one path
/// is required.
pub fn parse_args(args: &[String]) -> CliCommand {
    let mut path: Option<PathBuf> = None;
    let mut print = false;
    let mut plain = false;
    let mut width: Option<usize> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return CliCommand::Help,
            "-v" | "--version" => return CliCommand::Version,
            "--config-help" => return CliCommand::ConfigHelp,
            "--keybinds" | "--keys" => return CliCommand::Keybinds,
            "--init" => return CliCommand::Init { minimal: true },
            "--init-full" => return CliCommand::Init { minimal: false },
            "-p" | "--print" => print = true,
            "--plain" => {
                print = true;
                plain = true;
            }
            "-w" | "--width" => {
                let Some(value) = iter.next() else {
                    return CliCommand::Invalid("--width needs a value".to_string());
                };
                match value.parse::<usize>() {
                    Ok(w) => width = Some(w),
                    Err(_) => {
                        return CliCommand::Invalid(format!("invalid width: {value}"));
                    }
                }
            }
            arg if arg.starts_with('-') && arg.len() > 1 => {
                return CliCommand::Invalid(format!("unknown argument: {arg}"));
            }
            arg if arg.trim().is_empty() => {
                return CliCommand::Invalid("empty path".to_string());
            }
            arg => {
                if path.is_some() {
                    return CliCommand::Invalid("mdp previews one file at a time".to_string());
                }
                path = Some(PathBuf::from(arg));
            }
        }
    }

    let Some(path) = path else {
        return CliCommand::Invalid("no file given".to_string());
    };

    if print {
        CliCommand::Run(CliAction::Print { path, plain, width })
    } else {
        if width.is_some() {
            log::debug!("--width only applies to --print, the pager uses the pane width");
        }
        CliCommand::Run(CliAction::Pager(path))
    }
}

fn print_version() {
    println!("mdp {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"mdp - markdown preview pane for the terminal

USAGE:
  mdp [OPTIONS] PATH

PATH:
  File to preview. Markdown files are rendered, anything else is shown as text.

OPTIONS:
  -p, --print             Write the styled preview to stdout instead of opening the pager
      --plain             Write the preview to stdout without styles
  -w, --width N           Maximum table width for --print / --plain (0 = unlimited)
      --init              Generate a minimal default configuration
      --init-full         Generate the full configuration with all options
      --config-help       Display all the configuration options
      --keybinds          Display the pager key bindings
  -h, --help              Print help information
  -v, --version           Display the current installed version of mdp

ENVIRONMENT:
  MDPANE_CONFIG           Override the default config path
  RUST_LOG                Log filter, e.g. RUST_LOG=mdpane=debug
"#
    );
}

const KEYBINDS_TEXT: &str = r##"
=========================
 Key Bindings
=========================
  scroll down               j, down, enter
  scroll up                 k, up
  half page down            ctrl+d
  half page up              ctrl+u
  page down                 space, pgdn
  page up                   b, pgup
  top                       g, home
  bottom                    G, end
  quit                      q, esc, ctrl+c
"##;

fn print_config_help() {
    let help_text = r##"
mdp - Full Configuration Guide (mdpane.toml)

=========================
 Markdown
=========================
[markdown]
  enabled                    Render markdown files [default: true]
  table_max_width            Maximum table width in columns (0 = pane width, unlimited in --print)
  table_max_lines_per_cell   Maximum lines per table cell, extra lines end in the ellipsis (0 = unlimited)
  ellipsis                   Marker for truncated cells [default: "…"]
  max_format_size            Larger files are shown as plain text (bytes) [default: 1048576]
  extensions                 File extensions rendered as markdown [default: ["md", "markdown", "mdown", "mkd"]]

=========================
 Preview
=========================
[preview]
  max_size                   Larger files are not previewed (bytes) [default: 10485760]
  max_lines                  Lines read from a file (min: 3) [default: 5000]

=========================
 Display Settings
=========================
[display]
  border_shape               "square", "rounded", "double" or "thick"
  titles                     Show the file name in the pane title
  status_line                Show the position line under the pane

=========================
 Theme Configuration
=========================
[theme]
  name                       Preset name, e.g. "gruvbox-dark", "nord", "tokyonight", "dracula"

Each sub-table supports fg/bg colors ("Red", "Blue", hex "#RRGGBB", or "default"):

[theme.plain]                Body text
[theme.emphasis]             *emphasis* (always italic)
[theme.strong]               **strong** text and table headers (always bold)
[theme.strike]               ~~strikethrough~~ (always crossed out)
[theme.code]                 Code spans and code blocks
[theme.link]                 Links and images (always underlined)
[theme.heading]              Headings (always bold)
[theme.rule]                 Rules, table borders, quote bars and notices
[theme.border]               Pane border
[theme.title]                Pane title
[theme.status_line]          Status line under the pane
"##;

    println!("{}", help_text);
}
