//! Miscellaneous utility functions for mdpane.
//!
//! - [cli]: command-line argument parsing and help output
//! - [helpers]: color parsing and home directory handling

pub mod cli;
pub mod helpers;

pub use helpers::{get_home, parse_color, shorten_home_path};
