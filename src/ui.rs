//! Terminal UI for mdp.
//!
//! - [preview]: conversion of [StyledLine](crate::markdown::StyledLine)s into ratatui lines
//! - [render]: the per-frame entry point drawing the preview pane and status line
//! - [print]: styled or plain output to stdout for non-interactive use

pub mod preview;
pub mod print;
pub mod render;

pub use preview::{styled_line, visible_lines};
pub use print::{write_plain, write_styled};
pub use render::render;
