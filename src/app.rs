//! Application state for the mdp pager.
//!
//! - [pager]: the [Pager] holding the formatted preview, scroll position and viewport
//! - [keymap]: fixed key bindings mapped to pager [Action]s

pub mod keymap;
pub mod pager;

pub use keymap::{Action, Keymap};
pub use pager::{KeypressResult, Pager, Viewport};
