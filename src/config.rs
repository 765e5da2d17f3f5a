//! Configuration for mdpane, read from `mdpane.toml`.
//!
//! - [load]: the [Config] struct, file lookup and `--init` generation
//! - [markdown]: markdown rendering options (`[markdown]`)
//! - [preview]: file loading limits (`[preview]`)
//! - [display]: pager pane options (`[display]`)
//! - [theme] and [presets]: colors per style (`[theme]`)
//!
//! Every section is optional; missing keys fall back to internal defaults.

pub mod display;
pub mod load;
pub mod markdown;
pub mod presets;
pub mod preview;
pub mod theme;

pub use display::{BorderShape, Display};
pub use load::{Config, RawConfig};
pub use markdown::MarkdownOptions;
pub use preview::PreviewLimits;
pub use theme::{ColorPair, Theme};
