//! Internal library crate for mdpane.
//!
//! The shipped application is the `mdp` binary (`src/main.rs`).
//!
//! The [markdown] module is the engine: it parses markdown lines into a document
//! and renders it as styled, width-aware terminal lines. The other modules load
//! files, pick a formatter and drive the pager around it.

pub mod app;
pub mod config;
pub mod core;
pub mod markdown;
pub mod ui;
pub mod utils;
