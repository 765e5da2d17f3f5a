//! Display configuration options for the pager
//!
//! This module defines the `[display]` options which are read from the mdpane.toml
//! configuration file.

use ratatui::widgets::BorderType;
use serde::Deserialize;

/// Display configuration options
///
/// Controls the frame drawn around the preview pane and the status line below it.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Display {
    border_shape: BorderShape,
    titles: bool,
    status_line: bool,
}

impl Display {
    pub fn border_shape(&self) -> &BorderShape {
        &self.border_shape
    }

    pub fn titles(&self) -> bool {
        self.titles
    }

    pub fn status_line(&self) -> bool {
        self.status_line
    }
}

impl Default for Display {
    fn default() -> Self {
        Display {
            border_shape: BorderShape::Square,
            titles: true,
            status_line: true,
        }
    }
}

/// Border shape options
/// This enum defines the different border shapes that can be used in the UI
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BorderShape {
    Square,
    Rounded,
    Double,
    Thick,
}

impl BorderShape {
    pub fn as_border_type(&self) -> BorderType {
        match self {
            BorderShape::Square => BorderType::Plain,
            BorderShape::Rounded => BorderType::Rounded,
            BorderShape::Double => BorderType::Double,
            BorderShape::Thick => BorderType::Thick,
        }
    }
}
