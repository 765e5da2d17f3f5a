//! Preset themes for mdpane
//!
//! Each preset is built from a color palette by [make_theme]. Select one with
//! `name = "..."` in the `[theme]` section.

use crate::config::Theme;
use crate::config::theme::{Palette, make_theme};

const TOKYO_NIGHT: Palette = Palette {
    base: (26, 27, 38),
    surface: (44, 51, 78),
    overlay: (86, 95, 137),
    primary: (187, 154, 247),
    secondary: (125, 207, 255),
    code: (158, 206, 106),
};

const TOKYO_DAY: Palette = Palette {
    base: (225, 226, 231),
    surface: (196, 199, 209),
    overlay: (168, 175, 199),
    primary: (152, 94, 171),
    secondary: (52, 90, 183),
    code: (88, 117, 57),
};

const GRUV_DARK: Palette = Palette {
    base: (40, 40, 40),
    surface: (60, 56, 54),
    overlay: (146, 131, 116),
    primary: (250, 189, 47),
    secondary: (131, 165, 152),
    code: (184, 187, 38),
};

const GRUV_LIGHT: Palette = Palette {
    base: (251, 241, 199),
    surface: (213, 196, 161),
    overlay: (124, 111, 100),
    primary: (181, 118, 20),
    secondary: (7, 102, 120),
    code: (121, 116, 14),
};

const MOCHA: Palette = Palette {
    base: (30, 30, 46),
    surface: (49, 50, 68),
    overlay: (108, 112, 134),
    primary: (203, 166, 247),
    secondary: (137, 180, 250),
    code: (166, 227, 161),
};

const LATTE: Palette = Palette {
    base: (239, 241, 245),
    surface: (204, 208, 218),
    overlay: (156, 160, 176),
    primary: (136, 57, 239),
    secondary: (30, 102, 245),
    code: (64, 160, 43),
};

const NORD: Palette = Palette {
    base: (46, 52, 64),
    surface: (67, 76, 94),
    overlay: (97, 110, 136),
    primary: (136, 192, 208),
    secondary: (129, 161, 193),
    code: (163, 190, 140),
};

const ONE_DARK: Palette = Palette {
    base: (40, 44, 52),
    surface: (56, 60, 69),
    overlay: (97, 102, 117),
    primary: (198, 120, 221),
    secondary: (97, 175, 239),
    code: (152, 195, 121),
};

const SOLARIZED_DARK: Palette = Palette {
    base: (0, 43, 54),
    surface: (7, 54, 66),
    overlay: (101, 123, 131),
    primary: (181, 137, 0),
    secondary: (38, 139, 210),
    code: (42, 161, 152),
};

const SOLARIZED_LIGHT: Palette = Palette {
    base: (253, 246, 227),
    surface: (238, 232, 213),
    overlay: (147, 161, 161),
    primary: (181, 137, 0),
    secondary: (38, 139, 210),
    code: (42, 161, 152),
};

const DRACULA: Palette = Palette {
    base: (40, 42, 54),
    surface: (68, 71, 90),
    overlay: (98, 114, 164),
    primary: (255, 121, 198),
    secondary: (139, 233, 253),
    code: (80, 250, 123),
};

const ROSE_PINE: Palette = Palette {
    base: (25, 23, 36),
    surface: (31, 29, 46),
    overlay: (110, 106, 134),
    primary: (196, 167, 231),
    secondary: (156, 207, 216),
    code: (246, 193, 119),
};

/// Looks up a preset theme by name.
pub(crate) fn preset(name: &str) -> Option<Theme> {
    let palette = match name {
        "tokyonight" | "tokyonight-night" => TOKYO_NIGHT,
        "tokyonight-day" => TOKYO_DAY,
        "gruvbox-dark" | "gruvbox" => GRUV_DARK,
        "gruvbox-light" => GRUV_LIGHT,
        "catppuccin-mocha" | "catppuccin" => MOCHA,
        "catppuccin-latte" => LATTE,
        "nord" => NORD,
        "one-dark" => ONE_DARK,
        "solarized-dark" => SOLARIZED_DARK,
        "solarized-light" => SOLARIZED_LIGHT,
        "dracula" => DRACULA,
        "rose-pine" | "rose_pine" => ROSE_PINE,
        _ => return None,
    };
    Some(make_theme(name, palette))
}
