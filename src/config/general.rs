//! The general configuration settings for lister.
//!
//! This module defines the [General] struct for deserializing the `[general]`
//! table of lister.toml and the [InternalGeneral] struct used at runtime,
//! where the color mode is already resolved against the terminal.

use crate::utils::stdout_is_tty;

use serde::Deserialize;

/// When to decorate names with colors.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Only when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(ColorMode::Auto),
            "always" | "yes" | "force" => Some(ColorMode::Always),
            "never" | "no" | "none" => Some(ColorMode::Never),
            _ => None,
        }
    }

    /// Resolves the mode into an on/off switch.
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => stdout_is_tty(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct General {
    show_hidden: bool,
    sort: bool,
    color: ColorMode,
    numeric_ids: bool,
    human_sizes: bool,
}

impl Default for General {
    fn default() -> Self {
        General {
            show_hidden: false,
            sort: false,
            color: ColorMode::Auto,
            numeric_ids: false,
            human_sizes: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalGeneral {
    show_hidden: bool,
    sort: bool,
    color: ColorMode,
    numeric_ids: bool,
    human_sizes: bool,
}

impl From<General> for InternalGeneral {
    fn from(g: General) -> Self {
        Self {
            show_hidden: g.show_hidden,
            sort: g.sort,
            color: g.color,
            numeric_ids: g.numeric_ids,
            human_sizes: g.human_sizes,
        }
    }
}

impl InternalGeneral {
    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    #[inline]
    pub fn sort(&self) -> bool {
        self.sort
    }

    #[inline]
    pub fn color(&self) -> ColorMode {
        self.color
    }

    #[inline]
    pub fn numeric_ids(&self) -> bool {
        self.numeric_ids
    }

    #[inline]
    pub fn human_sizes(&self) -> bool {
        self.human_sizes
    }

    // Setters used when command-line flags override the file

    pub fn set_show_hidden(&mut self, on: bool) {
        self.show_hidden = on;
    }

    pub fn set_sort(&mut self, on: bool) {
        self.sort = on;
    }

    pub fn set_color(&mut self, color: ColorMode) {
        self.color = color;
    }

    pub fn set_human_sizes(&mut self, on: bool) {
        self.human_sizes = on;
    }
}
