//! The main config loading module for lister.
//!
//! Handles loading and deserializing settings from `lister.toml`.
//!
//! Provides the [Config] struct, the internal [RawConfig] used for parsing, and
//! default config generation for `lst --init`.

use crate::config::{General, InternalGeneral};
use crate::core::Formatter;
use crate::error::{CoreError, CoreResult};
use crate::utils::get_home;

use serde::Deserialize;
use std::{fs, io, path::Path, path::PathBuf};

const DEFAULT_TOML: &str = r##"# lister.toml - configuration for lst
#
# Commented values are the internal defaults.

[general]
# List entries starting with '.' in detailed (-l) mode as well.
# show_hidden = false

# Sort entries by name. Off keeps the order the filesystem returns them in.
# sort = false

# "auto" colors names only when writing to a terminal.
# color = "auto"          # "auto", "always" or "never"

# Print the numeric uid/gid when no account name can be found.
# Off leaves the owner/group column out for such entries.
# numeric_ids = false

# Show sizes as 1.2 kB, 3.4 MB, ... instead of bytes.
# human_sizes = false
"##;

/// Raw configuration as read from the toml file.
/// Converted into the main [Config] struct after parsing.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
}

/// Main configuration struct for lister.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    general: InternalGeneral,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: InternalGeneral::from(raw.general),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// A missing file yields the defaults quietly. An unreadable or invalid
    /// file is reported and also yields the defaults.
    pub fn load() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("{}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load configuration from `path`.
    pub fn load_from(path: &Path) -> CoreResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> CoreResult<Self> {
        toml::from_str::<RawConfig>(content)
            .map(Config::from)
            .map_err(|e| CoreError::ConfigParse(e.message().to_string()))
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &InternalGeneral {
        &self.general
    }

    #[inline]
    pub fn general_mut(&mut self) -> &mut InternalGeneral {
        &mut self.general
    }

    /// Builds the [Formatter] described by this configuration.
    pub fn formatter(&self) -> Formatter {
        let g = &self.general;
        Formatter::new(
            g.show_hidden(),
            g.sort(),
            g.color().enabled(),
            g.numeric_ids(),
            g.human_sizes(),
        )
    }

    /// Determine the default configuration file path.
    /// Checks the LISTER_CONFIG environment variable first,
    /// then XDG_CONFIG_HOME,
    /// then defaults to ~/.config/lister/lister.toml.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("LISTER_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("lister/lister.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/lister/lister.toml");
        }
        PathBuf::from("lister.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {}", path.display()),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)
    }
}
