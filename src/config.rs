//! Configuration for lister.
//!
//! Settings are read from `lister.toml` (see [Config::default_path]) into a
//! [load::RawConfig] and converted into the [Config] used at runtime.
//! Command-line flags are applied on top afterwards.

pub mod general;
pub mod load;

pub use general::{ColorMode, General, InternalGeneral};
pub use load::{Config, RawConfig};
