//! Library crate for lister.
//!
//! The shipped application is the `lst` binary (`src/main.rs`).
//!
//! The library holds the listing engine ([core]) and its configuration so the
//! binary and the integration tests share one implementation.

pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use error::{CoreError, CoreResult, EntryError};
