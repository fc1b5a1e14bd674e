//! Common utilities for building and using voyager's tools.

#![warn(missing_docs, unused_crate_dependencies)]

#[macro_use]
pub mod shell;

pub mod constants;
pub mod errors;
pub mod fmt;
pub mod io;
pub mod serde_helpers;

pub use constants::*;
