//! Utilities for working with standard output.

pub mod style;
