//! Airnav CLI library.
//!
//! Data-source resolution and output formatting shared by the `airnav-cli`
//! binary and its tests.

pub mod output;
pub mod source;
