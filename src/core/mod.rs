//! Cross-cutting infrastructure: configuration and terminal output.

pub mod config;
pub mod output;
