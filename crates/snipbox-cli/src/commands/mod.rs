//! CLI command implementations

pub mod completions;
pub mod config;
pub mod search;
pub mod serve;
pub mod snippet;
