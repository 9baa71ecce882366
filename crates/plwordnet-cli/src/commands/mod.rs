//! CLI command implementations

pub mod completions;
pub mod config;
pub mod hierarchy;
pub mod import;
pub mod info;
pub mod query;
pub mod relations;
pub mod search;
