//! CLI command implementations.

pub mod query;
pub mod show;
pub mod stats;
