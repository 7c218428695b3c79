//! CLI command implementations

pub mod blocks;
pub mod browse;
pub mod config;
pub mod error;
pub mod facets;
pub mod output;
pub mod selection;
