//! Configuration module for Yard-Scout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use yard_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("yard-scout.toml")).unwrap();
//! println!("Querying {} sources", config.sources.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ExtractorKind, MarkerConfig, OutputConfig, QueryConfig, SourceEntry,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
