//! Configuration module for Robots-Lens
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A configuration file is optional; [`Config::default`] is valid on its own.
//!
//! # Example
//!
//! ```no_run
//! use robots_lens::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("robots-lens.toml")).unwrap();
//! println!("Batch limit: {}", config.batch.max_evaluations);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BatchConfig, CompareConfig, Config, FetcherConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
