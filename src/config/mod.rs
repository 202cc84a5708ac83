//! Configuration module for Rank-Lens
//!
//! Loads, parses and validates the optional TOML configuration file. All
//! keys have defaults, so an empty file (or no file) is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use rank_lens::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("rank-lens.toml")).unwrap();
//! println!("Chunk size: {}", config.batch.max_concurrent);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    BatchConfig, Config, FetchConfig, RetryConfig, DEFAULT_ACCEPT, DEFAULT_ACCEPT_LANGUAGE,
    DEFAULT_USER_AGENT,
};

pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
