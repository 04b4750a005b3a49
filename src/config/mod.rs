//! Configuration module for Firecrawl Explorer
//!
//! This module handles loading, saving, and validating TOML configuration
//! files. Every section is optional; missing values fall back to defaults.
//!
//! # Example
//!
//! ```no_run
//! use firecrawl_explorer::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("explorer.toml")).unwrap();
//! println!("Exports are stored under {}", config.archive.root.display());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ApiConfig, ArchiveConfig, Config, PollingConfig, DEFAULT_API_URL};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, save_config};
pub use validation::{validate, validate_base_url};
