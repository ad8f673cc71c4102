//! Configuration module for Sumi-Gateway
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every section has defaults, so the gateway also runs
//! without a file.
//!
//! # Example
//!
//! ```no_run
//! use sumi_gateway::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("gateway.toml")).unwrap();
//! println!("Gateway will listen on port {}", config.server.port);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetcherConfig, ServerConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
