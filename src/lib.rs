//! Sumi-Gateway: HTTP routes for crawler library functions
//!
//! This crate takes the exported functions of a crawler library and serves each
//! one as a `GET /api/<kebab-name>` route. Query-string parameters are bound to
//! the function's declared positional parameters by name, and every result is
//! shaped into a uniform JSON envelope.

pub mod config;
pub mod dispatch;
pub mod exports;
pub mod library;
pub mod naming;
pub mod routes;
pub mod server;

use thiserror::Error;

/// Main error type for Sumi-Gateway startup
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Route synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while turning exported functions into routes
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("Functions {first} and {second} both map to route {path}")]
    DuplicateRoute {
        path: String,
        first: String,
        second: String,
    },

    #[error("Parameters {first} and {second} of {function} both map to URL parameter {url_param}")]
    ParameterCollision {
        function: String,
        url_param: String,
        first: String,
        second: String,
    },

    #[error("Invalid parameter declaration: {0}")]
    Introspect(#[from] IntrospectError),
}

/// Errors raised while reading a declared parameter list
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntrospectError {
    #[error("Signature '{0}' has no parameter list")]
    MissingParens(String),

    #[error("Signature '{0}' contains an empty parameter")]
    EmptyParameter(String),

    #[error("Parameter '{0}' uses unsupported syntax (defaults, destructuring or rest)")]
    UnsupportedSyntax(String),

    #[error("'{0}' is not a valid identifier")]
    InvalidIdentifier(String),

    #[error("Parameter '{0}' is declared more than once")]
    DuplicateParameter(String),
}

/// Errors reported by an exported function when it is invoked
///
/// Only the display message of this error ever reaches an HTTP client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvocationError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Failed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Sumi-Gateway startup
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for exported function calls
pub type InvocationResult<T> = std::result::Result<T, InvocationError>;

// Re-export commonly used types
pub use config::Config;
pub use dispatch::{Envelope, ErrorKind};
pub use exports::{Arguments, CrawlerLibrary, ExportedFunction};
pub use naming::{route_path, url_param};
pub use routes::{synthesize, RouteEntry, RouteTable};
pub use server::build_router;
