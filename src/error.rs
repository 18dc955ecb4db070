//! Error types for cairn.
//!
//! Failures of the lookup workflow, configuration loading and the HTTP
//! collaborators are represented by [`CairnError`]. The spelling matcher and
//! the etymology reconciler never surface errors: they degrade to absent
//! values instead.
//!
//! # Examples
//!
//! ```
//! use cairn::error::{CairnError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(CairnError::invalid_argument("no word provided"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for cairn operations.
#[derive(Error, Debug)]
pub enum CairnError {
    /// I/O errors (history file, config file, word list file)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// HTTP transport errors from one of the remote sources
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A remote source answered with an unexpected status
    #[error("{source_name} returned {status}")]
    Status {
        source_name: &'static str,
        status: reqwest::StatusCode,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration parse errors
    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The looked-up word has no dictionary entry
    #[error("{0}")]
    NotFound(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with CairnError.
pub type Result<T> = std::result::Result<T, CairnError>;

impl CairnError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        CairnError::Config(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        CairnError::NotFound(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        CairnError::InvalidArgument(msg.into())
    }

    /// Create a new unexpected-status error for a named source.
    pub fn status(source_name: &'static str, status: reqwest::StatusCode) -> Self {
        CairnError::Status {
            source_name,
            status,
        }
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        CairnError::Other(msg.into())
    }
}
