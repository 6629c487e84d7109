//! Error types for the analyzer compiler.
//!
//! All failures are represented by the [`AnalyzerError`] enum. Compilation is
//! all-or-nothing: any error aborts the whole call and no partial settings are
//! returned. A missing default analyzer is *not* an error, the compiler returns
//! `Ok(None)` for it instead.
//!
//! # Examples
//!
//! ```
//! use analyzer_compiler::error::{AnalyzerError, Result};
//!
//! fn lookup_tokenizer() -> Result<()> {
//!     Err(AnalyzerError::configuration("tokenizer node is missing"))
//! }
//!
//! match lookup_tokenizer() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for analyzer compilation.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// I/O errors outside of content loading (reading tree files, config files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A referenced content block (word list etc.) could not be read.
    #[error("Unable to load content for node entry {node}: {source}")]
    ContentLoad {
        /// Name of the node the content was loaded from.
        node: String,
        #[source]
        source: io::Error,
    },

    /// Unresolvable component identity or malformed structural node.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with AnalyzerError.
pub type Result<T> = std::result::Result<T, AnalyzerError>;

impl AnalyzerError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        AnalyzerError::Configuration(msg.into())
    }

    /// Create a new content load error for the given node.
    pub fn content_load<S: Into<String>>(node: S, source: io::Error) -> Self {
        AnalyzerError::ContentLoad {
            node: node.into(),
            source,
        }
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        AnalyzerError::Other(format!("Invalid configuration: {}", msg.into()))
    }
}
