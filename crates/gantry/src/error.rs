//! Error types for Gantry operations.
//!
//! Layout generation itself never fails: unrecognized commands and unusable
//! parameters produce empty output. [`GantryError`] covers the fallible
//! edges around it, such as strict command parsing and site documents.

use std::io;

use thiserror::Error;

use gantry_parser::ParseError;

/// The main error type for Gantry operations.
///
/// The `Parse` variant keeps the command text next to the diagnostics so
/// reporters can render the labeled spans.
#[derive(Debug, Error)]
pub enum GantryError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Site error: {0}")]
    Site(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl GantryError {
    /// Create a new `Parse` error with the associated command text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
