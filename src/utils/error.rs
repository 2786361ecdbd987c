//! Error types for the entire crate.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors raised by the rich single-line grammar.
///
/// These never escape the frame parser: the strategy that hits one abstains
/// and the next strategy is tried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed method segment: {0}")]
    MalformedMethod(String),

    #[error("Unbalanced parameter list: {0}")]
    UnbalancedParameters(String),
}

/// Errors that can occur while loading input files
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read input: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Invalid error descriptor JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Input is empty: {0}")]
    EmptyInput(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
