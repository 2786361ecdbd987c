//! Output writers and input readers for report data.
//!
//! This module handles:
//! - JSON reports (pretty printed)
//! - JSON frame lists
//! - Loading error descriptors and trace text

pub mod json;

// Re-export main functions
pub use json::{read_raw_error, read_report, read_trace_text, write_frames, write_report};

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
