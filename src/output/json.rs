//! JSON report output writer and input readers.
//!
//! Writes Report structs and frame lists to JSON files with proper
//! formatting, and loads error descriptors for offline report building.

use crate::chain::exception::RawError;
use crate::parser::schema::{Frame, Report};
use crate::utils::error::{InputError, OutputError};
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Write a report to a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &Report, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    write_json(report, output_path.as_ref())
}

/// Write a frame list to a JSON file
pub fn write_frames(frames: &[Frame], output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    write_json(frames, output_path.as_ref())
}

fn write_json<T: Serialize + ?Sized>(value: &T, output_path: &Path) -> Result<(), OutputError> {
    info!("Writing JSON to: {}", output_path.display());

    super::validate_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, value).map_err(OutputError::SerializationFailed)?;

    info!(
        "JSON written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Calculate file size in bytes
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a report from a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<Report, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let report: Report =
        serde_json::from_reader(BufReader::new(file)).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, error {}",
        report.version, report.error.class_name
    );

    Ok(report)
}

/// Load an error descriptor from a JSON file
pub fn read_raw_error(input_path: impl AsRef<Path>) -> Result<RawError, InputError> {
    let input_path = input_path.as_ref();

    debug!("Reading error descriptor from: {}", input_path.display());

    let file = File::open(input_path)?;
    let raw: RawError = serde_json::from_reader(BufReader::new(file))?;

    Ok(raw)
}

/// Load stack-trace text from a file
pub fn read_trace_text(input_path: impl AsRef<Path>) -> Result<String, InputError> {
    let input_path = input_path.as_ref();
    let text = std::fs::read_to_string(input_path)?;

    if text.trim().is_empty() {
        return Err(InputError::EmptyInput(input_path.display().to_string()));
    }

    debug!("Read {} bytes of trace text", text.len());
    Ok(text)
}
