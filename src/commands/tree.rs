//! Tree command implementation.
//!
//! The tree command:
//! 1. Loads an error descriptor from JSON
//! 2. Strips wrapper exceptions
//! 3. Builds the error tree
//! 4. Writes the report

use super::models::TreeArgs;
use crate::output::{read_raw_error, write_report};
use crate::parser::frame_parser::FrameParser;
use crate::parser::schema::Report;
use crate::reporter::Reporter;
use anyhow::{Context, Result};
use log::{debug, info};

/// Execute the tree command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Unreadable or malformed descriptor
/// * File write errors
pub fn execute_tree(args: &TreeArgs) -> Result<Report> {
    info!("Building error tree: {}", args.input.display());

    let raw = read_raw_error(&args.input).context("Failed to load error descriptor")?;

    let mut reporter = Reporter::new()
        .with_parser(FrameParser::from_grammars(&args.grammars))
        .with_max_depth(args.max_depth);
    reporter.add_wrapper_exceptions(args.wrappers.iter().map(String::as_str));

    debug!(
        "Wrapper types: {}",
        reporter
            .wrappers()
            .iter()
            .map(|t| t.full_name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let report = reporter.build_report(&raw);
    info!(
        "Error tree: {} levels, root {}",
        report.error.depth(),
        report.error.class_name
    );

    match &args.output {
        Some(path) => {
            write_report(&report, path).context("Failed to write report JSON")?;
            info!("✓ Report written to: {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(report)
}

/// Validate tree arguments
///
/// **Public** - can be called before execute_tree for early validation
pub fn validate_args(args: &TreeArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if !args.input.is_file() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    if args.max_depth == 0 {
        anyhow::bail!("max_depth must be greater than 0");
    }

    if args.wrappers.iter().any(|w| w.trim().is_empty()) {
        anyhow::bail!("Wrapper type names cannot be empty");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_args_max_depth_zero() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let args = TreeArgs {
            input: file.path().to_path_buf(),
            max_depth: 0,
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_blank_wrapper() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let args = TreeArgs {
            input: file.path().to_path_buf(),
            wrappers: vec!["  ".to_string()],
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_valid() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let args = TreeArgs {
            input: file.path().to_path_buf(),
            wrappers: vec!["App.Wrapper".to_string()],
            ..Default::default()
        };

        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_missing_file() {
        let args = TreeArgs {
            input: PathBuf::from("/definitely/not/here/error.json"),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }
}
