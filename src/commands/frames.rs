//! Frames command implementation.
//!
//! The frames command:
//! 1. Reads stack-trace text from a file
//! 2. Parses it with the requested grammars
//! 3. Writes the normalized frames as JSON

use super::models::FramesArgs;
use crate::output::{read_trace_text, write_frames};
use crate::parser::frame_parser::FrameParser;
use crate::parser::reflection::CallFrame;
use crate::parser::schema::Frame;
use anyhow::{Context, Result};
use log::info;

/// Execute the frames command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Unreadable or empty input file
/// * File write errors
pub fn execute_frames(args: &FramesArgs) -> Result<Vec<Frame>> {
    info!("Parsing stack trace: {}", args.input.display());

    let text = read_trace_text(&args.input).context("Failed to read stack-trace text")?;

    let parser = FrameParser::from_grammars(&args.grammars);
    info!("Trace grammars: {}", parser.strategy_names().join(", "));

    let frames = parser.parse::<CallFrame>(Some(&text), None);
    info!("Resolved {} frames", frames.len());

    match &args.output {
        Some(path) => {
            write_frames(&frames, path).context("Failed to write frames JSON")?;
            info!("✓ Frames written to: {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&frames)?),
    }

    Ok(frames)
}

/// Validate frames arguments
///
/// **Public** - can be called before execute_frames for early validation
pub fn validate_args(args: &FramesArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if !args.input.is_file() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    Ok(())
}
