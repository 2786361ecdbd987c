use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Generated: {}", report.generated_at);
    println!("  Error: {}", report.error.message);
    println!("  Chain Levels: {}", report.error.depth());
    println!("  Frames (root): {}", report.error.frames.len());

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("crashtree Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  generated_at: string     - RFC 3339 timestamp");
        println!("  error: object            - Error tree root");
        println!("    class_name: string     - Fully-qualified type name");
        println!("    message: string        - '<SimpleType>: <message>'");
        println!("    data: object           - Diagnostic key/value bag");
        println!("    frames: array          - Stack frames, throw site first");
        println!("      class_name: string?  - Declaring type");
        println!("      method_name: string? - Method with parameter list");
        println!("      file_name: string?   - Source file");
        println!("      line_number: number  - Line (0 = unknown)");
        println!("    inner_error: object?   - Nested cause, same shape");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("crashtree v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Stack-trace normalization and exception cause trees for error reporting.");
}
