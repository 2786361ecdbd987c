//! crashtree CLI
//!
//! Normalizes stack-trace text and builds error trees from JSON error
//! descriptors, offline.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use crashtree::commands::{
    display_schema, display_version, execute_frames, execute_tree, frames, tree, validate_report_file,
    FramesArgs, TreeArgs,
};
use crashtree::parser::TraceGrammar;
use crashtree::utils::config::DEFAULT_MAX_CHAIN_DEPTH;

/// crashtree - stack-trace normalization and error trees
#[derive(Parser, Debug)]
#[command(name = "crashtree")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a stack-trace text file into frames
    Frames {
        /// Stack-trace text file
        #[arg(short, long)]
        file: PathBuf,

        /// Grammar to try (rich, lines, crlf-lines); repeat to set the order
        #[arg(short, long)]
        grammar: Vec<TraceGrammar>,

        /// Output path for frames JSON (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build an error tree report from a JSON error descriptor
    Tree {
        /// Error descriptor JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Additional wrapper exception type to strip; repeatable
        #[arg(short, long)]
        wrapper: Vec<String>,

        /// Grammar to try for trace text; repeat to set the order
        #[arg(short, long)]
        grammar: Vec<TraceGrammar>,

        /// Maximum number of cause-chain levels
        #[arg(long, default_value_t = DEFAULT_MAX_CHAIN_DEPTH)]
        max_depth: usize,

        /// Output path for report JSON (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Frames {
            file,
            grammar,
            output,
        } => {
            let args = FramesArgs {
                input: file,
                grammars: grammar,
                output,
            };

            frames::validate_args(&args)?;
            execute_frames(&args)?;
        }

        Commands::Tree {
            file,
            wrapper,
            grammar,
            max_depth,
            output,
        } => {
            let args = TreeArgs {
                input: file,
                wrappers: wrapper,
                grammars: grammar,
                max_depth,
                output,
            };

            tree::validate_args(&args)?;
            execute_tree(&args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
