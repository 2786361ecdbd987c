//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod frames;
pub mod models;
pub mod tree;
pub mod utils;

// Re-export main command functions
pub use frames::execute_frames;
pub use models::{FramesArgs, TreeArgs};
pub use tree::execute_tree;
pub use utils::{display_schema, display_version, validate_report_file};
