//! Exception-chain processing.
//!
//! This module handles:
//! - The raw error interface and owned error descriptors
//! - Stripping transparent wrapper exceptions
//! - Building the nested error tree

pub mod exception;
pub mod tree;
pub mod wrappers;

// Re-export main types
pub use exception::{NativeError, RawError, ReportableError, TypeName};
pub use tree::{build_error_tree, ErrorTreeBuilder};
pub use wrappers::{unwrap_chain, WrapperTypeSet};
