//! Stack-trace parsing and schema definitions.
//!
//! This module handles:
//! - Parsing free-text traces with ordered grammars
//! - Extracting frames from structured call-frame introspection
//! - Defining the normalized output schema

pub mod frame_parser;
pub mod reflection;
pub mod schema;
pub mod text;

// Re-export main types
pub use frame_parser::FrameParser;
pub use reflection::{
    extract_frames, render_method_name, try_extract_frames, CallFrame, IntrospectedFrame,
    MethodDescriptor, MethodSignature, ParameterDescriptor,
};
pub use schema::{ErrorNode, Frame, Report};
pub use text::{LineDelimiter, LineStrategy, RichLineStrategy, TraceGrammar, TraceStrategy};
