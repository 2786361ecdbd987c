//! Error tree construction.
//!
//! Builds one [`ErrorNode`] per level of an exception's inner-cause chain.
//! Wrapper stripping is applied once, at the outermost level only; inner
//! causes are included verbatim.

use super::exception::ReportableError;
use super::wrappers::WrapperTypeSet;
use crate::parser::frame_parser::FrameParser;
use crate::parser::reflection::try_extract_frames;
use crate::parser::schema::{ErrorNode, Frame};
use crate::utils::config::{DEFAULT_MAX_CHAIN_DEPTH, MESSAGE_DATA_KEY};
use log::{debug, warn};
use serde_json::Map;

/// Converts an unwrapped error into a nested [`ErrorNode`] chain
#[derive(Debug, Default)]
pub struct ErrorTreeBuilder {
    parser: FrameParser,
    max_depth: Option<usize>,
}

impl ErrorTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific frame parser for trace text
    pub fn with_parser(mut self, parser: FrameParser) -> Self {
        self.parser = parser;
        self
    }

    /// Truncate chains after `max_depth` levels (minimum 1)
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth.max(1));
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth.unwrap_or(DEFAULT_MAX_CHAIN_DEPTH)
    }

    pub fn parser(&self) -> &FrameParser {
        &self.parser
    }

    /// Build the tree for an error that has already been unwrapped
    pub fn build(&self, error: &dyn ReportableError) -> ErrorNode {
        let mut levels = Vec::new();
        let mut current = Some(error);

        while let Some(err) = current {
            if levels.len() == self.max_depth() {
                warn!(
                    "Cause chain exceeds {} levels, truncating at {}",
                    self.max_depth(),
                    err.type_name()
                );
                break;
            }
            levels.push(self.build_node(err));
            current = err.inner();
        }

        debug!("Built error tree with {} levels", levels.len());

        let mut tree: Option<ErrorNode> = None;
        while let Some(mut node) = levels.pop() {
            node.inner_error = tree.map(Box::new);
            tree = Some(node);
        }

        // `levels` always receives the root since max_depth >= 1
        tree.unwrap_or_else(|| self.build_node(error))
    }

    /// Strip wrappers from the outermost level, then build the tree
    pub fn build_unwrapped(&self, error: &dyn ReportableError, wrappers: &WrapperTypeSet) -> ErrorNode {
        self.build(wrappers.unwrap(error))
    }

    /// Node for a single level, without its inner error
    fn build_node(&self, error: &dyn ReportableError) -> ErrorNode {
        let (class_name, message) = match error.native_error() {
            Some(native) => (
                native.name.clone(),
                format!("{}: {}", native.name, native.reason),
            ),
            None => (
                error.type_name().full_name().to_string(),
                format!("{}: {}", error.type_name().simple_name(), error.message()),
            ),
        };

        ErrorNode {
            class_name,
            message,
            data: error.data().cloned().unwrap_or_else(Map::new),
            frames: self.frames_for(error),
            inner_error: None,
        }
    }

    /// Resolve frames for one error: native symbols, then introspection,
    /// then trace text, then the sentinel.
    pub fn frames_for(&self, error: &dyn ReportableError) -> Vec<Frame> {
        if let Some(native) = error.native_error() {
            if !native.call_stack_symbols.is_empty() {
                return native
                    .call_stack_symbols
                    .iter()
                    .map(|symbol| Frame::from_file_name(symbol.as_str(), 0))
                    .collect();
            }
        }

        if let Some(frames) = error.call_frames().and_then(try_extract_frames) {
            return frames;
        }

        let text = error.stack_trace().or_else(|| {
            if !self.parser.message_fallback() {
                return None;
            }
            error
                .data()
                .and_then(|data| data.get(MESSAGE_DATA_KEY))
                .and_then(|value| value.as_str())
        });

        self.parser.parse(text, error.call_frames())
    }
}

/// Unwrap `error` with `wrappers` and build its tree with default settings
pub fn build_error_tree(error: &dyn ReportableError, wrappers: &WrapperTypeSet) -> ErrorNode {
    ErrorTreeBuilder::new().build_unwrapped(error, wrappers)
}
