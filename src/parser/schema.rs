//! Output schema definitions for normalized error data.
//!
//! These are the structures handed to the message-assembly layer and written
//! to disk by the JSON output writer. Schema is versioned to allow future
//! evolution.

use crate::utils::config::SENTINEL_FILE_NAME;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One normalized stack entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Declaring type, or the raw line for low-fidelity traces
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    /// Method name with rendered parameter list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Source line; 0 when unknown. May hold an instruction offset instead
    /// when the runtime has no line information.
    #[serde(default)]
    pub line_number: u32,
}

impl Frame {
    /// Frame emitted when nothing could be resolved
    pub fn sentinel() -> Self {
        Self {
            file_name: Some(SENTINEL_FILE_NAME.to_string()),
            ..Self::default()
        }
    }

    /// Frame carrying only a file name (unstructured or unparseable lines)
    pub fn from_file_name(file_name: impl Into<String>, line_number: u32) -> Self {
        Self {
            file_name: Some(file_name.into()),
            line_number,
            ..Self::default()
        }
    }

    /// Frame carrying only a class name (line-oriented traces)
    pub fn from_class_name(class_name: impl Into<String>) -> Self {
        Self {
            class_name: Some(class_name.into()),
            ..Self::default()
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.class_name.is_none()
            && self.method_name.is_none()
            && self.line_number == 0
            && self.file_name.as_deref() == Some(SENTINEL_FILE_NAME)
    }
}

/// One level of a reported error's cause chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorNode {
    /// Fully-qualified type name (or native error name)
    pub class_name: String,

    /// "<SimpleType>: <message>"
    pub message: String,

    /// Shallow copy of the error's diagnostic key/value bag
    #[serde(default)]
    pub data: Map<String, Value>,

    /// Never empty, throw site first
    pub frames: Vec<Frame>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_error: Option<Box<ErrorNode>>,
}

impl ErrorNode {
    /// Number of levels in this chain, including self
    pub fn depth(&self) -> usize {
        self.chain().count()
    }

    /// Iterate the chain from this node inward
    pub fn chain(&self) -> impl Iterator<Item = &ErrorNode> {
        std::iter::successors(Some(self), |node| node.inner_error.as_deref())
    }

    /// Innermost node of the chain
    pub fn innermost(&self) -> &ErrorNode {
        let mut node = self;
        while let Some(inner) = node.inner_error.as_deref() {
            node = inner;
        }
        node
    }
}

/// Top-level report document written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated (RFC 3339, UTC)
    pub generated_at: String,

    /// Normalized error tree
    pub error: ErrorNode,
}
