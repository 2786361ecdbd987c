//! Raw error interface consumed by the chain processor.
//!
//! Host integrations implement [`ReportableError`] for their own exception
//! values. [`RawError`] is an owned implementation that can also be loaded
//! from a JSON descriptor.

use crate::parser::reflection::{simple_type_name, CallFrame};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Fully-qualified runtime type name, used as the type identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self(full_name.into())
    }

    pub fn full_name(&self) -> &str {
        &self.0
    }

    /// Last path segment, e.g. `System.IO.IOException` -> `IOException`
    pub fn simple_name(&self) -> &str {
        simple_type_name(&self.0)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TypeName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A foreign native platform error wrapped by a managed error
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeError {
    pub name: String,

    #[serde(default)]
    pub reason: String,

    /// Symbolicated native call stack, one entry per frame
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub call_stack_symbols: Vec<String>,
}

impl NativeError {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
            call_stack_symbols: Vec::new(),
        }
    }

    pub fn with_symbols(mut self, symbols: Vec<String>) -> Self {
        self.call_stack_symbols = symbols;
        self
    }
}

/// A raw error value as seen by the reporter
pub trait ReportableError {
    /// Exact runtime type identity
    fn type_name(&self) -> &TypeName;

    fn message(&self) -> &str;

    fn inner(&self) -> Option<&dyn ReportableError>;

    /// Attached diagnostic key/value bag
    fn data(&self) -> Option<&Map<String, Value>> {
        None
    }

    /// Raw free-text stack trace
    fn stack_trace(&self) -> Option<&str> {
        None
    }

    fn native_error(&self) -> Option<&NativeError> {
        None
    }

    /// Structured call frames, when the runtime exposes them
    fn call_frames(&self) -> Option<&[CallFrame]> {
        None
    }
}

impl fmt::Debug for dyn ReportableError + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportableError")
            .field("type_name", self.type_name())
            .field("message", &self.message())
            .field("has_inner", &self.inner().is_some())
            .finish()
    }
}

/// Owned error descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawError {
    pub type_name: TypeName,

    #[serde(default)]
    pub message: String,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native: Option<NativeError>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames: Option<Vec<CallFrame>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner: Option<Box<RawError>>,
}

impl RawError {
    pub fn new(type_name: impl Into<TypeName>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            data: Map::new(),
            stack_trace: None,
            native: None,
            frames: None,
            inner: None,
        }
    }

    pub fn with_inner(mut self, inner: RawError) -> Self {
        self.inner = Some(Box::new(inner));
        self
    }

    pub fn with_stack_trace(mut self, trace: impl Into<String>) -> Self {
        self.stack_trace = Some(trace.into());
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn with_native(mut self, native: NativeError) -> Self {
        self.native = Some(native);
        self
    }

    pub fn with_frames(mut self, frames: Vec<CallFrame>) -> Self {
        self.frames = Some(frames);
        self
    }

    /// Attach the current thread's call stack
    pub fn with_captured_frames(self) -> Self {
        self.with_frames(CallFrame::capture())
    }
}

impl ReportableError for RawError {
    fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn inner(&self) -> Option<&dyn ReportableError> {
        self.inner.as_deref().map(|e| e as &dyn ReportableError)
    }

    fn data(&self) -> Option<&Map<String, Value>> {
        Some(&self.data)
    }

    fn stack_trace(&self) -> Option<&str> {
        self.stack_trace.as_deref()
    }

    fn native_error(&self) -> Option<&NativeError> {
        self.native.as_ref()
    }

    fn call_frames(&self) -> Option<&[CallFrame]> {
        self.frames.as_deref()
    }
}
