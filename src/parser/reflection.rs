//! Frame extraction from structured call-frame introspection.
//!
//! When the host runtime exposes resolved call frames, they are strictly more
//! reliable than parsing trace text, so this source is preferred whenever it
//! yields anything.
//!
//! Method metadata is consumed through [`MethodSignature`], which can be
//! satisfied by live introspection or by a precomputed [`MethodDescriptor`]
//! shipped with ahead-of-time compiled targets.

use super::schema::Frame;
use crate::utils::config::{UNKNOWN_CLASS_NAME, UNKNOWN_PARAMETER_TYPE};
use log::debug;
use serde::{Deserialize, Serialize};

/// Signature metadata of a resolved method
pub trait MethodSignature {
    fn name(&self) -> &str;

    /// Declared generic parameter names, empty for non-generic methods
    fn generic_arguments(&self) -> Vec<&str>;

    /// `(type, name)` pairs; the type is `None` when it cannot be resolved
    fn parameters(&self) -> Vec<(Option<&str>, &str)>;

    /// Fully-qualified name of the enclosing type
    fn declaring_type(&self) -> Option<&str>;
}

/// One call frame as seen by runtime introspection
pub trait IntrospectedFrame {
    type Method: MethodSignature;

    /// `None` when the frame's method cannot be resolved
    fn method(&self) -> Option<&Self::Method>;

    fn file_name(&self) -> Option<&str>;

    /// Source line, 0 when unknown
    fn line_number(&self) -> u32;

    /// Offset of the instruction within the method body
    fn instruction_offset(&self) -> u32;
}

/// Precomputed parameter metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    #[serde(default)]
    pub name: String,
}

impl ParameterDescriptor {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            name: name.into(),
        }
    }

    /// Parameter whose type could not be resolved
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            type_name: None,
            name: name.into(),
        }
    }
}

/// Precomputed method metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaring_type: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_arguments: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterDescriptor>,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_declaring_type(mut self, declaring_type: impl Into<String>) -> Self {
        self.declaring_type = Some(declaring_type.into());
        self
    }

    pub fn with_generic_argument(mut self, name: impl Into<String>) -> Self {
        self.generic_arguments.push(name.into());
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }
}

impl MethodSignature for MethodDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn generic_arguments(&self) -> Vec<&str> {
        self.generic_arguments.iter().map(String::as_str).collect()
    }

    fn parameters(&self) -> Vec<(Option<&str>, &str)> {
        self.parameters
            .iter()
            .map(|p| (p.type_name.as_deref(), p.name.as_str()))
            .collect()
    }

    fn declaring_type(&self) -> Option<&str> {
        self.declaring_type.as_deref()
    }
}

/// Precomputed call frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallFrame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<MethodDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    #[serde(default)]
    pub line_number: u32,

    #[serde(default)]
    pub instruction_offset: u32,
}

impl CallFrame {
    pub fn new(method: MethodDescriptor) -> Self {
        Self {
            method: Some(method),
            ..Self::default()
        }
    }

    /// Frame whose method could not be resolved
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, file_name: impl Into<String>, line_number: u32) -> Self {
        self.file_name = Some(file_name.into());
        self.line_number = line_number;
        self
    }

    pub fn with_instruction_offset(mut self, offset: u32) -> Self {
        self.instruction_offset = offset;
        self
    }

    /// Capture the current thread's call stack, innermost call first.
    ///
    /// Frames belonging to the capture machinery itself are dropped. Symbols
    /// that cannot be resolved produce unresolved frames, which the extractor
    /// skips.
    pub fn capture() -> Vec<CallFrame> {
        let trace = backtrace::Backtrace::new();
        let mut frames = Vec::new();

        for frame in trace.frames() {
            let offset = (frame.ip() as usize).saturating_sub(frame.symbol_address() as usize);
            let offset = u32::try_from(offset).unwrap_or(u32::MAX);

            if frame.symbols().is_empty() {
                frames.push(CallFrame::unresolved().with_instruction_offset(offset));
                continue;
            }

            // Inlined calls show up as several symbols on one frame
            for symbol in frame.symbols() {
                let method = symbol.name().map(|name| {
                    let path = format!("{:#}", name);
                    let (declaring_type, method_name) = split_last_segment(&path);
                    MethodDescriptor {
                        name: method_name.to_string(),
                        declaring_type: declaring_type.map(str::to_string),
                        ..MethodDescriptor::default()
                    }
                });

                frames.push(CallFrame {
                    method,
                    file_name: symbol.filename().map(|p| p.display().to_string()),
                    line_number: symbol.lineno().unwrap_or(0),
                    instruction_offset: offset,
                });
            }
        }

        let skip = frames
            .iter()
            .rposition(is_capture_frame)
            .map_or(0, |last| last + 1);
        debug!("Captured {} call frames ({} internal)", frames.len(), skip);

        frames.split_off(skip)
    }
}

/// Frames of the capture machinery: the `backtrace` crate, [`CallFrame::capture`]
/// and the `with_captured_frames` builder that forwards to it
fn is_capture_frame(frame: &CallFrame) -> bool {
    let Some(method) = frame.method.as_ref() else {
        return false;
    };
    let Some(declaring_type) = method.declaring_type.as_deref() else {
        return false;
    };

    declaring_type.starts_with("backtrace")
        || declaring_type.ends_with("CallFrame")
        || method.name == "with_captured_frames"
}

impl IntrospectedFrame for CallFrame {
    type Method = MethodDescriptor;

    fn method(&self) -> Option<&MethodDescriptor> {
        self.method.as_ref()
    }

    fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    fn line_number(&self) -> u32 {
        self.line_number
    }

    fn instruction_offset(&self) -> u32 {
        self.instruction_offset
    }
}

/// Render `name[G1,G2](Type1 p1, Type2 p2)`
pub fn render_method_name<M: MethodSignature + ?Sized>(method: &M) -> String {
    let mut rendered = String::from(method.name());

    let generics = method.generic_arguments();
    if !generics.is_empty() {
        rendered.push('[');
        rendered.push_str(&generics.join(","));
        rendered.push(']');
    }

    let parameters: Vec<String> = method
        .parameters()
        .into_iter()
        .map(|(type_name, name)| {
            let type_name = type_name.map_or(UNKNOWN_PARAMETER_TYPE, simple_type_name);
            format!("{} {}", type_name, name)
        })
        .collect();

    rendered.push('(');
    rendered.push_str(&parameters.join(", "));
    rendered.push(')');
    rendered
}

/// Convert resolvable introspected frames, or `None` if none resolve
pub fn try_extract_frames<F: IntrospectedFrame>(frames: &[F]) -> Option<Vec<Frame>> {
    let extracted: Vec<Frame> = frames
        .iter()
        .filter_map(|frame| {
            let method = frame.method()?;

            let line_number = match frame.line_number() {
                0 => frame.instruction_offset(),
                line => line,
            };

            Some(Frame {
                class_name: Some(
                    method
                        .declaring_type()
                        .unwrap_or(UNKNOWN_CLASS_NAME)
                        .to_string(),
                ),
                method_name: Some(render_method_name(method)),
                file_name: frame.file_name().map(str::to_string),
                line_number,
            })
        })
        .collect();

    if extracted.len() < frames.len() {
        debug!(
            "Skipped {} unresolvable call frames",
            frames.len() - extracted.len()
        );
    }

    if extracted.is_empty() {
        None
    } else {
        Some(extracted)
    }
}

/// Convert introspected frames; never empty
pub fn extract_frames<F: IntrospectedFrame>(frames: &[F]) -> Vec<Frame> {
    try_extract_frames(frames).unwrap_or_else(|| vec![Frame::sentinel()])
}

/// Split a qualified path at its last `.` or `::` separator that is not
/// nested inside generic brackets.
pub fn split_last_segment(path: &str) -> (Option<&str>, &str) {
    let mut depth = 0usize;
    let mut split: Option<(usize, usize)> = None;
    let bytes = path.as_bytes();

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'[' | b'<' | b'(' => depth += 1,
            b']' | b'>' | b')' => depth = depth.saturating_sub(1),
            b'.' if depth == 0 => split = Some((i, i + 1)),
            b':' if depth == 0 && i > 0 && bytes[i - 1] == b':' => split = Some((i - 1, i + 1)),
            _ => {}
        }
    }

    match split {
        Some((end, start)) if end > 0 && start < path.len() => (Some(&path[..end]), &path[start..]),
        _ => (None, path),
    }
}

/// Last segment of a qualified type name, e.g. `System.String` -> `String`
pub fn simple_type_name(full_name: &str) -> &str {
    split_last_segment(full_name).1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain_method() {
        let method = MethodDescriptor::new("Save")
            .with_parameter(ParameterDescriptor::new("System.String", "path"))
            .with_parameter(ParameterDescriptor::new("System.Int32", "retries"));

        assert_eq!(render_method_name(&method), "Save(String path, Int32 retries)");
    }

    #[test]
    fn test_render_generic_method() {
        let method = MethodDescriptor::new("Map")
            .with_generic_argument("TIn")
            .with_generic_argument("TOut")
            .with_parameter(ParameterDescriptor::new("TIn", "value"));

        assert_eq!(render_method_name(&method), "Map[TIn,TOut](TIn value)");
    }

    #[test]
    fn test_render_unknown_parameter_type() {
        let method = MethodDescriptor::new("Run").with_parameter(ParameterDescriptor::untyped("arg"));
        assert_eq!(render_method_name(&method), "Run(<UnknownType> arg)");
    }

    #[test]
    fn test_split_last_segment() {
        assert_eq!(split_last_segment("System.String"), (Some("System"), "String"));
        assert_eq!(split_last_segment("app::db::connect"), (Some("app::db"), "connect"));
        assert_eq!(
            split_last_segment("List`1[System.Int32]"),
            (None, "List`1[System.Int32]")
        );
        assert_eq!(split_last_segment("main"), (None, "main"));
    }

    #[test]
    fn test_capture_frames_are_recognized() {
        let frame = |path: &str, name: &str| {
            CallFrame::new(MethodDescriptor::new(name).with_declaring_type(path))
        };

        assert!(is_capture_frame(&frame("backtrace::capture::Backtrace", "new")));
        assert!(is_capture_frame(&frame("crashtree::parser::reflection::CallFrame", "capture")));
        assert!(is_capture_frame(&frame(
            "crashtree::chain::exception::RawError",
            "with_captured_frames"
        )));
        assert!(!is_capture_frame(&CallFrame::unresolved()));
        assert!(!is_capture_frame(&frame("app::handlers", "load_config")));
    }

    #[test]
    fn test_offset_used_when_line_missing() {
        let frames = vec![
            CallFrame::new(MethodDescriptor::new("A").with_declaring_type("Ns.T"))
                .with_instruction_offset(17),
        ];
        let extracted = extract_frames(&frames);
        assert_eq!(extracted[0].line_number, 17);
        assert_eq!(extracted[0].class_name.as_deref(), Some("Ns.T"));
    }
}
