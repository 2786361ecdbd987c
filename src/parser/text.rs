//! Free-text stack-trace grammars.
//!
//! No single grammar covers every producer of trace text, so each grammar is
//! an independent [`TraceStrategy`]. A strategy either returns frames or
//! abstains, and the frame parser tries them in priority order.

use super::reflection::{split_last_segment, simple_type_name};
use super::schema::Frame;
use crate::utils::config::{CALL_MARKER, FILE_MARKER, OFFSET_MARKER};
use crate::utils::error::ParseError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single trace-text grammar
pub trait TraceStrategy: fmt::Debug + Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Parse the whole trace text, or `None` to defer to the next strategy
    fn parse(&self, text: &str) -> Option<Vec<Frame>>;
}

/// Named grammars, used to build a parser from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraceGrammar {
    /// `at Type.Method (Params) [0x00000] in file:line`
    Rich,
    /// One frame per line, split on `\r` or `\n`
    Lines,
    /// One frame per line, split on `\r\n` only
    CrlfLines,
}

impl TraceGrammar {
    pub fn strategy(self) -> Box<dyn TraceStrategy> {
        match self {
            Self::Rich => Box::new(RichLineStrategy),
            Self::Lines => Box::new(LineStrategy::new(LineDelimiter::AnyNewline)),
            Self::CrlfLines => Box::new(LineStrategy::new(LineDelimiter::CrLf)),
        }
    }
}

impl std::str::FromStr for TraceGrammar {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rich" => Ok(Self::Rich),
            "lines" => Ok(Self::Lines),
            "crlf-lines" | "crlf" => Ok(Self::CrlfLines),
            other => Err(format!("unknown trace grammar '{}'", other)),
        }
    }
}

/// Line delimiter for [`LineStrategy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDelimiter {
    CrLf,
    AnyNewline,
}

/// Low-fidelity grammar: every non-empty line becomes a frame whose class
/// name is the raw line
#[derive(Debug, Clone, Copy)]
pub struct LineStrategy {
    delimiter: LineDelimiter,
}

impl LineStrategy {
    pub fn new(delimiter: LineDelimiter) -> Self {
        Self { delimiter }
    }
}

impl TraceStrategy for LineStrategy {
    fn name(&self) -> &'static str {
        match self.delimiter {
            LineDelimiter::CrLf => "crlf-lines",
            LineDelimiter::AnyNewline => "lines",
        }
    }

    fn parse(&self, text: &str) -> Option<Vec<Frame>> {
        let lines: Vec<&str> = match self.delimiter {
            LineDelimiter::CrLf => text.split("\r\n").collect(),
            LineDelimiter::AnyNewline => text.split(|c| c == '\r' || c == '\n').collect(),
        };

        let frames: Vec<Frame> = lines
            .into_iter()
            .filter(|line| !line.is_empty())
            .map(Frame::from_class_name)
            .collect();

        if frames.is_empty() {
            None
        } else {
            Some(frames)
        }
    }
}

/// Rich single-line grammar:
///
/// ```text
/// at Foo.Bar (System.String) [0x00001] in /src/Foo.cs:42
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RichLineStrategy;

impl TraceStrategy for RichLineStrategy {
    fn name(&self) -> &'static str {
        "rich"
    }

    fn parse(&self, text: &str) -> Option<Vec<Frame>> {
        let parsed: Result<Vec<Frame>, ParseError> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.trim().is_empty())
            .map(parse_rich_line)
            .collect();

        match parsed {
            Ok(frames) if !frames.is_empty() => Some(frames),
            Ok(_) => None,
            Err(e) => {
                debug!("Rich grammar abandoned: {}", e);
                None
            }
        }
    }
}

/// Parse one line of the rich grammar
pub fn parse_rich_line(line: &str) -> Result<Frame, ParseError> {
    let Some((rest, line_number)) = split_line_number(line) else {
        return Ok(Frame::from_file_name(line, 0));
    };

    let Some(marker) = rest.rfind(FILE_MARKER).filter(|&i| i > 0) else {
        return Ok(Frame::from_file_name(rest, line_number));
    };

    let file_name = &rest[marker + FILE_MARKER.len()..];
    let mut head = &rest[..marker];

    // The call marker must lead the frame text
    let call = head.len() - head.trim_start().len();
    if !head[call..].starts_with(CALL_MARKER) {
        return Ok(Frame::from_file_name(rest, line_number));
    }

    let mut method_name = None;
    if let Some(open) = head.rfind('(').filter(|&i| i > 0) {
        let callee = head[..open].trim_end();
        if let (Some(owner), method) = split_last_segment(callee) {
            let start = callee.len() - method.len();
            let end = head.find(OFFSET_MARKER).unwrap_or(head.len());
            if end <= start {
                return Err(ParseError::MalformedMethod(head.to_string()));
            }
            method_name = Some(normalize_method(head[start..end].trim())?);
            head = &head[..owner.len()];
        }
    }

    let class_name = head
        .get(call + CALL_MARKER.len()..)
        .map(str::trim)
        .filter(|name| !name.is_empty());

    Ok(Frame {
        class_name: class_name.map(str::to_string),
        method_name,
        file_name: Some(file_name.to_string()),
        line_number,
    })
}

/// Split a trailing `:<line>` suffix
fn split_line_number(line: &str) -> Option<(&str, u32)> {
    let index = line.rfind(':').filter(|&i| i > 0)?;
    let number = line[index + 1..].trim().parse::<u32>().ok()?;
    Some((&line[..index], number))
}

/// Render `Bar (System.String s, Foo)` as `Bar(String s, Foo )`
fn normalize_method(raw: &str) -> Result<String, ParseError> {
    let open = raw
        .find('(')
        .ok_or_else(|| ParseError::MalformedMethod(raw.to_string()))?;
    let close = raw
        .rfind(')')
        .filter(|&close| close > open)
        .ok_or_else(|| ParseError::UnbalancedParameters(raw.to_string()))?;

    let name = raw[..open].trim_end();
    if name.is_empty() {
        return Err(ParseError::MalformedMethod(raw.to_string()));
    }

    let params = raw[open + 1..close].trim();
    if params.is_empty() {
        return Ok(format!("{}()", name));
    }

    let rendered: Vec<String> = params
        .split(',')
        .map(|param| {
            let mut tokens = param.split_whitespace();
            let type_name = tokens.next().unwrap_or_default();
            let param_name = tokens.collect::<Vec<_>>().join(" ");
            format!("{} {}", simple_type_name(type_name), param_name)
        })
        .collect();

    Ok(format!("{}({})", name, rendered.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_method() {
        assert_eq!(normalize_method("Bar (System.String)").unwrap(), "Bar(String )");
        assert_eq!(normalize_method("Bar ()").unwrap(), "Bar()");
        assert_eq!(
            normalize_method("Save (System.String path, System.Int32 n)").unwrap(),
            "Save(String path, Int32 n)"
        );
        assert!(matches!(
            normalize_method("Bar (System.String"),
            Err(ParseError::UnbalancedParameters(_))
        ));
    }

    #[test]
    fn test_split_line_number() {
        assert_eq!(split_line_number("file.cs:12"), Some(("file.cs", 12)));
        assert_eq!(split_line_number("file.cs:abc"), None);
        assert_eq!(split_line_number(":12"), None);
        assert_eq!(split_line_number("no colon"), None);
    }

    #[test]
    fn test_grammar_from_str() {
        assert_eq!("rich".parse::<TraceGrammar>().unwrap(), TraceGrammar::Rich);
        assert_eq!("CRLF-lines".parse::<TraceGrammar>().unwrap(), TraceGrammar::CrlfLines);
        assert!("xml".parse::<TraceGrammar>().is_err());
    }

    #[test]
    fn test_crlf_keeps_lone_newlines() {
        let frames = LineStrategy::new(LineDelimiter::CrLf)
            .parse("a\nb\r\nc\r\n")
            .unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].class_name.as_deref(), Some("a\nb"));
    }
}
