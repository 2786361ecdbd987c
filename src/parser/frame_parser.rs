//! Frame parser: ordered trace grammars with reflective and sentinel fallback.
//!
//! Strategies are tried from most to least specific:
//! 1. Each configured text grammar, in order
//! 2. Structured call-frame introspection
//! 3. The sentinel frame

use super::reflection::{try_extract_frames, IntrospectedFrame};
use super::schema::Frame;
use super::text::{LineDelimiter, LineStrategy, RichLineStrategy, TraceGrammar, TraceStrategy};
use log::debug;

/// Converts raw trace text (or its absence) into a non-empty frame sequence
#[derive(Debug)]
pub struct FrameParser {
    strategies: Vec<Box<dyn TraceStrategy>>,
    message_fallback: bool,
}

impl FrameParser {
    /// Parser for the rich single-line grammar
    pub fn new() -> Self {
        Self {
            strategies: vec![Box::new(RichLineStrategy)],
            message_fallback: false,
        }
    }

    /// Parser for hosts that only produce unstructured trace lines.
    ///
    /// Such hosts may leave the stack trace empty and stash the trace text in
    /// the error's diagnostic data instead, so the message fallback is on.
    pub fn line_oriented(delimiter: LineDelimiter) -> Self {
        Self {
            strategies: vec![Box::new(LineStrategy::new(delimiter))],
            message_fallback: true,
        }
    }

    /// Parser trying the given strategies in order
    pub fn with_strategies(strategies: Vec<Box<dyn TraceStrategy>>) -> Self {
        Self {
            strategies,
            message_fallback: false,
        }
    }

    /// Parser trying the named grammars in order. An empty list falls back to
    /// the rich grammar.
    pub fn from_grammars(grammars: &[TraceGrammar]) -> Self {
        if grammars.is_empty() {
            return Self::new();
        }

        let message_fallback = grammars.iter().any(|g| *g != TraceGrammar::Rich);
        Self {
            strategies: grammars.iter().map(|g| g.strategy()).collect(),
            message_fallback,
        }
    }

    /// Enable or disable reading trace text from the `Message` data entry
    pub fn with_message_fallback(mut self, enabled: bool) -> Self {
        self.message_fallback = enabled;
        self
    }

    pub fn message_fallback(&self) -> bool {
        self.message_fallback
    }

    /// Names of the configured strategies, in priority order
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Run the text grammars only
    pub fn parse_text(&self, text: &str) -> Option<Vec<Frame>> {
        self.strategies.iter().find_map(|strategy| {
            let frames = strategy.parse(text);
            if frames.is_none() {
                debug!("Trace strategy '{}' abstained", strategy.name());
            }
            frames
        })
    }

    /// Parse a trace, falling back to introspection and finally the sentinel
    pub fn parse<F: IntrospectedFrame>(&self, text: Option<&str>, introspection: Option<&[F]>) -> Vec<Frame> {
        if let Some(frames) = text.and_then(|t| self.parse_text(t)) {
            return frames;
        }

        if let Some(frames) = introspection.and_then(try_extract_frames) {
            return frames;
        }

        debug!("No frames resolved, emitting sentinel");
        vec![Frame::sentinel()]
    }
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}
