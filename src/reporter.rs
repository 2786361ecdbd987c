//! Reporter: per-client configuration for building error reports.
//!
//! Owns the wrapper types and the tree builder, so two reporters in one
//! process never see each other's wrapper registrations.

use crate::chain::exception::{ReportableError, TypeName};
use crate::chain::tree::ErrorTreeBuilder;
use crate::chain::wrappers::WrapperTypeSet;
use crate::parser::frame_parser::FrameParser;
use crate::parser::schema::{ErrorNode, Report};
use crate::utils::config::SCHEMA_VERSION;
use chrono::Utc;
use log::debug;

#[derive(Debug, Default)]
pub struct Reporter {
    wrappers: WrapperTypeSet,
    builder: ErrorTreeBuilder,
}

impl Reporter {
    /// Reporter with the default wrapper types and the rich trace grammar
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parser(mut self, parser: FrameParser) -> Self {
        self.builder = self.builder.with_parser(parser);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.builder = self.builder.with_max_depth(max_depth);
        self
    }

    /// Add outer exception types to strip, leaving their inner cause.
    /// Types already registered are ignored.
    pub fn add_wrapper_exceptions<I, T>(&mut self, types: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeName>,
    {
        self.wrappers.register_all(types);
    }

    pub fn wrappers(&self) -> &WrapperTypeSet {
        &self.wrappers
    }

    /// Strip wrappers and build the error tree
    pub fn build_error_tree(&self, error: &dyn ReportableError) -> ErrorNode {
        self.builder.build_unwrapped(error, &self.wrappers)
    }

    /// Build a versioned, timestamped report around the error tree
    pub fn build_report(&self, error: &dyn ReportableError) -> Report {
        let tree = self.build_error_tree(error);
        debug!("Report built for {}", tree.class_name);

        Report {
            version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            error: tree,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::exception::RawError;

    #[test]
    fn test_reporters_do_not_share_wrappers() {
        let mut first = Reporter::new();
        first.add_wrapper_exceptions(["App.AggregateWrapper"]);
        let second = Reporter::new();

        let err = RawError::new("App.AggregateWrapper", "outer").with_inner(RawError::new("App.Real", "inner"));

        assert_eq!(first.build_error_tree(&err).class_name, "App.Real");
        assert_eq!(second.build_error_tree(&err).class_name, "App.AggregateWrapper");
    }

    #[test]
    fn test_report_carries_schema_version() {
        let report = Reporter::new().build_report(&RawError::new("App.Error", "x"));
        assert_eq!(report.version, SCHEMA_VERSION);
        assert!(chrono::DateTime::parse_from_rfc3339(&report.generated_at).is_ok());
    }
}
