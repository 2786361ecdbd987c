//! crashtree
//!
//! Turns raw, heterogeneous exceptions into normalized error trees for
//! error-reporting clients.
//!
//! - [`parser`] normalizes stack traces, from free text or from structured
//!   call-frame introspection, into ordered [`Frame`] sequences.
//! - [`chain`] strips transparent wrapper exceptions and builds the nested
//!   [`ErrorNode`] cause tree.
//! - [`Reporter`] bundles the per-client configuration.
//!
//! ```
//! use crashtree::{build_error_tree, RawError, WrapperTypeSet};
//!
//! let err = RawError::new("System.Reflection.TargetInvocationException", "wrapped")
//!     .with_inner(
//!         RawError::new("System.IO.FileNotFoundException", "config.xml")
//!             .with_stack_trace("at App.Config.Load () [0x0000c] in /src/Config.cs:17"),
//!     );
//!
//! let tree = build_error_tree(&err, &WrapperTypeSet::new());
//! assert_eq!(tree.class_name, "System.IO.FileNotFoundException");
//! assert_eq!(tree.message, "FileNotFoundException: config.xml");
//! assert_eq!(tree.frames[0].line_number, 17);
//! ```

pub mod chain;
pub mod commands;
pub mod output;
pub mod parser;
pub mod reporter;
pub mod utils;

pub use chain::{build_error_tree, ErrorTreeBuilder, NativeError, RawError, ReportableError, TypeName, WrapperTypeSet};
pub use parser::{CallFrame, ErrorNode, Frame, FrameParser, MethodDescriptor, ParameterDescriptor, Report};
pub use reporter::Reporter;
