//! Configuration and constants for frame parsing and tree building.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Sentinel frame emitted when no strategy resolves anything
pub const SENTINEL_FILE_NAME: &str = "none";

/// Class name used when a frame's declaring type cannot be resolved
pub const UNKNOWN_CLASS_NAME: &str = "(unknown)";

/// Parameter type placeholder for unresolvable parameter types
pub const UNKNOWN_PARAMETER_TYPE: &str = "<UnknownType>";

// Markers of the rich single-line grammar, e.g.
// "at Foo.Bar (System.String) [0x00001] in /src/Foo.cs:42"
pub const CALL_MARKER: &str = "at ";
pub const FILE_MARKER: &str = "] in ";
pub const OFFSET_MARKER: &str = "[0x";

/// Exception types that are transparently skipped out of the box
pub const DEFAULT_WRAPPER_TYPES: &[&str] = &[
    "System.Reflection.TargetInvocationException",
    "System.Web.HttpUnhandledException",
];

/// Maximum number of cause-chain levels walked before truncating
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 64;

/// Data key holding trace text on hosts that do not populate a stack trace
pub const MESSAGE_DATA_KEY: &str = "Message";
