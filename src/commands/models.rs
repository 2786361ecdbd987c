use crate::parser::text::TraceGrammar;
use crate::utils::config::DEFAULT_MAX_CHAIN_DEPTH;
use std::path::PathBuf;

/// Arguments for the frames command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct FramesArgs {
    /// Stack-trace text file
    pub input: PathBuf,

    /// Grammars to try, in order (empty = rich grammar only)
    pub grammars: Vec<TraceGrammar>,

    /// Output path for the frame JSON (None = stdout)
    pub output: Option<PathBuf>,
}

impl Default for FramesArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("trace.txt"),
            grammars: Vec::new(),
            output: None,
        }
    }
}

/// Arguments for the tree command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct TreeArgs {
    /// Error descriptor JSON file
    pub input: PathBuf,

    /// Extra wrapper types to strip, on top of the defaults
    pub wrappers: Vec<String>,

    /// Grammars to try for trace text, in order
    pub grammars: Vec<TraceGrammar>,

    /// Maximum number of cause-chain levels
    pub max_depth: usize,

    /// Output path for the report JSON (None = stdout)
    pub output: Option<PathBuf>,
}

impl Default for TreeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("error.json"),
            wrappers: Vec::new(),
            grammars: Vec::new(),
            max_depth: DEFAULT_MAX_CHAIN_DEPTH,
            output: None,
        }
    }
}
