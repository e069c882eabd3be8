//! Search error types.

use thiserror::Error;

use crate::config::MatcherError;

#[derive(Error, Debug)]
pub enum SearchError {
    /// The search process could not be started
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The search process exited with an error status
    #[error("'{program}' exited with status {}: {stderr}", format_code(*.code))]
    Failed { program: String, code: Option<i32>, stderr: String },
    /// A rule glob or exclude pattern could not be compiled
    #[error(transparent)]
    Matcher(#[from] MatcherError),
}

/// Formats an exit code; a process killed by a signal has none.
fn format_code(code: Option<i32>) -> String {
    code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
}
