//! Line search collaborators.
//!
//! A searcher returns every line of the project files matching a set of globs
//! that also matches a pattern, newline separated. The extractor then applies
//! the pattern again to pull out capture groups.

mod git;
mod types;
mod workspace;

use std::path::Path;

use regex::Regex;

pub use git::GitGrep;
pub use types::SearchError;
pub use workspace::WorkspaceSearcher;

use crate::config::SearcherKind;

/// Finds matching lines in the files under a base path.
pub trait LineSearcher {
    /// Returns the matching lines, one per line. No match is an empty string, not an error.
    ///
    /// # Errors
    /// Returns `SearchError` if the search cannot run or exits abnormally.
    fn search(&self, base_path: &Path, pattern: &Regex, globs: &[String])
    -> Result<String, SearchError>;
}

/// Creates the searcher selected in the settings.
#[must_use]
pub fn searcher_for(kind: SearcherKind, exclude_patterns: &[String]) -> Box<dyn LineSearcher> {
    match kind {
        SearcherKind::Git => Box::new(GitGrep::default()),
        SearcherKind::Walk => Box::new(WorkspaceSearcher::new(exclude_patterns.to_vec())),
    }
}
