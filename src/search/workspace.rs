//! Directory-walk searcher for trees that are not git repositories.
use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;
use regex::Regex;

use super::{
    LineSearcher,
    SearchError,
};
use crate::config::FileMatcher;

/// Walks the project with the `ignore` crate and greps file contents in-process.
///
/// Honours `.gitignore` even outside a repository; files are visited in path order
/// so output is stable between runs.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceSearcher {
    /// Globs excluded on top of the rule's own globs.
    exclude_patterns: Vec<String>,
}

impl WorkspaceSearcher {
    #[must_use]
    pub const fn new(exclude_patterns: Vec<String>) -> Self {
        Self { exclude_patterns }
    }

    /// ソースファイルを検索
    fn find_files(matcher: &FileMatcher) -> Vec<PathBuf> {
        let mut found_files = Vec::new();

        for result in WalkBuilder::new(matcher.project_root())
            .hidden(false)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .require_git(false)
            .follow_links(false)
            .filter_entry(|entry| entry.file_name() != ".git")
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            if matcher.is_match(entry.path()) {
                found_files.push(entry.into_path());
            }
        }

        found_files
    }
}

impl LineSearcher for WorkspaceSearcher {
    fn search(
        &self,
        base_path: &Path,
        pattern: &Regex,
        globs: &[String],
    ) -> Result<String, SearchError> {
        let matcher = FileMatcher::new(base_path.to_path_buf(), globs, &self.exclude_patterns)?;

        let mut output = String::new();
        for file_path in Self::find_files(&matcher) {
            let content = match std::fs::read_to_string(&file_path) {
                Ok(content) => content,
                Err(e) => {
                    // Binary or unreadable files are skipped, like git grep does for binaries
                    tracing::debug!("Skipping file {:?}: {}", file_path, e);
                    continue;
                }
            };

            for line in content.lines().filter(|line| pattern.is_match(line)) {
                output.push_str(line);
                output.push('\n');
            }
        }

        Ok(output)
    }
}
