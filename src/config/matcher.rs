//! File pattern matcher for the walk searcher.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid include pattern '{pattern}': {source}")]
    InvalidIncludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches project files against a rule's globs and the configured exclusions.
///
/// Globs follow git pathspec semantics: `*` also matches `/`, so `*.xib`
/// matches at any depth.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    /// Root all relative paths are computed from.
    project_root: PathBuf,
    /// Compiled include globs.
    include_set: GlobSet,
    /// Compiled exclude globs.
    exclude_set: GlobSet,
}

impl FileMatcher {
    /// Creates a new matcher from include and exclude globs.
    pub fn new(
        project_root: PathBuf,
        include_patterns: &[String],
        exclude_patterns: &[String],
    ) -> Result<Self, MatcherError> {
        let include_set = Self::build_glob_set(include_patterns, |pattern, source| {
            MatcherError::InvalidIncludePattern { pattern, source }
        })?;

        let exclude_set = Self::build_glob_set(exclude_patterns, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        Ok(Self { project_root, include_set, exclude_set })
    }

    /// Builds a glob set, mapping per-pattern failures through `make_error`.
    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Returns true if the path matches an include glob but no exclude glob.
    ///
    /// The path must be absolute and under the project root.
    #[must_use]
    pub fn is_match(&self, absolute_path: &Path) -> bool {
        let Some(relative_path) = absolute_path.strip_prefix(&self.project_root).ok() else {
            return false;
        };

        self.include_set.is_match(relative_path) && !self.exclude_set.is_match(relative_path)
    }
}
