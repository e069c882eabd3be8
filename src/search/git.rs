//! `git grep` adapter.

use std::path::{
    Path,
    PathBuf,
};
use std::process::Command;

use regex::Regex;

use super::{
    LineSearcher,
    SearchError,
};

/// Searches tracked files with `git grep -h -E`.
#[derive(Debug, Clone)]
pub struct GitGrep {
    /// Git executable.
    program: PathBuf,
}

impl Default for GitGrep {
    fn default() -> Self {
        Self { program: PathBuf::from("git") }
    }
}

impl GitGrep {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    /// Arguments passed to git, in order.
    fn args<'a>(pattern: &'a Regex, globs: &'a [String]) -> Vec<&'a str> {
        // -e keeps a pattern starting with '-' from being read as an option
        let mut args = vec!["grep", "--no-color", "-h", "-E", "-e", pattern.as_str(), "--"];
        args.extend(globs.iter().map(String::as_str));
        args
    }
}

impl LineSearcher for GitGrep {
    fn search(
        &self,
        base_path: &Path,
        pattern: &Regex,
        globs: &[String],
    ) -> Result<String, SearchError> {
        let program = self.program.display().to_string();
        tracing::debug!(
            base_path = %base_path.display(),
            pattern = pattern.as_str(),
            ?globs,
            "Running git grep"
        );

        let output = Command::new(&self.program)
            .args(Self::args(pattern, globs))
            .current_dir(base_path)
            .output()
            .map_err(|source| SearchError::Spawn { program: program.clone(), source })?;

        // 1 means no line matched
        match output.status.code() {
            Some(0) => Ok(String::from_utf8_lossy(&output.stdout).into_owned()),
            Some(1) => Ok(String::new()),
            code => Err(SearchError::Failed {
                program,
                code,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
        }
    }
}
