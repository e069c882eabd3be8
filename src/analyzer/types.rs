//! Types for the analyzer module

use regex::Regex;
use thiserror::Error;

use crate::config::ExtractionRule;
use crate::search::SearchError;

/// An extraction rule with its pattern compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// Compiled pattern
    pub regex: Regex,
    /// Globs the search is scoped to
    pub globs: Vec<String>,
    /// Whether capture group 2 holds a description
    pub has_description: bool,
}

impl CompiledRule {
    /// Compiles a rule, checking that its pattern captures at least the key.
    ///
    /// # Errors
    /// - The pattern is not a valid regex
    /// - The pattern has no capture group
    pub fn compile(rule: &ExtractionRule) -> Result<Self, RuleError> {
        let regex = Regex::new(&rule.pattern).map_err(|source| RuleError::InvalidPattern {
            pattern: rule.pattern.clone(),
            source,
        })?;

        // captures_len includes the implicit whole-match group
        let groups = regex.captures_len().saturating_sub(1);
        if groups == 0 {
            return Err(RuleError::NoCaptureGroup { pattern: rule.pattern.clone() });
        }

        Ok(Self { regex, globs: rule.globs.clone(), has_description: groups >= 2 })
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

#[derive(Error, Debug)]
pub enum RuleError {
    /// The pattern failed to compile
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    /// The pattern has nothing to use as a key
    #[error("Pattern '{pattern}' needs a capture group for the key")]
    NoCaptureGroup { pattern: String },
}

/// Defines errors that may occur during extraction
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The search collaborator failed
    #[error("Search failed for pattern '{pattern}': {source}")]
    Search {
        pattern: String,
        #[source]
        source: SearchError,
    },
}
