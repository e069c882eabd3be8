use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::analyzer::CompiledRule;
use crate::input::strings_file::ParseMode;
use crate::render::{
    EscapeMode,
    Template,
};

/// Default per-record template; mirrors the grammar the loader reads back.
pub const DEFAULT_TEMPLATE: &str =
    "/* {{ description }} */\n\"{{ key }}\" = \"{{ localized_value }}\";\n\n";

/// Default output path.
pub const DEFAULT_OUTPUT: &str = "Assets/en.lproj/Localizable.strings";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "rules[0].pattern")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Formats validation errors as a numbered list.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Which collaborator performs the line search over the project tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum SearcherKind {
    /// `git grep` over tracked files.
    #[default]
    Git,
    /// Directory walk honouring `.gitignore`.
    Walk,
}

/// A regex with one or two capture groups, scoped to files matching `globs`.
///
/// Group 1 is the key; group 2, when present, is the description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRule {
    pub pattern: String,
    pub globs: Vec<String>,
}

impl ExtractionRule {
    #[must_use]
    pub fn new(pattern: impl Into<String>, globs: &[&str]) -> Self {
        Self { pattern: pattern.into(), globs: globs.iter().copied().map(String::from).collect() }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Translation file to read and rewrite.
    pub output: String,

    /// Per-record minijinja template using `key`, `description` and `localized_value`.
    pub template: String,

    pub rules: Vec<ExtractionRule>,

    pub searcher: SearcherKind,

    /// Paths skipped by the walk searcher. `git grep` only sees tracked files anyway.
    pub exclude_patterns: Vec<String>,

    pub parse_mode: ParseMode,
    pub escape: EscapeMode,
}

impl Settings {
    /// # Errors
    /// - No extraction rules
    /// - Invalid regex, or a regex without a capture group
    /// - Invalid glob pattern
    /// - Invalid template
    /// - Empty output path
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.output.is_empty() {
            errors.push(ValidationError::new(
                "output",
                "The output path cannot be empty. Example: \"Assets/en.lproj/Localizable.strings\"",
            ));
        }

        if let Err(e) = Template::parse(&self.template) {
            errors.push(ValidationError::new("template", format!("Invalid template: {e}")));
        }

        if self.rules.is_empty() {
            errors.push(ValidationError::new(
                "rules",
                "At least one extraction rule is required. Example: [{\"pattern\": \"\\\"([^\\\"]+)\\\".localized\", \"globs\": [\"*.swift\"]}]",
            ));
        }

        for (index, rule) in self.rules.iter().enumerate() {
            if let Err(e) = CompiledRule::compile(rule) {
                errors.push(ValidationError::new(format!("rules[{index}].pattern"), e.to_string()));
            }

            if rule.globs.is_empty() {
                errors.push(ValidationError::new(
                    format!("rules[{index}].globs"),
                    "At least one glob is required. Example: [\"*.swift\"]",
                ));
            }

            for (glob_index, pattern) in rule.globs.iter().enumerate() {
                if let Err(e) = globset::Glob::new(pattern) {
                    errors.push(ValidationError::new(
                        format!("rules[{index}].globs[{glob_index}]"),
                        format!("Invalid glob pattern '{pattern}': {e}"),
                    ));
                }
            }
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Swift call sites, `.localized` suffixes, and `^KEY^text` markers in Interface Builder files.
#[must_use]
pub fn default_rules() -> Vec<ExtractionRule> {
    vec![
        ExtractionRule::new(r#"NSLocalizedString\("([^"]+)", comment: "([^"]*)"\)"#, &["*.swift"]),
        ExtractionRule::new(r#""([^"]+)".localized"#, &["*.swift"]),
        ExtractionRule::new(r#"="\^([_A-Z]+)\^([^=]+)"[ >]"#, &["*.storyboard", "*.xib"]),
        // long strings
        ExtractionRule::new(r">\^([_A-Z]+)\^(.*?)<", &["*.storyboard", "*.xib"]),
    ]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: DEFAULT_OUTPUT.to_string(),
            template: DEFAULT_TEMPLATE.to_string(),
            rules: default_rules(),
            searcher: SearcherKind::default(),
            exclude_patterns: vec![],
            parse_mode: ParseMode::default(),
            escape: EscapeMode::default(),
        }
    }
}
