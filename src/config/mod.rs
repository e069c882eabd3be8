//! Settings: defaults, the `.strings-sync.json` file, and CLI overrides.

/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Glob matcher for the walk searcher
mod matcher;
/// Configuration types and settings
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::{
    ConfigManager,
    Overrides,
};
pub use matcher::{
    FileMatcher,
    MatcherError,
};
pub use types::{
    ConfigError,
    DEFAULT_OUTPUT,
    DEFAULT_TEMPLATE,
    ExtractionRule,
    SearcherKind,
    Settings,
    ValidationError,
    default_rules,
};
