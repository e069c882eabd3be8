//! Crate-level error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::analyzer::{
    ExtractError,
    RuleError,
};
use crate::config::ConfigError;
use crate::input::strings_file::LoadError;
use crate::render::{
    RenderError,
    TemplateError,
};

/// Any failure that ends a run.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("Invalid template: {0}")]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// The output file could not be created before loading it
    #[error("Failed to create '{}': {source}", .path.display())]
    Prepare {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
