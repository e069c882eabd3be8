//! strings-sync
//!
//! Extracts localizable keys from a source tree and merges them into a
//! `Localizable.strings` file, keeping translations that already exist.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod input;
pub mod merge;
pub mod pipeline;
pub mod render;
pub mod search;
#[cfg(test)]
mod test_utils;
pub mod types;

pub use error::Error;
pub use pipeline::{
    RunOptions,
    RunSummary,
    run,
};
pub use types::Record;
