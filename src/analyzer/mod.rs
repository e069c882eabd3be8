//! Record extraction from search output.

pub mod extractor;
mod types;

pub use extractor::{
    extract_all,
    extract_records,
    multi_file_find,
};
pub use types::{
    CompiledRule,
    ExtractError,
    RuleError,
};
