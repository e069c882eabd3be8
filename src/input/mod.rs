//! Readers for files the pipeline consumes.

pub mod strings_file;
