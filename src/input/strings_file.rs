//! Loader for `Localizable.strings` files.
//!
//! Only the block shape the renderer writes is understood:
//!
//! ```text
//! /* <description> */
//! "<key>" = "<localized_value>";
//! ```

use std::path::{
    Path,
    PathBuf,
};
use std::sync::LazyLock;

use regex::Regex;
use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::render::EscapeMode;
use crate::types::Record;

/// Comment line followed by a quoted assignment. Quoted parts may contain backslash escapes.
#[allow(clippy::expect_used)]
static ESCAPED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?mR)^/\* (.*) \*/\r?\n"((?:[^"\\\r\n]|\\.)*)" = "((?:[^"\\\r\n]|\\.)*)";$"#,
    )
    .expect("escaped block pattern is a valid regex")
});

/// Same shape, quoted parts taken greedily up to `" = "` and `";` so bare quotes are kept.
#[allow(clippy::expect_used)]
static RAW_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?mR)^/\* (.*) \*/\r?\n"(.*)" = "(.*)";$"#)
        .expect("raw block pattern is a valid regex")
});

/// Block grammar matching what the renderer writes in `escape` mode.
fn block_pattern(escape: EscapeMode) -> &'static Regex {
    match escape {
        EscapeMode::Quotes => &ESCAPED_BLOCK,
        EscapeMode::None => &RAW_BLOCK,
    }
}

/// How text that is not part of a block is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParseMode {
    /// Skip it.
    #[default]
    Lenient,
    /// Fail on the first non-blank line outside a block.
    Strict,
}

/// A non-blank line that is not part of any block.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: unexpected content '{content}'")]
pub struct MalformedLine {
    /// 1-based line number.
    pub line: usize,
    pub content: String,
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed strings file '{}': {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: MalformedLine,
    },
}

/// Loads records from a strings file, in file order.
///
/// `escape` must be the mode the file was written with: with `EscapeMode::None`
/// values may hold bare `"`.
/// The file must exist; callers that want to start from nothing create it first.
pub fn load_records(
    path: &Path,
    mode: ParseMode,
    escape: EscapeMode,
) -> Result<Vec<Record>, LoadError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;

    let records = parse_records(&text, mode, escape)
        .map_err(|source| LoadError::Malformed { path: path.to_path_buf(), source })?;

    tracing::debug!(path = %path.display(), count = records.len(), "Loaded existing records");
    Ok(records)
}

/// Parses records from strings file text, in order of appearance.
///
/// # Examples
/// ```
/// use strings_sync::input::strings_file::{ParseMode, parse_records};
/// use strings_sync::render::EscapeMode;
///
/// let text = "/* Cancel button */\n\"CANCEL\" = \"Annuler\";\n\n";
/// let records = parse_records(text, ParseMode::Strict, EscapeMode::Quotes).unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].key, "CANCEL");
/// assert_eq!(records[0].description, "Cancel button");
/// assert_eq!(records[0].localized_value, "Annuler");
/// ```
pub fn parse_records(
    text: &str,
    mode: ParseMode,
    escape: EscapeMode,
) -> Result<Vec<Record>, MalformedLine> {
    let mut records = Vec::new();
    let mut last_end = 0;

    for caps in block_pattern(escape).captures_iter(text) {
        let (Some(whole), Some(description), Some(key), Some(value)) =
            (caps.get(0), caps.get(1), caps.get(2), caps.get(3))
        else {
            continue;
        };

        check_gap(text, last_end, whole.start(), mode)?;
        last_end = whole.end();

        records.push(Record::new(key.as_str(), description.as_str(), value.as_str()));
    }

    check_gap(text, last_end, text.len(), mode)?;

    Ok(records)
}

/// Inspects the text between two blocks.
fn check_gap(text: &str, start: usize, end: usize, mode: ParseMode) -> Result<(), MalformedLine> {
    let Some(malformed) = find_malformed_line(text, start, end) else {
        return Ok(());
    };

    match mode {
        ParseMode::Lenient => {
            tracing::debug!(line = malformed.line, "Skipping malformed content");
            Ok(())
        }
        ParseMode::Strict => Err(malformed),
    }
}

/// Returns the first non-blank line in `text[start..end]`, with its line number in `text`.
fn find_malformed_line(text: &str, start: usize, end: usize) -> Option<MalformedLine> {
    let gap = text.get(start..end)?;
    let offset = gap.find(|c: char| !c.is_whitespace())?;

    let absolute = start + offset;
    let before = text.get(..absolute).unwrap_or_default();
    let line = before.matches('\n').count() + 1;

    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let content = text
        .get(line_start..)
        .and_then(|rest| rest.lines().next())
        .unwrap_or_default()
        .to_string();

    Some(MalformedLine { line, content })
}
