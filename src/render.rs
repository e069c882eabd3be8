//! Renders records through a per-record template.

use std::borrow::Cow;
use std::path::{
    Path,
    PathBuf,
};

use minijinja::{
    Environment,
    UndefinedBehavior,
    context,
};
use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::types::Record;

#[derive(Error, Debug)]
pub enum TemplateError {
    /// The template does not compile
    #[error("syntax error: {0}")]
    Syntax(#[source] minijinja::Error),
    /// The template compiles but cannot be expanded, e.g. it names an unknown variable
    #[error("cannot expand record: {0}")]
    Expand(#[source] minijinja::Error),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Failed to write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How quoted fields are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EscapeMode {
    /// Backslash-escape bare `"` in `key` and `localized_value`.
    #[default]
    Quotes,
    /// Write fields verbatim.
    None,
}

/// A validated per-record template.
///
/// Templates use minijinja syntax with three variables: `key`, `description`
/// and `localized_value`. Any other variable is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// minijinja source
    source: String,
}

impl Template {
    /// Compiles the template and expands it once to reject unknown variables.
    ///
    /// # Errors
    /// Returns `TemplateError` for syntax errors and undefined variables.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let template = Self { source: source.to_owned() };
        render_records(&[Record::new("", "", "")], &template, EscapeMode::None)?;
        Ok(template)
    }
}

/// Environment shared by every expansion: output kept byte for byte, unknown names are errors.
fn environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env
}

/// Escapes a quoted field according to `escape`.
fn escape_field(value: &str, escape: EscapeMode) -> Cow<'_, str> {
    match escape {
        EscapeMode::Quotes => escape_quotes(value),
        EscapeMode::None => Cow::Borrowed(value),
    }
}

/// Backslash-escapes every `"` that is not already escaped.
///
/// Existing escape sequences are kept as they are, so escaping an already
/// escaped value is a no-op. A dangling trailing backslash is doubled so it
/// cannot swallow the closing quote.
#[must_use]
pub fn escape_quotes(value: &str) -> Cow<'_, str> {
    if !value.contains(['"', '\\']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 2);
    let mut backslashes = 0usize;
    for c in value.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' if backslashes % 2 == 0 => {
                escaped.push('\\');
                backslashes = 0;
            }
            _ => backslashes = 0,
        }
        escaped.push(c);
    }
    if backslashes % 2 == 1 {
        escaped.push('\\');
    }

    if escaped == value { Cow::Borrowed(value) } else { Cow::Owned(escaped) }
}

/// Expands the template once per record, in the given order.
///
/// # Errors
/// Returns `TemplateError` if the template fails to compile or expand.
pub fn render_records(
    records: &[Record],
    template: &Template,
    escape: EscapeMode,
) -> Result<String, TemplateError> {
    let env = environment();
    let compiled = env.template_from_str(&template.source).map_err(TemplateError::Syntax)?;

    let mut out = String::new();
    for record in records {
        let expanded = compiled
            .render(context! {
                key => escape_field(&record.key, escape),
                description => &record.description,
                localized_value => escape_field(&record.localized_value, escape),
            })
            .map_err(TemplateError::Expand)?;
        out.push_str(&expanded);
    }
    Ok(out)
}

/// Renders records and overwrites `output` with the result.
///
/// # Errors
/// Returns `RenderError` if expansion fails or the file cannot be written.
pub fn write_records(
    records: &[Record],
    template: &Template,
    output: &Path,
    escape: EscapeMode,
) -> Result<(), RenderError> {
    let rendered = render_records(records, template, escape)?;
    std::fs::write(output, rendered)
        .map_err(|source| RenderError::Io { path: output.to_path_buf(), source })?;

    tracing::info!("Render keys into {}", output.display());
    Ok(())
}

/// Describes a template for logs, with control characters escaped.
#[must_use]
pub fn describe(template: &Template) -> String {
    template.source.escape_debug().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::DEFAULT_TEMPLATE;
    use crate::input::strings_file::{
        ParseMode,
        parse_records,
    };

    fn default_template() -> Template {
        Template::parse(DEFAULT_TEMPLATE).unwrap()
    }

    #[rstest]
    fn render_default_template() {
        let records = vec![
            Record::new("BYE", "BYE", "BYE"),
            Record::new("HELLO", "Greeting", "Bonjour"),
        ];

        let rendered = render_records(&records, &default_template(), EscapeMode::Quotes).unwrap();

        assert_eq!(
            rendered,
            "/* BYE */\n\"BYE\" = \"BYE\";\n\n/* Greeting */\n\"HELLO\" = \"Bonjour\";\n\n"
        );
    }

    #[rstest]
    fn render_custom_template_with_literal_braces() {
        let template = Template::parse(
            "{{ \"{\" }}{{ key }}{{ \"}\" }}: {{ localized_value }} // {{ description }}\n",
        )
        .unwrap();

        let rendered =
            render_records(&[Record::new("K", "desc", "value")], &template, EscapeMode::None)
                .unwrap();

        assert_eq!(rendered, "{K}: value // desc\n");
    }

    #[rstest]
    fn render_no_records_is_empty() {
        assert_that!(render_records(&[], &default_template(), EscapeMode::Quotes), ok(eq("")));
    }

    #[rstest]
    fn parse_rejects_unknown_variable() {
        let result = Template::parse("{{ key }} = {{ value }}");

        assert!(matches!(result, Err(TemplateError::Expand(_))));
    }

    #[rstest]
    #[case::unclosed_expression("\"{{ key\" = 1")]
    #[case::unclosed_block("{% if key %}{{ key }}")]
    #[case::unknown_tag("{% frobnicate %}")]
    fn parse_rejects_bad_syntax(#[case] text: &str) {
        assert!(matches!(Template::parse(text), Err(TemplateError::Syntax(_))));
    }

    #[rstest]
    #[case::plain("Hello", "Hello")]
    #[case::bare_quote(r#"Say "hi""#, r#"Say \"hi\""#)]
    #[case::already_escaped(r#"Say \"hi\""#, r#"Say \"hi\""#)]
    #[case::escaped_backslash_then_quote(r#"a\\"b"#, r#"a\\\"b"#)]
    #[case::newline_escape(r"Line\nbreak", r"Line\nbreak")]
    #[case::dangling_backslash(r"ends\", r"ends\\")]
    fn escape_quotes_cases(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_quotes(input), expected);
    }

    #[rstest]
    fn render_escapes_quotes_in_key_and_value_only() {
        let record = Record::new("QUOTE", "The \"quote\" label", "Il a dit \"oui\"");

        let escaped =
            render_records(&[record.clone()], &default_template(), EscapeMode::Quotes).unwrap();
        let raw = render_records(&[record], &default_template(), EscapeMode::None).unwrap();

        assert_eq!(
            escaped,
            "/* The \"quote\" label */\n\"QUOTE\" = \"Il a dit \\\"oui\\\"\";\n\n"
        );
        assert_eq!(raw, "/* The \"quote\" label */\n\"QUOTE\" = \"Il a dit \"oui\"\";\n\n");
    }

    #[rstest]
    #[case::quotes(EscapeMode::Quotes)]
    #[case::none(EscapeMode::None)]
    fn render_of_loaded_file_is_byte_identical(#[case] escape: EscapeMode) {
        let text = concat!(
            "/* Cancel button */\n\"CANCEL\" = \"Annuler\";\n\n",
            "/* Quote */\n\"QUOTE\" = \"Il a dit \\\"oui\\\"\";\n\n",
            "/* Multi line */\n\"TERMS\" = \"Ligne 1\\nLigne 2\";\n\n",
        );

        let records = parse_records(text, ParseMode::Strict, escape).unwrap();
        let rendered = render_records(&records, &default_template(), escape).unwrap();

        assert_eq!(rendered, text);
    }

    #[rstest]
    fn unescaped_output_loads_back_with_raw_values() {
        let records = vec![Record::new("TERMS", "Agree to \"Terms\"", "Accepter les \"Conditions\"")];

        let rendered = render_records(&records, &default_template(), EscapeMode::None).unwrap();
        let loaded = parse_records(&rendered, ParseMode::Strict, EscapeMode::None).unwrap();

        assert_eq!(loaded, records);
    }

    #[rstest]
    fn write_records_overwrites_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Localizable.strings");
        std::fs::write(&path, "old content that is much longer than the new one\n").unwrap();

        write_records(
            &[Record::new("OK", "OK", "OK")],
            &default_template(),
            &path,
            EscapeMode::Quotes,
        )
        .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "/* OK */\n\"OK\" = \"OK\";\n\n");
    }

    #[rstest]
    fn write_records_to_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing/Localizable.strings");

        let result = write_records(&[], &default_template(), &path, EscapeMode::Quotes);

        let error = result.unwrap_err();
        assert!(matches!(&error, RenderError::Io { path: p, .. } if *p == path));
        assert_that!(error.to_string(), contains_substring("missing"));
    }

    #[rstest]
    fn describe_default_template() {
        assert_eq!(
            describe(&default_template()),
            r#"/* {{ description }} */\n\"{{ key }}\" = \"{{ localized_value }}\";\n\n"#
        );
    }
}
