//! Turns search output into records using an extraction rule's capture groups.

use std::path::Path;

use crate::analyzer::types::{
    CompiledRule,
    ExtractError,
};
use crate::search::LineSearcher;
use crate::types::Record;

/// Applies a rule's pattern to text and builds a record per match.
///
/// Group 1 is the key. Group 2, when the pattern has one, is the description;
/// otherwise the key doubles as the description. The value is a placeholder
/// equal to the description until someone translates it.
#[must_use]
pub fn extract_records(text: &str, rule: &CompiledRule) -> Vec<Record> {
    rule.regex
        .captures_iter(text)
        .filter_map(|caps| {
            let key = caps.get(1)?.as_str();
            let description = if rule.has_description {
                // An optional group 2 that did not take part in the match reads as empty
                caps.get(2).map_or("", |m| m.as_str())
            } else {
                key
            };
            Some(Record::placeholder(key, description))
        })
        .collect()
}

/// Searches the files under `base_path` matching the rule's globs and extracts records.
///
/// Logs `Found <n> keys with pattern '<pattern>'` once per call.
///
/// # Errors
/// Returns `ExtractError::Search` if the searcher cannot run.
pub fn multi_file_find(
    searcher: &dyn LineSearcher,
    base_path: &Path,
    rule: &CompiledRule,
) -> Result<Vec<Record>, ExtractError> {
    let output = searcher.search(base_path, &rule.regex, &rule.globs).map_err(|source| {
        ExtractError::Search { pattern: rule.pattern().to_string(), source }
    })?;

    let records = extract_records(&output, rule);

    tracing::info!("Found {} keys with pattern '{}'", records.len(), rule.pattern());

    Ok(records)
}

/// Runs every rule in order and concatenates the results.
///
/// # Errors
/// Stops at the first rule whose search fails.
pub fn extract_all(
    searcher: &dyn LineSearcher,
    base_path: &Path,
    rules: &[CompiledRule],
) -> Result<Vec<Record>, ExtractError> {
    let mut records = Vec::new();
    for rule in rules {
        records.extend(multi_file_find(searcher, base_path, rule)?);
    }
    Ok(records)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::cell::RefCell;

    use googletest::prelude::*;
    use googletest::matchers::is_empty as empty;
    use regex::Regex;
    use rstest::*;

    use super::*;
    use crate::config::{
        ExtractionRule,
        default_rules,
    };
    use crate::search::SearchError;

    /// Returns canned output and records the calls it receives.
    struct FakeSearcher {
        /// Output returned for every call
        output: String,
        /// (`base_path`, pattern, globs) per call
        calls: RefCell<Vec<(String, String, Vec<String>)>>,
    }

    impl FakeSearcher {
        fn new(output: &str) -> Self {
            Self { output: output.to_string(), calls: RefCell::new(Vec::new()) }
        }
    }

    impl LineSearcher for FakeSearcher {
        fn search(
            &self,
            base_path: &Path,
            pattern: &Regex,
            globs: &[String],
        ) -> std::result::Result<String, SearchError> {
            self.calls.borrow_mut().push((
                base_path.display().to_string(),
                pattern.as_str().to_string(),
                globs.to_vec(),
            ));
            Ok(self.output.clone())
        }
    }

    struct FailingSearcher;

    impl LineSearcher for FailingSearcher {
        fn search(
            &self,
            _base_path: &Path,
            _pattern: &Regex,
            _globs: &[String],
        ) -> std::result::Result<String, SearchError> {
            Err(SearchError::Failed {
                program: "git".to_string(),
                code: Some(128),
                stderr: "fatal: not a git repository".to_string(),
            })
        }
    }

    fn rule(index: usize) -> CompiledRule {
        CompiledRule::compile(&default_rules()[index]).unwrap()
    }

    #[rstest]
    fn extract_key_and_comment_from_swift_call() {
        let text = r#"label.text = NSLocalizedString("LOGIN_TITLE", comment: "Login screen title")"#;

        let records = extract_records(text, &rule(0));

        assert_eq!(records, vec![Record::new("LOGIN_TITLE", "Login screen title", "Login screen title")]);
    }

    #[rstest]
    fn extract_key_only_uses_key_as_description() {
        let text = "button.setTitle(\"SIGN_UP\".localized, for: .normal)\n";

        let records = extract_records(text, &rule(1));

        assert_eq!(records, vec![Record::new("SIGN_UP", "SIGN_UP", "SIGN_UP")]);
    }

    #[rstest]
    fn extract_multiple_matches_per_line() {
        let text = "f(\"A\".localized, \"B\".localized)\ng(\"C\".localized)\n";

        let records = extract_records(text, &rule(1));

        let keys: Vec<_> = records.iter().map(|r| r.key.as_str()).collect();
        assert_that!(keys, elements_are![eq(&"A"), eq(&"B"), eq(&"C")]);
    }

    #[rstest]
    #[case::attribute(
        r#"<button title="^DONE^Done" id="x1">"#,
        2,
        Record::new("DONE", "Done", "Done")
    )]
    #[case::long_text(
        "<string key=\"text\">^TERMS_BODY^By signing up you agree</string>",
        3,
        Record::new("TERMS_BODY", "By signing up you agree", "By signing up you agree")
    )]
    fn extract_interface_builder_markers(
        #[case] text: &str,
        #[case] rule_index: usize,
        #[case] expected: Record,
    ) {
        let records = extract_records(text, &rule(rule_index));

        assert_eq!(records, vec![expected]);
    }

    #[rstest]
    fn extract_optional_description_group_missing() {
        let rule =
            CompiledRule::compile(&ExtractionRule::new(r"KEY\((\w+)(?:, (\w+))?\)", &["*.m"]))
                .unwrap();

        let records = extract_records("KEY(ONLY)", &rule);

        assert_eq!(records, vec![Record::new("ONLY", "", "")]);
    }

    #[rstest]
    fn extract_from_empty_output() {
        assert_that!(extract_records("", &rule(0)), empty());
    }

    #[rstest]
    fn multi_file_find_passes_base_path_and_globs() {
        let searcher = FakeSearcher::new("<label text=\"^HELLO^Hello\" >\n");
        let rule = rule(2);

        let records = multi_file_find(&searcher, Path::new("/project"), &rule).unwrap();

        assert_eq!(records, vec![Record::new("HELLO", "Hello", "Hello")]);
        let calls = searcher.calls.borrow();
        assert_that!(calls.len(), eq(1));
        assert_that!(calls[0].0, eq("/project"));
        assert_that!(calls[0].1, eq(rule.pattern()));
        assert_that!(calls[0].2, elements_are![eq("*.storyboard"), eq("*.xib")]);
    }

    #[rstest]
    fn multi_file_find_propagates_search_failure() {
        let result = multi_file_find(&FailingSearcher, Path::new("/project"), &rule(0));

        let error = result.unwrap_err();
        assert!(matches!(error, ExtractError::Search { .. }));
        assert_that!(error.to_string(), contains_substring("NSLocalizedString"));
    }

    #[rstest]
    fn extract_all_accumulates_in_rule_order() {
        let searcher = FakeSearcher::new(concat!(
            "NSLocalizedString(\"FIRST\", comment: \"First\")\n",
            "\"SECOND\".localized\n",
        ));
        let rules = vec![rule(0), rule(1)];

        let records = extract_all(&searcher, Path::new("/project"), &rules).unwrap();

        let keys: Vec<_> = records.iter().map(|r| r.key.as_str()).collect();
        assert_that!(keys, elements_are![eq(&"FIRST"), eq(&"SECOND")]);
        assert_that!(searcher.calls.borrow().len(), eq(2));
    }
}
