//! Core types used throughout the project.

/// A single localizable string.
///
/// `key` is the identity used when merging; the other two fields travel with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    pub key: String,
    /// Human-readable context, rendered as the comment above the entry.
    pub description: String,
    pub localized_value: String,
}

impl Record {
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        description: impl Into<String>,
        localized_value: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            localized_value: localized_value.into(),
        }
    }

    /// Creates an untranslated record: the value is a placeholder equal to the description.
    #[must_use]
    pub fn placeholder(key: impl Into<String>, description: impl Into<String>) -> Self {
        let description = description.into();
        Self { key: key.into(), localized_value: description.clone(), description }
    }
}
