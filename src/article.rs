//! Article records and the full-text fallback policy.
//!
//! An [`ArticleRecord`] is built once from one text-file path and one
//! metadata entry. The text it carries is chosen by [`resolve_text`]:
//! full-text when the file exists and is long enough, the metadata abstract
//! otherwise, and an empty string when neither is usable.

use crate::error::{CorpusError, OptionExt, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

/// Full-text shorter than this (in characters) is treated as a failed extraction
pub const MIN_FULLTEXT_CHARS: usize = 1000;

/// Journal reference nested inside a metadata entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JournalRef {
    #[serde(default)]
    pub title: Option<String>,
}

/// Bibliographic metadata for one article, as deposited by the harvesting stage.
///
/// Every field is optional at the serde level so that absence can be reported
/// with the entry's index instead of a generic deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataEntry {
    #[serde(default)]
    pub title: Option<String>,
    /// String or integer, e.g. `"2019"` or `2019`
    #[serde(default)]
    pub year: Option<serde_json::Value>,
    #[serde(default)]
    pub journal: Option<JournalRef>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
}

impl MetadataEntry {
    /// Create an entry with all required fields present
    pub fn new(title: impl Into<String>, year: i32, journal: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            year: Some(serde_json::Value::from(year)),
            journal: Some(JournalRef {
                title: Some(journal.into()),
            }),
            abstract_text: None,
        }
    }

    /// Attach an abstract
    pub fn with_abstract(mut self, abstract_text: impl Into<String>) -> Self {
        self.abstract_text = Some(abstract_text.into());
        self
    }

    /// Nested `journal.title`, if present
    pub fn journal_title(&self) -> Option<&str> {
        self.journal.as_ref().and_then(|j| j.title.as_deref())
    }

    /// Integer year, parsed from either a JSON number or a numeric string.
    ///
    /// `index` is the entry's position and only used for error reporting.
    pub fn parse_year(&self, index: usize) -> Result<i32> {
        let value = self.year.as_ref().ok_or_missing(index, "year")?;
        let invalid = || CorpusError::InvalidYear {
            index,
            value: value.to_string(),
        };

        match value {
            serde_json::Value::Number(n) => n
                .as_i64()
                .and_then(|y| i32::try_from(y).ok())
                .ok_or_else(invalid),
            serde_json::Value::String(s) => s.trim().parse::<i32>().map_err(|_| invalid()),
            serde_json::Value::Null => Err(CorpusError::MissingField {
                index,
                field: "year",
            }),
            _ => Err(invalid()),
        }
    }
}

/// Where an article's searchable text came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    /// Extracted full-text of adequate length
    FullText(String),
    /// Metadata abstract substituted for unusable full-text
    Abstract(String),
    /// Neither full-text nor abstract available
    Empty,
}

/// Choose the text for an article.
///
/// A file that is missing, unreadable as UTF-8, or shorter than
/// [`MIN_FULLTEXT_CHARS`] falls back to the abstract, then to nothing.
pub fn resolve_text(path: &Path, abstract_text: Option<&str>) -> TextSource {
    match read_fulltext(path) {
        Some(text) => {
            let chars = text.chars().count();
            if chars >= MIN_FULLTEXT_CHARS {
                return TextSource::FullText(text);
            }
            debug!(path = %path.display(), chars, "Full-text too short, falling back");
        }
        None => debug!(path = %path.display(), "Full-text unavailable, falling back"),
    }

    match abstract_text {
        Some(a) => TextSource::Abstract(a.to_string()),
        None => TextSource::Empty,
    }
}

fn read_fulltext(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }

    match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read full-text file");
            None
        }
    }
}

/// One article: searchable text, provenance, and quality flags.
///
/// Immutable once built; fields are exposed through accessors only.
#[derive(Debug, Clone)]
pub struct ArticleRecord {
    title: String,
    year: i32,
    journal: String,
    text: String,
    char_count: usize,
    is_abstract_fallback: bool,
    is_corrupt: bool,
}

impl ArticleRecord {
    /// Build a record from provenance and resolved text.
    pub fn new(
        title: impl Into<String>,
        year: i32,
        journal: impl Into<String>,
        source: TextSource,
    ) -> Self {
        let (text, is_abstract_fallback, is_corrupt) = match source {
            TextSource::FullText(t) => (t, false, false),
            TextSource::Abstract(t) => (t, true, true),
            TextSource::Empty => (String::new(), false, true),
        };

        Self {
            title: title.into(),
            year,
            journal: journal.into(),
            char_count: text.chars().count(),
            text,
            is_abstract_fallback,
            is_corrupt,
        }
    }

    /// Build a record from one aligned (path, metadata) pair.
    ///
    /// Required metadata fields are checked before the file is touched.
    pub fn from_entry(index: usize, path: &Path, entry: &MetadataEntry) -> Result<Self> {
        let title = entry.title.as_deref().ok_or_missing(index, "title")?;
        let year = entry.parse_year(index)?;
        let journal = entry.journal_title().ok_or_missing(index, "journal.title")?;

        let source = resolve_text(path, entry.abstract_text.as_deref());
        Ok(Self::new(title, year, journal, source))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn journal(&self) -> &str {
        &self.journal
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of [`text`](Self::text) in characters
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    pub fn is_abstract_fallback(&self) -> bool {
        self.is_abstract_fallback
    }

    pub fn is_corrupt(&self) -> bool {
        self.is_corrupt
    }
}

impl fmt::Display for ArticleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {} chars)", self.title, self.year, self.char_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn text_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn test_long_fulltext_is_kept_verbatim() -> Result<()> {
        let content = "Regression discontinuity design. ".repeat(40);
        let file = text_file(&content);
        let entry = MetadataEntry::new("Paper", 2010, "Journal").with_abstract("Unused.");

        let record = ArticleRecord::from_entry(0, file.path(), &entry)?;
        assert_eq!(record.text(), content);
        assert!(!record.is_corrupt());
        assert!(!record.is_abstract_fallback());
        assert_eq!(record.char_count(), content.chars().count());
        Ok(())
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let exact = text_file(&"a".repeat(MIN_FULLTEXT_CHARS));
        assert!(matches!(resolve_text(exact.path(), None), TextSource::FullText(_)));

        let short = text_file(&"a".repeat(MIN_FULLTEXT_CHARS - 1));
        assert_eq!(resolve_text(short.path(), None), TextSource::Empty);
    }

    #[test]
    fn test_threshold_counts_characters_not_bytes() {
        // 600 two-byte characters: 1200 bytes but only 600 chars
        let file = text_file(&"é".repeat(600));
        assert_eq!(
            resolve_text(file.path(), Some("Résumé")),
            TextSource::Abstract("Résumé".to_string())
        );
    }

    #[test]
    fn test_short_file_falls_back_to_abstract() -> Result<()> {
        let file = text_file("short");
        let entry = MetadataEntry::new("Paper", 2003, "Journal").with_abstract("Abstract text.");

        let record = ArticleRecord::from_entry(0, file.path(), &entry)?;
        assert_eq!(record.text(), "Abstract text.");
        assert!(record.is_corrupt());
        assert!(record.is_abstract_fallback());
        assert_eq!(record.char_count(), 14);
        Ok(())
    }

    #[test]
    fn test_missing_file_without_abstract_is_empty() -> Result<()> {
        let entry = MetadataEntry::new("Paper", 2003, "Journal");
        let record = ArticleRecord::from_entry(0, Path::new("/nonexistent/cef_000.txt"), &entry)?;

        assert_eq!(record.text(), "");
        assert_eq!(record.char_count(), 0);
        assert!(record.is_corrupt());
        assert!(!record.is_abstract_fallback());
        Ok(())
    }

    #[test]
    fn test_missing_file_with_abstract() -> Result<()> {
        let entry = MetadataEntry::new("Paper", 2003, "Journal").with_abstract("We use OLS.");
        let record = ArticleRecord::from_entry(0, Path::new("/nonexistent/x.txt"), &entry)?;

        assert_eq!(record.text(), "We use OLS.");
        assert!(record.is_abstract_fallback());
        assert!(record.is_corrupt());
        Ok(())
    }

    #[test]
    fn test_year_parsing() {
        let mut entry = MetadataEntry::new("Paper", 2001, "Journal");
        assert_eq!(entry.parse_year(0).ok(), Some(2001));

        entry.year = Some(serde_json::json!(" 2015 "));
        assert_eq!(entry.parse_year(0).ok(), Some(2015));

        entry.year = Some(serde_json::json!("forthcoming"));
        assert!(matches!(
            entry.parse_year(4),
            Err(CorpusError::InvalidYear { index: 4, .. })
        ));

        entry.year = None;
        assert!(matches!(
            entry.parse_year(2),
            Err(CorpusError::MissingField { index: 2, field: "year" })
        ));
    }

    #[test]
    fn test_missing_required_fields() {
        let path = Path::new("/nonexistent/x.txt");

        let mut entry = MetadataEntry::new("Paper", 2001, "Journal");
        entry.title = None;
        assert!(matches!(
            ArticleRecord::from_entry(7, path, &entry),
            Err(CorpusError::MissingField { index: 7, field: "title" })
        ));

        let mut entry = MetadataEntry::new("Paper", 2001, "Journal");
        entry.journal = Some(JournalRef { title: None });
        assert!(matches!(
            ArticleRecord::from_entry(1, path, &entry),
            Err(CorpusError::MissingField { index: 1, field: "journal.title" })
        ));
    }
}
