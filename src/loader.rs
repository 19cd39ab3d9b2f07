//! Corpus loader: pairs text-file paths with metadata entries.
//!
//! The harvesting stage deposits a JSON array of metadata entries and one
//! plain-text file per article. Pairing is positional: `paths[i]` belongs to
//! `entries[i]`. Lengths are checked, identities are not.

use crate::article::{ArticleRecord, MetadataEntry};
use crate::error::{CorpusError, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Build one record per aligned (path, entry) pair, in input order.
///
/// Fails on the first entry missing a required field. Missing or short text
/// files are not errors; see [`crate::article::resolve_text`].
pub fn load<P: AsRef<Path>>(paths: &[P], entries: &[MetadataEntry]) -> Result<Vec<ArticleRecord>> {
    if paths.len() != entries.len() {
        return Err(CorpusError::LengthMismatch {
            paths: paths.len(),
            entries: entries.len(),
        });
    }

    let records = paths
        .iter()
        .zip(entries)
        .enumerate()
        .map(|(i, (path, entry))| ArticleRecord::from_entry(i, path.as_ref(), entry))
        .collect::<Result<Vec<_>>>()?;

    let fallback = records.iter().filter(|r| r.is_abstract_fallback()).count();
    let corrupt = records.iter().filter(|r| r.is_corrupt()).count();
    info!(
        articles = records.len(),
        corrupt,
        abstract_fallback = fallback,
        "Loaded articles"
    );

    Ok(records)
}

/// Parse a JSON array of metadata entries.
///
/// Elements may be flat entries or DOAJ-style `{"bibjson": {...}}` records;
/// a `bibjson` key always selects the wrapped form. An element whose fields
/// have the wrong shape is reported with its index.
pub fn parse_metadata(json: &str) -> Result<Vec<MetadataEntry>> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(json)?;

    raw.into_iter()
        .enumerate()
        .map(|(index, mut value)| {
            let entry = match value.get_mut("bibjson").map(serde_json::Value::take) {
                Some(bibjson) => bibjson,
                None => value,
            };
            serde_json::from_value(entry).map_err(|source| CorpusError::InvalidEntry { index, source })
        })
        .collect()
}

/// Read a JSON array of metadata entries from disk
pub fn read_metadata(path: &Path) -> Result<Vec<MetadataEntry>> {
    let content = std::fs::read_to_string(path)?;
    let entries = parse_metadata(&content)?;
    info!(path = %path.display(), entries = entries.len(), "Read metadata");
    Ok(entries)
}

/// Read a newline-separated list of text-file paths, skipping blank lines
pub fn read_path_list(path: &Path) -> Result<Vec<PathBuf>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(PathBuf::from)
        .collect())
}

/// Keep entries from the named journals, ordered by journal title.
///
/// The sort is stable, so entries of one journal keep their input order.
/// Entries without a journal title are dropped.
pub fn select_journals(entries: &[MetadataEntry], titles: &[&str]) -> Vec<MetadataEntry> {
    let wanted: HashSet<&str> = titles.iter().copied().collect();

    let mut selected: Vec<MetadataEntry> = entries
        .iter()
        .filter(|e| e.journal_title().is_some_and(|t| wanted.contains(t)))
        .cloned()
        .collect();

    selected.sort_by(|a, b| a.journal_title().cmp(&b.journal_title()));
    selected
}

/// Text files named `{prefix}_{i:03}.txt` for `i` in `0..count`
pub fn numbered_paths(dir: &Path, prefix: &str, count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| dir.join(format!("{}_{:03}.txt", prefix, i)))
        .collect()
}

/// A journal whose article texts live under a common file prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalSource {
    pub title: String,
    pub prefix: String,
}

impl JournalSource {
    /// Parse `"Journal Title=prefix"`; the last `=` separates the two
    pub fn parse(value: &str) -> Result<Self> {
        let (title, prefix) = value
            .rsplit_once('=')
            .ok_or_else(|| CorpusError::Config(format!("Expected TITLE=PREFIX, got {:?}", value)))?;

        let (title, prefix) = (title.trim(), prefix.trim());
        if title.is_empty() || prefix.is_empty() {
            return Err(CorpusError::Config(format!(
                "Empty journal title or prefix in {:?}",
                value
            )));
        }

        Ok(Self {
            title: title.to_string(),
            prefix: prefix.to_string(),
        })
    }
}

/// Produce index-aligned paths and entries for a set of journals.
///
/// Journals are visited in title order, matching [`select_journals`]. Each
/// journal's files are numbered from `000` in the order its entries appear.
pub fn plan_journal_sources(
    entries: &[MetadataEntry],
    sources: &[JournalSource],
    dir: &Path,
) -> (Vec<PathBuf>, Vec<MetadataEntry>) {
    let mut ordered: Vec<&JournalSource> = sources.iter().collect();
    ordered.sort_by(|a, b| a.title.cmp(&b.title));

    let mut paths = Vec::new();
    let mut selected = Vec::new();

    for source in ordered {
        let journal_entries = select_journals(entries, &[source.title.as_str()]);
        debug!(
            journal = %source.title,
            prefix = %source.prefix,
            articles = journal_entries.len(),
            "Planned journal"
        );
        paths.extend(numbered_paths(dir, &source.prefix, journal_entries.len()));
        selected.extend(journal_entries);
    }

    (paths, selected)
}
