//! The corpus aggregate: year-ordered articles plus their full year range.

use crate::article::ArticleRecord;
use crate::error::{CorpusError, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Immutable, year-ordered collection of articles.
///
/// `years` spans every calendar year from the earliest to the latest article,
/// including years without articles. Per-year aggregations iterate this range
/// and report `0` for empty years.
#[derive(Debug, Clone)]
pub struct Corpus {
    articles: Vec<ArticleRecord>,
    years: Vec<i32>,
}

impl Corpus {
    /// Sort `records` by year (stable) and derive the year range.
    pub fn build(mut records: Vec<ArticleRecord>) -> Result<Self> {
        records.sort_by_key(ArticleRecord::year);

        let (first, last) = match (records.first(), records.last()) {
            (Some(first), Some(last)) => (first.year(), last.year()),
            _ => return Err(CorpusError::EmptyCorpus),
        };

        Ok(Self {
            articles: records,
            years: (first..=last).collect(),
        })
    }

    pub fn articles(&self) -> &[ArticleRecord] {
        &self.articles
    }

    /// Every year from the earliest to the latest article, inclusive
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Sum `f` over the articles of each year in the range; empty years map to 0
    pub fn tally_per_year<F>(&self, f: F) -> BTreeMap<i32, usize>
    where
        F: Fn(&ArticleRecord) -> usize,
    {
        let mut tally: BTreeMap<i32, usize> = self.years.iter().map(|&y| (y, 0)).collect();
        for article in &self.articles {
            if let Some(n) = tally.get_mut(&article.year()) {
                *n += f(article);
            }
        }
        tally
    }

    /// Number of articles in each year of the range
    pub fn articles_per_year(&self) -> BTreeMap<i32, usize> {
        self.tally_per_year(|_| 1)
    }

    /// Articles whose text is not usable full-text
    pub fn corrupt_count(&self) -> usize {
        self.articles.iter().filter(|a| a.is_corrupt()).count()
    }

    pub fn abstract_fallback_count(&self) -> usize {
        self.articles.iter().filter(|a| a.is_abstract_fallback()).count()
    }

    /// One line per article for quick inspection of what was loaded.
    ///
    /// Hiding only the character count still shows the year next to the title.
    pub fn listing(&self, options: ListingOptions) -> Vec<String> {
        self.articles
            .iter()
            .map(|a| match (options.year, options.chars) {
                (true, true) => format!("{} (chars: {:6}) \t {}", a.year(), a.char_count(), a.title()),
                (true, false) => format!("{} \t {}", a.year(), a.title()),
                (false, true) => format!("{:8} \t {}", a.char_count(), a.title()),
                (false, false) => a.title().to_string(),
            })
            .collect()
    }
}

impl fmt::Display for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.years.first(), self.years.last()) {
            (Some(first), Some(last)) => {
                write!(f, "Corpus (n = {}, {}-{})", self.articles.len(), first, last)
            }
            _ => write!(f, "Corpus (n = 0)"),
        }
    }
}

/// Columns shown by [`Corpus::listing`]
#[derive(Debug, Clone, Copy)]
pub struct ListingOptions {
    pub year: bool,
    pub chars: bool,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            year: true,
            chars: true,
        }
    }
}
