//! Table export: one row per article, fixed metadata columns followed by one
//! match count per named query.

use crate::article::ArticleRecord;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::queries::QuerySet;
use crate::search::{count_matches, Pattern};
use futures::future::try_join_all;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Columns read directly off each article, in output order
pub const FIXED_COLUMNS: &[&str] = &[
    "journal",
    "title",
    "year",
    "charCount",
    "isCorrupt",
    "isAbstractFallback",
];

/// One exported article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub journal: String,
    pub title: String,
    pub year: i32,
    pub char_count: usize,
    pub is_corrupt: bool,
    pub is_abstract_fallback: bool,
    /// Match counts, one per query column in declaration order
    pub counts: Vec<usize>,
}

impl Row {
    fn new(article: &ArticleRecord, counts: Vec<usize>) -> Self {
        Self {
            journal: article.journal().to_string(),
            title: article.title().to_string(),
            year: article.year(),
            char_count: article.char_count(),
            is_corrupt: article.is_corrupt(),
            is_abstract_fallback: article.is_abstract_fallback(),
            counts,
        }
    }

    /// Field values as written to the delimited file
    pub fn fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.journal.clone(),
            self.title.clone(),
            self.year.to_string(),
            self.char_count.to_string(),
            bool_token(self.is_corrupt).to_string(),
            bool_token(self.is_abstract_fallback).to_string(),
        ];
        fields.extend(self.counts.iter().map(usize::to_string));
        fields
    }
}

/// Booleans are written as `True`/`False`, the format downstream consumers read
fn bool_token(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Exported table: header plus rows in corpus (year-ascending) order
#[derive(Debug, Clone)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Assemble from per-column counts; `columns[q][i]` is query `q` on article `i`
    fn assemble(corpus: &Corpus, queries: &QuerySet, columns: Vec<Vec<usize>>) -> Self {
        let header = FIXED_COLUMNS
            .iter()
            .copied()
            .chain(queries.names())
            .map(str::to_string)
            .collect();

        let rows = corpus
            .articles()
            .iter()
            .enumerate()
            .map(|(i, article)| Row::new(article, columns.iter().map(|col| col[i]).collect()))
            .collect();

        Self { header, rows }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Write header and rows as CSV.
    ///
    /// Fields containing the delimiter, a quote, or a newline are quoted.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        wtr.write_record(&self.header)?;
        for row in &self.rows {
            wtr.write_record(row.fields())?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Write the table to `path`, replacing any existing file
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write_csv(file)?;
        info!(path = %path.display(), rows = self.rows.len(), columns = self.header.len(), "Saved table");
        Ok(())
    }
}

/// Match counts of one pattern for every article, in corpus order
fn column_counts(corpus: &Corpus, pattern: &Pattern) -> Vec<usize> {
    corpus
        .articles()
        .iter()
        .map(|a| count_matches(a.text(), pattern))
        .collect()
}

/// Build the table by scanning the corpus once per query
pub fn export(corpus: &Corpus, queries: &QuerySet) -> Table {
    let columns = queries
        .columns()
        .iter()
        .map(|(_, pattern)| column_counts(corpus, pattern))
        .collect();

    Table::assemble(corpus, queries, columns)
}

/// Build the table with each query column scanned on the blocking pool.
///
/// Columns are independent; results are joined back in declaration order so
/// the output is identical to [`export`].
pub async fn export_concurrent(corpus: Arc<Corpus>, queries: &QuerySet) -> Result<Table> {
    let tasks = queries.columns().iter().map(|(name, pattern)| {
        let corpus = Arc::clone(&corpus);
        let pattern = pattern.clone();
        let name = name.clone();

        tokio::task::spawn_blocking(move || {
            let counts = column_counts(&corpus, &pattern);
            debug!(
                column = %name,
                pattern = pattern.as_str(),
                case_sensitive = pattern.is_case_sensitive(),
                total = counts.iter().sum::<usize>(),
                "Scanned column"
            );
            counts
        })
    });

    let columns = try_join_all(tasks).await?;
    Ok(Table::assemble(&corpus, queries, columns))
}
