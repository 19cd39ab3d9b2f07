//! # articlecorpus
//!
//! Journal article corpus with pattern frequency statistics.
//!
//! Builds a searchable corpus from per-article full-text files (falling back
//! to metadata abstracts) and tallies methodology and data-source keywords
//! per article and per publication year.
//!
//! ## Modules
//!
//! - [`article`] - Article records and the full-text fallback policy
//! - [`loader`] - Pairing text files with metadata entries
//! - [`corpus`] - Year-ordered corpus aggregate
//! - [`search`] - Pattern counting and per-year reductions
//! - [`queries`] - Named query configuration
//! - [`export`] - Tabular CSV export
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use articlecorpus::{corpus::Corpus, export, loader, queries::QuerySet};
//! use std::path::Path;
//!
//! fn main() -> articlecorpus::Result<()> {
//!     let entries = loader::read_metadata(Path::new("article_subset_master.json"))?;
//!     let paths = loader::read_path_list(Path::new("paths.txt"))?;
//!     let corpus = Corpus::build(loader::load(&paths, &entries)?)?;
//!
//!     let table = export::export(&corpus, &QuerySet::defaults()?);
//!     table.save(Path::new("article_metadata.csv"))?;
//!     Ok(())
//! }
//! ```

pub mod article;
pub mod corpus;
pub mod error;
pub mod export;
pub mod loader;
pub mod queries;
pub mod search;

pub use error::{CorpusError, Result};
