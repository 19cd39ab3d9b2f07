//! Named pattern queries: the configurable columns of the exported table.
//!
//! Queries are declared as `(column, pattern, case_sensitive)` and compiled
//! once into a [`QuerySet`]. A bad regex or a clashing column name is rejected
//! here, before any article is scanned.

use crate::error::{CorpusError, Result};
use crate::export::FIXED_COLUMNS;
use crate::search::Pattern;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// One column definition as written in a query file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedQuery {
    pub column: String,
    pub pattern: String,
    #[serde(default)]
    pub case_sensitive: bool,
}

impl NamedQuery {
    pub fn new(column: impl Into<String>, pattern: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            column: column.into(),
            pattern: pattern.into(),
            case_sensitive,
        }
    }
}

/// Methodology and data-source keywords tallied by default
pub fn default_queries() -> Vec<NamedQuery> {
    vec![
        NamedQuery::new("r_did", r"(D|d)ifference(\s|-)?in-?(D|d)ifferences?|D(i|I)D", true),
        NamedQuery::new("r_rdd", "regression discontinuity", false),
        NamedQuery::new("r_internet", "internet", false),
        NamedQuery::new("r_ols", "(OLS)|((O|o)rdinary (L|l)east (S|s)quares)", true),
        NamedQuery::new("r_arch", "ARCH", true),
        NamedQuery::new("r_natexp", "natural experiment", false),
        NamedQuery::new("r_financialcrisis", "Great Recession", true),
        NamedQuery::new("r_identification", "identification", false),
        NamedQuery::new("r_data", "data", false),
        NamedQuery::new("r_bigdata", "big data", false),
        NamedQuery::new("r_admin", "administrative data", false),
        NamedQuery::new("r_ml", "machine learning", false),
        NamedQuery::new("r_python", r"(Python)|(\.py)", true),
    ]
}

/// Read query definitions from a JSON array
pub fn read_queries(path: &Path) -> Result<Vec<NamedQuery>> {
    let content = std::fs::read_to_string(path)?;
    let queries: Vec<NamedQuery> = serde_json::from_str(&content)?;
    info!(path = %path.display(), queries = queries.len(), "Read query definitions");
    Ok(queries)
}

/// Compiled, validated queries in declaration order
#[derive(Debug, Clone)]
pub struct QuerySet {
    columns: Vec<(String, Pattern)>,
}

impl QuerySet {
    /// Compile every query, rejecting bad patterns and clashing column names
    pub fn compile(queries: &[NamedQuery]) -> Result<Self> {
        let mut seen: HashSet<&str> = FIXED_COLUMNS.iter().copied().collect();
        let mut columns = Vec::with_capacity(queries.len());

        for query in queries {
            if query.column.is_empty() {
                return Err(CorpusError::Config("Query column name is empty".to_string()));
            }
            if !seen.insert(query.column.as_str()) {
                return Err(CorpusError::Config(format!(
                    "Duplicate column name `{}`",
                    query.column
                )));
            }

            let pattern = Pattern::new(&query.pattern, query.case_sensitive).map_err(|e| {
                CorpusError::Pattern {
                    column: query.column.clone(),
                    source: e,
                }
            })?;
            columns.push((query.column.clone(), pattern));
        }

        Ok(Self { columns })
    }

    /// The built-in query set
    pub fn defaults() -> Result<Self> {
        Self::compile(&default_queries())
    }

    pub fn columns(&self) -> &[(String, Pattern)] {
        &self.columns
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
