//! Pattern search over article text.
//!
//! Two primitives, [`count_matches`] and [`has_match`], answer "how often"
//! and "whether" for a single text. Every corpus-level reduction is built from
//! them so counting and matching never disagree.

use crate::corpus::Corpus;
use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;

/// A compiled regular expression together with its case mode
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    case_sensitive: bool,
}

impl Pattern {
    /// Compile `expr`. Matching is case-insensitive unless `case_sensitive`.
    pub fn new(expr: &str, case_sensitive: bool) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(expr)
            .case_insensitive(!case_sensitive)
            .build()?;
        Ok(Self {
            regex,
            case_sensitive,
        })
    }

    /// Compile `expr` with the default, case-insensitive mode
    pub fn insensitive(expr: &str) -> Result<Self, regex::Error> {
        Self::new(expr, false)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }
}

/// Number of non-overlapping matches of `pattern` in `text`
pub fn count_matches(text: &str, pattern: &Pattern) -> usize {
    pattern.regex.find_iter(text).count()
}

/// Whether `pattern` matches anywhere in `text`
pub fn has_match(text: &str, pattern: &Pattern) -> bool {
    pattern.regex.is_match(text)
}

/// Total matches over every article
pub fn sum_matches(corpus: &Corpus, pattern: &Pattern) -> usize {
    corpus
        .articles()
        .iter()
        .map(|a| count_matches(a.text(), pattern))
        .sum()
}

/// Total matches per year over the corpus year range; empty years map to 0
pub fn sum_matches_per_year(corpus: &Corpus, pattern: &Pattern) -> BTreeMap<i32, usize> {
    corpus.tally_per_year(|a| count_matches(a.text(), pattern))
}

/// Number of articles with at least one match
pub fn count_matching_articles(corpus: &Corpus, pattern: &Pattern) -> usize {
    corpus
        .articles()
        .iter()
        .filter(|a| has_match(a.text(), pattern))
        .count()
}

/// Number of matching articles per year over the corpus year range
pub fn count_matching_articles_per_year(corpus: &Corpus, pattern: &Pattern) -> BTreeMap<i32, usize> {
    corpus.tally_per_year(|a| usize::from(has_match(a.text(), pattern)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::{ArticleRecord, TextSource};
    use crate::error::Result;

    fn article(text: &str, year: i32) -> ArticleRecord {
        ArticleRecord::new("t", year, "J", TextSource::Abstract(text.to_string()))
    }

    fn pattern(expr: &str, case_sensitive: bool) -> Pattern {
        Pattern::new(expr, case_sensitive).expect("valid pattern")
    }

    fn corpus() -> Result<Corpus> {
        Corpus::build(vec![
            article("We use OLS. Then OLS again with big data.", 2001),
            article("A natural experiment; no regressions.", 2001),
            article("Ordinary least squares, i.e. ols.", 2004),
            article("", 2003),
        ])
    }

    #[test]
    fn test_count_matches_case_modes() -> std::result::Result<(), regex::Error> {
        let text = "We used Data and data again.";
        assert_eq!(count_matches(text, &Pattern::insensitive("data")?), 2);
        assert_eq!(count_matches(text, &Pattern::new("data", true)?), 1);
        assert_eq!(count_matches(text, &Pattern::new("DATA", true)?), 0);
        Ok(())
    }

    #[test]
    fn test_matches_do_not_overlap() -> std::result::Result<(), regex::Error> {
        assert_eq!(count_matches("aaaa", &Pattern::insensitive("aa")?), 2);
        Ok(())
    }

    #[test]
    fn test_zero_count_iff_no_match() -> std::result::Result<(), regex::Error> {
        let patterns = [
            Pattern::insensitive("machine learning")?,
            Pattern::new("OLS", true)?,
            Pattern::insensitive(r"(D|d)ifference(\s|-)?in-?(D|d)ifferences?")?,
        ];
        let texts = ["", "ols only", "We apply difference-in-differences.", "OLS"];

        for pattern in &patterns {
            for text in texts {
                let n = count_matches(text, pattern);
                assert_eq!(n == 0, !has_match(text, pattern), "{} on {:?}", pattern.as_str(), text);
            }
        }
        Ok(())
    }

    #[test]
    fn test_corpus_sums() -> Result<()> {
        let corpus = corpus()?;
        let ols = pattern("OLS", true);

        assert_eq!(sum_matches(&corpus, &ols), 2);
        assert_eq!(count_matching_articles(&corpus, &ols), 1);
        Ok(())
    }

    #[test]
    fn test_per_year_sums_add_up() -> Result<()> {
        let corpus = corpus()?;
        for expr in ["ols", "data", "experiment", "zzz", ""] {
            let p = pattern(expr, false);
            let per_year = sum_matches_per_year(&corpus, &p);
            assert_eq!(per_year.values().sum::<usize>(), sum_matches(&corpus, &p));

            let per_year_articles = count_matching_articles_per_year(&corpus, &p);
            assert_eq!(
                per_year_articles.values().sum::<usize>(),
                count_matching_articles(&corpus, &p)
            );
        }
        Ok(())
    }

    #[test]
    fn test_per_year_covers_gaps() -> Result<()> {
        let corpus = Corpus::build(vec![article("a", 2001), article("b", 2001), article("c", 2003)])?;
        let per_year = sum_matches_per_year(&corpus, &pattern("never", false));
        assert_eq!(per_year.into_iter().collect::<Vec<_>>(), vec![(2001, 0), (2002, 0), (2003, 0)]);
        Ok(())
    }

    #[test]
    fn test_matching_articles_per_year() -> Result<()> {
        let corpus = corpus()?;
        let per_year = count_matching_articles_per_year(&corpus, &pattern("ols", false));
        assert_eq!(
            per_year.into_iter().collect::<Vec<_>>(),
            vec![(2001, 1), (2002, 0), (2003, 0), (2004, 1)]
        );
        Ok(())
    }
}
