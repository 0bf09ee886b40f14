//! Punctuation- and stopword-bounded n-gram extraction
//!
//! Candidate terms are runs of `min_n..=max_n` words that contain no stopword
//! and do not cross punctuation. Every occurrence is kept, so the output is a
//! pooled, duplicated list suitable for frequency counting.

use crate::errors::{LitsearchError, Result};
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::text::{collapse_whitespace, is_punctuation, windows};
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Reserved word that stands in for punctuation.
///
/// Always treated as a stopword, so no window can span it.
pub const BREAK_MARKER: &str = "zzbreakzz";

/// Configuration for n-gram extraction
#[derive(Debug, Clone)]
pub struct NgramConfig {
    /// Minimum words per term
    pub min_n: usize,
    /// Maximum words per term
    pub max_n: usize,
}

impl Default for NgramConfig {
    fn default() -> Self {
        Self { min_n: 2, max_n: 5 }
    }
}

/// Extracts candidate n-grams from raw text
#[derive(Debug, Clone)]
pub struct NgramExtractor {
    config: NgramConfig,
    stopwords: StopwordFilter,
}

impl NgramExtractor {
    /// Create an extractor with the default length range
    pub fn new(stopwords: StopwordFilter) -> Self {
        Self::with_config(stopwords, NgramConfig::default())
    }

    /// Create an extractor with an explicit length range
    pub fn with_config(mut stopwords: StopwordFilter, config: NgramConfig) -> Self {
        stopwords.insert(BREAK_MARKER);
        Self { config, stopwords }
    }

    /// Set minimum n-gram length
    pub fn with_min_n(mut self, min_n: usize) -> Self {
        self.config.min_n = min_n;
        self
    }

    /// Set maximum n-gram length
    pub fn with_max_n(mut self, max_n: usize) -> Self {
        self.config.max_n = max_n;
        self
    }

    /// Extract candidate terms from every text, flattened in input order
    #[instrument(skip(self, texts), fields(texts = texts.len(), min_n = self.config.min_n, max_n = self.config.max_n))]
    pub fn extract<S>(&self, texts: &[S]) -> Result<Vec<String>>
    where
        S: AsRef<str> + Sync,
    {
        self.validate()?;

        let per_text: Vec<Vec<String>> = texts
            .par_iter()
            .map(|text| self.extract_one(text.as_ref()))
            .collect();

        let terms: Vec<String> = per_text.into_iter().flatten().collect();
        debug!(candidates = terms.len(), "extracted n-gram candidates");
        Ok(terms)
    }

    /// Extract candidate terms from a single text
    pub fn extract_one(&self, text: &str) -> Vec<String> {
        let prepared = prepare_text(text);

        (self.config.min_n..=self.config.max_n)
            .flat_map(|n| windows(&prepared, n, &self.stopwords))
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if self.config.min_n == 0 {
            return Err(LitsearchError::invalid_config("min_n must be >= 1"));
        }
        if self.config.max_n < self.config.min_n {
            return Err(LitsearchError::invalid_config(format!(
                "max_n ({}) must be >= min_n ({})",
                self.config.max_n, self.config.min_n
            )));
        }
        Ok(())
    }
}

/// Replace punctuation with the break marker, collapse spaces, lowercase
fn prepare_text(text: &str) -> String {
    let mut marked = String::with_capacity(text.len());
    for c in text.chars() {
        if is_punctuation(c) {
            marked.push(' ');
            marked.push_str(BREAK_MARKER);
            marked.push(' ');
        } else {
            marked.push(c);
        }
    }
    collapse_whitespace(&marked).to_lowercase()
}

/// Convenience function: extract pooled n-grams with the given stopwords
pub fn extract_ngrams<S>(
    texts: &[S],
    stopwords: &StopwordFilter,
    min_n: usize,
    max_n: usize,
) -> Result<Vec<String>>
where
    S: AsRef<str> + Sync,
{
    NgramExtractor::with_config(stopwords.clone(), NgramConfig { min_n, max_n }).extract(texts)
}
