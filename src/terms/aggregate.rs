//! Candidate term aggregation
//!
//! Terms come either from free text (via [`NgramExtractor`]) or from
//! author-tagged keyword strings. Both sources go through the same frequency
//! and length filters.

use crate::errors::{LitsearchError, Result};
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::text::{clean_keyword_string, word_count, KEYWORD_CONNECTIVE};
use crate::terms::ngram::{NgramConfig, NgramExtractor};
use crate::types::ExtractionStrategy;
use rustc_hash::FxHashMap;
use tracing::{debug, instrument};

/// Shortest tagged keyword kept, in characters
pub const MIN_TAGGED_LEN: usize = 3;

/// Everything needed for one term extraction call
#[derive(Debug, Clone)]
pub struct ExtractionRequest<'a> {
    /// Where terms come from
    pub strategy: ExtractionStrategy,
    /// Free text (titles, abstracts) for [`ExtractionStrategy::FreeText`]
    pub text: Option<&'a [String]>,
    /// Author keyword strings for [`ExtractionStrategy::Tagged`]
    pub keywords: Option<&'a [String]>,
    /// Minimum pooled occurrences for a term to be kept
    pub min_freq: usize,
    /// Restrict returned terms to `min_n..=max_n` words
    pub ngrams: bool,
    /// Minimum words per term
    pub min_n: usize,
    /// Maximum words per term
    pub max_n: usize,
    /// Custom stopwords; replaces the language list when present
    pub stopwords: Option<&'a [String]>,
    /// Language of the built-in stopword list
    pub language: &'a str,
}

impl<'a> ExtractionRequest<'a> {
    /// Free-text request for a stopword language, other options at their
    /// usual values
    pub fn free_text(text: &'a [String], language: &'a str) -> Self {
        Self {
            strategy: ExtractionStrategy::FreeText,
            text: Some(text),
            keywords: None,
            min_freq: 2,
            ngrams: true,
            min_n: 2,
            max_n: 5,
            stopwords: None,
            language,
        }
    }

    /// Tagged-keyword request, other options at their usual values
    pub fn tagged(keywords: &'a [String], language: &'a str) -> Self {
        Self {
            strategy: ExtractionStrategy::Tagged,
            keywords: Some(keywords),
            text: None,
            ..Self::free_text(&[], language)
        }
    }

    fn stopword_filter(&self) -> Result<StopwordFilter> {
        match self.stopwords {
            Some(words) => Ok(StopwordFilter::from_words(words)),
            None => StopwordFilter::for_language(self.language),
        }
    }
}

/// Extract, count and filter candidate terms
///
/// Returns de-duplicated terms sorted lexicographically.
#[instrument(skip(request), fields(strategy = ?request.strategy, min_freq = request.min_freq))]
pub fn extract_terms(request: &ExtractionRequest<'_>) -> Result<Vec<String>> {
    let pooled = match request.strategy {
        ExtractionStrategy::FreeText => free_text_terms(request)?,
        ExtractionStrategy::Tagged => tagged_terms(request)?,
    };

    let mut counts: FxHashMap<String, usize> = FxHashMap::default();
    for term in pooled {
        *counts.entry(term).or_insert(0) += 1;
    }
    let distinct = counts.len();

    let mut terms: Vec<String> = counts
        .into_iter()
        .filter(|(_, count)| *count >= request.min_freq)
        .map(|(term, _)| term)
        .filter(|term| {
            !request.ngrams || (request.min_n..=request.max_n).contains(&word_count(term))
        })
        .collect();
    terms.sort_unstable();

    debug!(distinct, kept = terms.len(), "aggregated candidate terms");
    Ok(terms)
}

fn free_text_terms(request: &ExtractionRequest<'_>) -> Result<Vec<String>> {
    let text = match request.text {
        Some(text) if !text.is_empty() => text,
        _ => {
            return Err(LitsearchError::missing_input(
                "free-text extraction needs at least one text",
            ))
        }
    };

    let lowered: Vec<String> = text.iter().map(|t| t.to_lowercase()).collect();
    let config = NgramConfig {
        min_n: request.min_n,
        max_n: request.max_n,
    };
    NgramExtractor::with_config(request.stopword_filter()?, config).extract(&lowered)
}

fn tagged_terms(request: &ExtractionRequest<'_>) -> Result<Vec<String>> {
    let keywords = match request.keywords {
        Some(keywords) if !keywords.is_empty() => keywords,
        _ => {
            return Err(LitsearchError::missing_input(
                "tagged extraction needs author keywords",
            ))
        }
    };

    let joined = keywords.join(KEYWORD_CONNECTIVE);
    let cleaned = clean_keyword_string(&joined);

    Ok(cleaned
        .split(';')
        .map(str::trim)
        .filter(|term| !term.eq_ignore_ascii_case("na"))
        .filter(|term| term.chars().count() >= MIN_TAGGED_LEN)
        .map(String::from)
        .collect())
}
