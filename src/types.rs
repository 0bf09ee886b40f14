//! Core types for rapid_litsearch
//!
//! This module holds the extraction strategy enum and [`PipelineConfig`],
//! the single configuration struct that drives a full keyword run.

use crate::centrality::Centrality;
use crate::cutoff::CutoffStrategy;
use crate::errors::{LitsearchError, Result};
use serde::{Deserialize, Serialize};

/// Where candidate terms come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// N-grams from titles and abstracts
    FreeText,
    /// Author-supplied keyword strings
    Tagged,
}

impl ExtractionStrategy {
    /// Returns the name used in configs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FreeText => "free_text",
            Self::Tagged => "tagged",
        }
    }
}

impl std::str::FromStr for ExtractionStrategy {
    type Err = LitsearchError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "free_text" | "fakerake" => Ok(Self::FreeText),
            "tagged" => Ok(Self::Tagged),
            _ => Err(LitsearchError::unsupported_strategy("extraction", value)),
        }
    }
}

impl std::fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a keyword discovery run
///
/// The extraction strategy, stopword language, centrality measure and cutoff
/// strategy have no defaults and must always be given. The numeric options
/// fall back to their usual values when omitted from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Where candidate terms come from
    pub strategy: ExtractionStrategy,
    /// Language of the built-in stopword list (e.g. "english", "de")
    pub language: String,
    /// Custom stopwords; replaces the language list when set
    #[serde(default)]
    pub stopwords: Option<Vec<String>>,
    /// Minimum pooled occurrences for a candidate term
    #[serde(default = "default_min_freq")]
    pub min_freq: usize,
    /// Restrict candidate terms to `min_n..=max_n` words
    #[serde(default = "default_ngrams")]
    pub ngrams: bool,
    /// Minimum words per candidate term
    #[serde(default = "default_min_n")]
    pub min_n: usize,
    /// Maximum words per candidate term
    #[serde(default = "default_max_n")]
    pub max_n: usize,
    /// Minimum documents a term must appear in to stay in the network
    #[serde(default = "default_min_studies")]
    pub min_studies: u32,
    /// Minimum total occurrences for a term to stay in the network
    #[serde(default = "default_min_occ")]
    pub min_occ: u32,
    /// Node importance measure
    pub centrality: Centrality,
    /// How the importance threshold is chosen
    pub cutoff: CutoffStrategy,
    /// If set, only keywords with at least this many words are reported
    #[serde(default)]
    pub min_keyword_words: Option<usize>,
}

fn default_min_freq() -> usize {
    2
}

fn default_ngrams() -> bool {
    true
}

fn default_min_n() -> usize {
    2
}

fn default_max_n() -> usize {
    5
}

fn default_min_studies() -> u32 {
    3
}

fn default_min_occ() -> u32 {
    3
}

impl PipelineConfig {
    /// Create a config from the four required choices; numeric options take
    /// their usual values
    pub fn new(
        strategy: ExtractionStrategy,
        language: impl Into<String>,
        centrality: Centrality,
        cutoff: CutoffStrategy,
    ) -> Self {
        Self {
            strategy,
            language: language.into(),
            stopwords: None,
            min_freq: default_min_freq(),
            ngrams: default_ngrams(),
            min_n: default_min_n(),
            max_n: default_max_n(),
            min_studies: default_min_studies(),
            min_occ: default_min_occ(),
            centrality,
            cutoff,
            min_keyword_words: None,
        }
    }

    /// Parse a JSON config
    ///
    /// `strategy`, `language`, `centrality` and `cutoff` are required;
    /// omitting any of them is a [`LitsearchError::ConfigParse`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.language.trim().is_empty() && self.stopwords.is_none() {
            return Err(LitsearchError::invalid_config(
                "language must be set when no custom stopwords are given",
            ));
        }

        if self.min_n == 0 {
            return Err(LitsearchError::invalid_config("min_n must be >= 1"));
        }

        if self.max_n < self.min_n {
            return Err(LitsearchError::invalid_config(format!(
                "max_n ({}) must be >= min_n ({})",
                self.max_n, self.min_n
            )));
        }

        if self.min_freq == 0 {
            return Err(LitsearchError::invalid_config("min_freq must be >= 1"));
        }

        if self.min_keyword_words == Some(0) {
            return Err(LitsearchError::invalid_config(
                "min_keyword_words must be >= 1 when set",
            ));
        }

        self.cutoff.validate()
    }

    /// Builder method: set extraction strategy
    pub fn with_strategy(mut self, strategy: ExtractionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Builder method: set stopword language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Builder method: set custom stopwords
    pub fn with_stopwords(mut self, stopwords: Vec<String>) -> Self {
        self.stopwords = Some(stopwords);
        self
    }

    /// Builder method: set minimum term frequency
    pub fn with_min_freq(mut self, min_freq: usize) -> Self {
        self.min_freq = min_freq;
        self
    }

    /// Builder method: enable or disable the word-count filter
    pub fn with_ngrams(mut self, ngrams: bool) -> Self {
        self.ngrams = ngrams;
        self
    }

    /// Builder method: set term length range in words
    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.min_n = min_n;
        self.max_n = max_n;
        self
    }

    /// Builder method: set network trimming thresholds
    pub fn with_trimming(mut self, min_studies: u32, min_occ: u32) -> Self {
        self.min_studies = min_studies;
        self.min_occ = min_occ;
        self
    }

    /// Builder method: set centrality measure
    pub fn with_centrality(mut self, centrality: Centrality) -> Self {
        self.centrality = centrality;
        self
    }

    /// Builder method: set cutoff strategy
    pub fn with_cutoff(mut self, cutoff: CutoffStrategy) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Builder method: only report keywords with at least `words` words
    pub fn with_min_keyword_words(mut self, words: usize) -> Self {
        self.min_keyword_words = Some(words);
        self
    }
}
