//! Stopword sets
//!
//! Stopword lists come from the `stop-words` crate, one list per supported
//! language, or from a caller-supplied list.

use crate::errors::{LitsearchError, Result};
use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// A lowercase stopword set
#[derive(Debug, Clone, Default)]
pub struct StopwordFilter {
    stopwords: FxHashSet<String>,
}

impl StopwordFilter {
    /// Load the built-in stopword list for a language
    ///
    /// Accepts ISO 639-1 codes or English language names
    /// (e.g. `"en"`, `"english"`, `"de"`, `"German"`).
    pub fn for_language(language: &str) -> Result<Self> {
        let lang = match language.trim().to_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "ru" | "russian" => LANGUAGE::Russian,
            "sv" | "swedish" => LANGUAGE::Swedish,
            "no" | "norwegian" => LANGUAGE::Norwegian,
            "da" | "danish" => LANGUAGE::Danish,
            "fi" | "finnish" => LANGUAGE::Finnish,
            "hu" | "hungarian" => LANGUAGE::Hungarian,
            "tr" | "turkish" => LANGUAGE::Turkish,
            "pl" | "polish" => LANGUAGE::Polish,
            other => {
                return Err(LitsearchError::invalid_config(format!(
                    "no stopword list for language '{other}'"
                )))
            }
        };

        Ok(Self {
            stopwords: get(lang).iter().map(|s| s.to_lowercase()).collect(),
        })
    }

    /// Create an empty set (nothing is a stopword)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a set from a custom word list
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stopwords: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Add one word to the set
    pub fn insert(&mut self, word: &str) {
        self.stopwords.insert(word.to_lowercase());
    }

    /// Check if a word is a stopword (case-insensitive)
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word) || self.stopwords.contains(&word.to_lowercase())
    }

    /// Number of stopwords in the set
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}
