//! Error types for rapid_litsearch
//!
//! Every stage fails at the point of detection and the error is surfaced
//! directly to the caller. Nothing is retried: all stages are deterministic.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, LitsearchError>;

/// Errors raised by the keyword pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LitsearchError {
    /// The selected extraction strategy has no input to work on.
    #[error("missing input: {0}")]
    MissingInput(String),

    /// A centrality measure name outside the supported set.
    #[error(
        "unsupported importance measure '{0}' (expected one of: strength, eigencentrality, alpha, betweenness, hub, power)"
    )]
    UnsupportedMeasure(String),

    /// A strategy name outside the supported set.
    #[error("unsupported {kind} strategy '{name}'")]
    UnsupportedStrategy {
        /// Which option was being parsed (e.g. "extraction", "cutoff")
        kind: &'static str,
        /// The rejected value
        name: String,
    },

    /// Trimming removed every term or every document.
    #[error(
        "empty network: trimming left {terms} terms across {documents} documents (min_studies={min_studies}, min_occ={min_occ})"
    )]
    EmptyNetwork {
        terms: usize,
        documents: usize,
        min_studies: u32,
        min_occ: u32,
    },

    /// A term could not be compiled into a match pattern.
    #[error("term '{term}' is not a valid match pattern: {reason}")]
    InvalidPattern { term: String, reason: String },

    /// The importance table has no rows.
    #[error("importance table is empty")]
    EmptyImportance,

    /// The linear system behind a centrality measure has no unique solution.
    #[error("{measure} centrality is undefined: linear system is singular")]
    SingularSystem { measure: &'static str },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(String),
}

impl LitsearchError {
    /// Build an [`LitsearchError::InvalidConfig`] from any message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Build an [`LitsearchError::MissingInput`] from any message.
    pub fn missing_input(msg: impl Into<String>) -> Self {
        Self::MissingInput(msg.into())
    }

    /// Build an [`LitsearchError::UnsupportedStrategy`].
    pub fn unsupported_strategy(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnsupportedStrategy {
            kind,
            name: name.into(),
        }
    }
}

impl From<serde_json::Error> for LitsearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}
