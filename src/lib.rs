//! # rapid_litsearch
//!
//! Keyword discovery for systematic literature reviews.
//!
//! Candidate terms are pulled from titles and abstracts (or author
//! keywords), matched back against the documents, and linked into a weighted
//! co-occurrence network. Node centrality then ranks the terms, and a
//! statistical cutoff separates the important ones from noise.
//!
//! ## Features
//!
//! - **Stopword-bounded n-grams** in the languages the `stop-words` crate covers
//! - **Six centrality measures**: strength, eigencentrality, alpha,
//!   betweenness, hub and power
//! - **Two cutoff strategies**: changepoint detection and cumulative share
//! - **Boolean search strings** built from grouped keywords

pub mod centrality;
pub mod cutoff;
pub mod errors;
pub mod graph;
pub mod matrix;
pub mod nlp;
pub mod pipeline;
pub mod search;
pub mod select;
pub mod terms;
pub mod types;

// Re-export commonly used types
pub use errors::{LitsearchError, Result};
pub use types::{ExtractionStrategy, PipelineConfig};

// Re-export main functionality
pub use centrality::{rank_importance, Centrality, ImportanceRanker, ImportanceRow, ImportanceTable};
pub use cutoff::{select_cutoff, Cutoff, CutoffStrategy};
pub use graph::{builder::GraphBuilder, csr::CsrGraph, network::build_network, network::NetworkBuilder};
pub use matrix::{build_dfm, DocumentFeatureMatrix};
pub use nlp::{
    stopwords::StopwordFilter,
    text::{clean_keyword_string, strip_punctuation, windows},
};
pub use pipeline::{Corpus, KeywordPipeline, KeywordReport};
pub use search::{write_search, SearchOptions};
pub use select::{export_keywords, reduce_graph, select_ngrams, select_unigrams};
pub use terms::{
    aggregate::{extract_terms, ExtractionRequest},
    ngram::{extract_ngrams, NgramExtractor},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
