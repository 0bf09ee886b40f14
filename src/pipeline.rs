//! Keyword discovery runner
//!
//! [`KeywordPipeline::run`] threads a [`Corpus`] through every stage in
//! order:
//!
//! 1. Extract candidate terms (free text or author keywords)
//! 2. Build the document-feature matrix
//! 3. Trim and build the co-occurrence network
//! 4. Rank node importance
//! 5. Select the importance cutoff
//! 6. Reduce the graph and export keywords
//!
//! Each stage runs inside a `pipeline_stage` span. The first error ends the
//! run.

use crate::centrality::{ImportanceRanker, ImportanceTable};
use crate::cutoff::{select_cutoff, Cutoff};
use crate::errors::Result;
use crate::graph::network::NetworkBuilder;
use crate::matrix::build_dfm;
use crate::select::{export_keywords, reduce_graph, select_ngrams};
use crate::terms::aggregate::{extract_terms, ExtractionRequest};
use crate::types::{ExtractionStrategy, PipelineConfig};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, instrument, warn};

/// Stage name: candidate term extraction
pub const STAGE_TERMS: &str = "terms";
/// Stage name: document-feature matrix
pub const STAGE_MATRIX: &str = "matrix";
/// Stage name: trimming and co-occurrence network
pub const STAGE_NETWORK: &str = "network";
/// Stage name: importance ranking
pub const STAGE_RANK: &str = "rank";
/// Stage name: cutoff selection
pub const STAGE_CUTOFF: &str = "cutoff";
/// Stage name: graph reduction and keyword export
pub const STAGE_REDUCE: &str = "reduce";

/// Documents to mine for keywords
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    /// Title and abstract text, one entry per document
    pub documents: Vec<String>,
    /// Author keyword strings, one entry per document where available
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

impl Corpus {
    /// Create a corpus from document texts
    pub fn new<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            documents: documents.into_iter().map(Into::into).collect(),
            keywords: None,
        }
    }

    /// Attach author keywords
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }
}

/// Everything a run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordReport {
    /// Candidate terms after frequency and length filtering
    pub terms: Vec<String>,
    /// Nodes in the trimmed co-occurrence network
    pub network_nodes: usize,
    /// Edges in the trimmed co-occurrence network
    pub network_edges: usize,
    /// Every network node ranked by importance
    pub importance: ImportanceTable,
    /// Cutoff chosen from the importance values
    pub cutoff: Cutoff,
    /// Threshold applied to the graph; `None` keeps every node
    pub threshold: Option<f64>,
    /// Final keywords in network order
    pub keywords: Vec<String>,
}

/// Runs every stage with one configuration
#[derive(Debug, Clone)]
pub struct KeywordPipeline {
    config: PipelineConfig,
}

impl KeywordPipeline {
    /// Create a pipeline; the config is validated when [`run`](Self::run)
    /// is called
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The configuration this pipeline runs with
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn request<'a>(&'a self, corpus: &'a Corpus) -> ExtractionRequest<'a> {
        let config = &self.config;
        ExtractionRequest {
            strategy: config.strategy,
            text: match config.strategy {
                ExtractionStrategy::FreeText => Some(corpus.documents.as_slice()),
                ExtractionStrategy::Tagged => None,
            },
            keywords: match config.strategy {
                ExtractionStrategy::FreeText => None,
                ExtractionStrategy::Tagged => corpus.keywords.as_deref(),
            },
            min_freq: config.min_freq,
            ngrams: config.ngrams,
            min_n: config.min_n,
            max_n: config.max_n,
            stopwords: config.stopwords.as_deref(),
            language: &config.language,
        }
    }

    /// Run the whole pipeline on a corpus
    #[instrument(skip_all, fields(documents = corpus.documents.len(), strategy = %self.config.strategy))]
    pub fn run(&self, corpus: &Corpus) -> Result<KeywordReport> {
        let config = &self.config;
        config.validate()?;

        let terms = {
            let _span = info_span!("pipeline_stage", stage = STAGE_TERMS).entered();
            let terms = extract_terms(&self.request(corpus))?;
            if terms.is_empty() {
                warn!(min_freq = config.min_freq, "no candidate terms survived filtering");
            }
            terms
        };

        let dfm = {
            let _span = info_span!("pipeline_stage", stage = STAGE_MATRIX).entered();
            build_dfm(&corpus.documents, &terms)?
        };

        let graph = {
            let _span = info_span!("pipeline_stage", stage = STAGE_NETWORK).entered();
            NetworkBuilder::new(config.min_studies, config.min_occ).build(&dfm)?
        };

        let importance = {
            let _span = info_span!("pipeline_stage", stage = STAGE_RANK).entered();
            ImportanceRanker::new(config.centrality).rank(&graph)?
        };

        let cutoff = {
            let _span = info_span!("pipeline_stage", stage = STAGE_CUTOFF).entered();
            select_cutoff(&importance, config.cutoff)?
        };

        let (threshold, keywords) = {
            let _span = info_span!("pipeline_stage", stage = STAGE_REDUCE).entered();
            let threshold = cutoff.most_inclusive();
            if threshold.is_none() {
                warn!("no cutoff found, keeping the full network");
            }
            let eligible = match config.min_keyword_words {
                Some(words) => select_ngrams(&importance, words),
                None => importance.clone(),
            };
            let reduced = reduce_graph(&graph, &eligible, threshold.unwrap_or(f64::NEG_INFINITY));
            (threshold, export_keywords(&reduced))
        };

        info!(
            terms = terms.len(),
            nodes = graph.num_nodes,
            keywords = keywords.len(),
            "keyword run complete"
        );

        Ok(KeywordReport {
            terms,
            network_nodes: graph.num_nodes,
            network_edges: graph.num_edges(),
            importance,
            cutoff,
            threshold,
            keywords,
        })
    }
}
