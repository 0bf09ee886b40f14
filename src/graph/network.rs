//! Co-occurrence network construction
//!
//! Rare terms and empty documents are trimmed from a document-feature
//! matrix, then the term co-occurrence graph is derived from `MᵀM`.

use super::builder::GraphBuilder;
use super::csr::CsrGraph;
use crate::errors::{LitsearchError, Result};
use crate::matrix::DocumentFeatureMatrix;
use tracing::{debug, instrument};

/// Builds a [`CsrGraph`] from a document-feature matrix
#[derive(Debug, Clone)]
pub struct NetworkBuilder {
    /// Minimum number of documents a term must appear in
    pub min_studies: u32,
    /// Minimum total count of a term across documents
    pub min_occ: u32,
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self {
            min_studies: 3,
            min_occ: 3,
        }
    }
}

impl NetworkBuilder {
    /// Create a builder with explicit thresholds
    pub fn new(min_studies: u32, min_occ: u32) -> Self {
        Self {
            min_studies,
            min_occ,
        }
    }

    /// Trim the matrix in a single pass
    ///
    /// Each step runs once against the state left by the previous one:
    /// study count, then occurrence count, then empty documents.
    pub fn trim(&self, dfm: &DocumentFeatureMatrix) -> DocumentFeatureMatrix {
        // 1. Presence in enough distinct documents
        let by_studies: Vec<usize> = (0..dfm.n_terms())
            .filter(|&t| dfm.document_frequency(t) >= self.min_studies as usize)
            .collect();
        let dfm = dfm.select_columns(&by_studies);

        // 2. Enough total occurrences, on the column-trimmed counts
        let by_occ: Vec<usize> = (0..dfm.n_terms())
            .filter(|&t| dfm.column_sum(t) >= u64::from(self.min_occ))
            .collect();
        let dfm = dfm.select_columns(&by_occ);

        // 3. Documents with anything left
        let docs: Vec<usize> = (0..dfm.n_docs()).filter(|&d| dfm.row_sum(d) > 0).collect();
        dfm.select_rows(&docs)
    }

    /// Trim the matrix and build the weighted co-occurrence graph
    ///
    /// Columns sharing a term name are merged before trimming (see
    /// [`DocumentFeatureMatrix::merge_duplicate_terms`]), so each name is
    /// one node. Every surviving term becomes a node, in column order. The weight
    /// between terms i and j is the sum over surviving documents of
    /// `count_i * count_j`; pairs that never co-occur have no edge.
    #[instrument(skip(self, dfm), fields(documents = dfm.n_docs(), terms = dfm.n_terms(), min_studies = self.min_studies, min_occ = self.min_occ))]
    pub fn build(&self, dfm: &DocumentFeatureMatrix) -> Result<CsrGraph> {
        let (merged, folded) = dfm.merge_duplicate_terms();
        if folded > 0 {
            debug!(folded, "merged duplicate term columns");
        }
        let trimmed = self.trim(&merged);
        if trimmed.is_empty() {
            return Err(LitsearchError::EmptyNetwork {
                terms: trimmed.n_terms(),
                documents: trimmed.n_docs(),
                min_studies: self.min_studies,
                min_occ: self.min_occ,
            });
        }

        let n_terms = trimmed.n_terms();
        let mut builder = GraphBuilder::with_capacity(n_terms);
        let node_of: Vec<u32> = trimmed
            .terms()
            .iter()
            .map(|term| builder.get_or_create_node(term))
            .collect();

        // Upper triangle of MᵀM, diagonal excluded
        let mut adjacency = vec![0u64; n_terms * n_terms];
        for row in trimmed.rows() {
            let present: Vec<(usize, u64)> = row
                .iter()
                .enumerate()
                .filter(|(_, &c)| c > 0)
                .map(|(t, &c)| (t, u64::from(c)))
                .collect();
            for (k, &(i, ci)) in present.iter().enumerate() {
                for &(j, cj) in &present[k + 1..] {
                    adjacency[i * n_terms + j] += ci * cj;
                }
            }
        }

        for i in 0..n_terms {
            for j in (i + 1)..n_terms {
                let weight = adjacency[i * n_terms + j];
                if weight > 0 {
                    builder.increment_edge(node_of[i], node_of[j], weight as f64);
                }
            }
        }

        let graph = CsrGraph::from_builder(&builder);
        debug!(
            kept_terms = graph.num_nodes,
            kept_documents = trimmed.n_docs(),
            edges = graph.num_edges(),
            "built co-occurrence network"
        );
        Ok(graph)
    }
}

/// Build a co-occurrence graph with single-pass trimming
pub fn build_network(
    dfm: &DocumentFeatureMatrix,
    min_studies: u32,
    min_occ: u32,
) -> Result<CsrGraph> {
    NetworkBuilder::new(min_studies, min_occ).build(dfm)
}
