//! Node importance
//!
//! Computes one centrality measure per node of a co-occurrence graph and
//! ranks the nodes by it. Ranks run from 1 (least important) to N; nodes
//! with equal scores keep their graph order.

pub mod betweenness;
pub mod linear;
pub mod spectral;

use crate::errors::{LitsearchError, Result};
use crate::graph::csr::CsrGraph;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Supported centrality measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Centrality {
    /// Weighted degree: sum of incident edge weights
    Strength,
    /// Principal eigenvector of the weighted adjacency
    Eigencentrality,
    /// Alpha (Katz-style) centrality with unit exogenous input
    Alpha,
    /// Shortest-path betweenness with weights as distances
    Betweenness,
    /// Kleinberg hub score
    Hub,
    /// Bonacich power centrality
    Power,
}

impl Centrality {
    /// Every supported measure
    pub const ALL: [Centrality; 6] = [
        Centrality::Strength,
        Centrality::Eigencentrality,
        Centrality::Alpha,
        Centrality::Betweenness,
        Centrality::Hub,
        Centrality::Power,
    ];

    /// Returns the user-facing name used in configs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Eigencentrality => "eigencentrality",
            Self::Alpha => "alpha",
            Self::Betweenness => "betweenness",
            Self::Hub => "hub",
            Self::Power => "power",
        }
    }
}

impl std::str::FromStr for Centrality {
    type Err = LitsearchError;

    fn from_str(value: &str) -> Result<Self> {
        let wanted = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|measure| measure.as_str() == wanted)
            .ok_or_else(|| LitsearchError::UnsupportedMeasure(value.to_string()))
    }
}

impl std::fmt::Display for Centrality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ranked node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportanceRow {
    /// 1 = least important
    pub rank: usize,
    /// Centrality score
    pub importance: f64,
    /// Node name (term)
    pub name: String,
}

/// Nodes ranked ascending by importance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportanceTable {
    /// Measure that produced the scores
    pub measure: Centrality,
    /// Rows in ascending order of importance
    pub rows: Vec<ImportanceRow>,
}

impl ImportanceTable {
    /// Rank per-node scores (indexed by node ID) for a graph
    ///
    /// Ties are broken by node ID, so equal scores keep graph order.
    pub fn from_scores(graph: &CsrGraph, measure: Centrality, scores: &[f64]) -> Self {
        let mut order: Vec<usize> = (0..scores.len()).collect();
        // sort_by is stable: equal scores keep ascending node ID
        order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

        let rows = order
            .into_iter()
            .enumerate()
            .map(|(i, node)| ImportanceRow {
                rank: i + 1,
                importance: scores[node],
                name: graph.names[node].clone(),
            })
            .collect();

        Self { measure, rows }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Importance values in table (ascending) order
    pub fn values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.importance).collect()
    }

    /// Importance of a named node
    pub fn importance_of(&self, name: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.importance)
    }

    /// Keep only rows matching a predicate; ranks are left as they were
    pub fn retain_rows(&self, keep: impl Fn(&ImportanceRow) -> bool) -> Self {
        Self {
            measure: self.measure,
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }
}

/// Computes centrality scores and importance tables
#[derive(Debug, Clone)]
pub struct ImportanceRanker {
    /// Measure to compute
    pub measure: Centrality,
    /// Maximum power iterations for spectral measures
    pub max_iterations: usize,
    /// Convergence threshold (L1 change between iterations)
    pub tolerance: f64,
    /// Attenuation factor for alpha centrality
    pub alpha: f64,
    /// Exponent (beta) for power centrality
    pub exponent: f64,
}

impl ImportanceRanker {
    /// Create a ranker for one measure with default parameters
    pub fn new(measure: Centrality) -> Self {
        Self {
            measure,
            max_iterations: 1000,
            tolerance: 1e-10,
            alpha: 1.0,
            exponent: 1.0,
        }
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the alpha centrality attenuation factor
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the power centrality exponent
    pub fn with_exponent(mut self, exponent: f64) -> Self {
        self.exponent = exponent;
        self
    }

    /// Per-node scores, indexed by node ID
    pub fn scores(&self, graph: &CsrGraph) -> Result<Vec<f64>> {
        let scores = match self.measure {
            Centrality::Strength => graph.total_weight.clone(),
            Centrality::Eigencentrality => {
                spectral::eigenvector(graph, self.max_iterations, self.tolerance)
            }
            Centrality::Hub => spectral::hub(graph, self.max_iterations, self.tolerance),
            Centrality::Alpha => linear::alpha(graph, self.alpha)?,
            Centrality::Power => linear::power(graph, self.exponent)?,
            Centrality::Betweenness => betweenness::betweenness(graph),
        };
        Ok(scores)
    }

    /// Score and rank every node of the graph
    #[instrument(skip(self, graph), fields(measure = %self.measure, nodes = graph.num_nodes))]
    pub fn rank(&self, graph: &CsrGraph) -> Result<ImportanceTable> {
        let scores = self.scores(graph)?;
        let table = ImportanceTable::from_scores(graph, self.measure, &scores);
        debug!(
            min = table.rows.first().map(|r| r.importance),
            max = table.rows.last().map(|r| r.importance),
            "ranked node importance"
        );
        Ok(table)
    }
}

/// Rank graph nodes by one centrality measure with default parameters
pub fn rank_importance(graph: &CsrGraph, measure: Centrality) -> Result<ImportanceTable> {
    ImportanceRanker::new(measure).rank(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    fn path_graph() -> CsrGraph {
        // a -1- b -2- c, plus isolated d
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("a");
        let b = builder.get_or_create_node("b");
        let c = builder.get_or_create_node("c");
        builder.get_or_create_node("d");
        builder.increment_edge(a, b, 1.0);
        builder.increment_edge(b, c, 2.0);
        CsrGraph::from_builder(&builder)
    }

    #[test]
    fn test_parse_measures() {
        assert_eq!("strength".parse::<Centrality>().unwrap(), Centrality::Strength);
        assert_eq!(" Hub ".parse::<Centrality>().unwrap(), Centrality::Hub);
        for measure in Centrality::ALL {
            assert_eq!(measure.as_str().parse::<Centrality>().unwrap(), measure);
        }
    }

    #[test]
    fn test_unsupported_measure_is_an_error() {
        let err = "pagerank".parse::<Centrality>().unwrap_err();
        assert_eq!(err, LitsearchError::UnsupportedMeasure("pagerank".to_string()));
    }

    #[test]
    fn test_serde_names() {
        let measure: Centrality = serde_json::from_str("\"eigencentrality\"").unwrap();
        assert_eq!(measure, Centrality::Eigencentrality);
        assert!(serde_json::from_str::<Centrality>("\"closeness\"").is_err());
    }

    #[test]
    fn test_strength_table() {
        let table = rank_importance(&path_graph(), Centrality::Strength).unwrap();

        assert_eq!(table.len(), 4);
        let names: Vec<_> = table.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["d", "a", "c", "b"]);
        let ranks: Vec<_> = table.rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        assert_eq!(table.values(), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(table.importance_of("b"), Some(3.0));
    }

    #[test]
    fn test_ties_keep_graph_order() {
        let mut builder = GraphBuilder::new();
        let x = builder.get_or_create_node("x");
        let y = builder.get_or_create_node("y");
        let z = builder.get_or_create_node("z");
        let w = builder.get_or_create_node("w");
        builder.increment_edge(x, y, 1.0);
        builder.increment_edge(z, w, 1.0);
        let graph = CsrGraph::from_builder(&builder);

        let table = rank_importance(&graph, Centrality::Strength).unwrap();
        let names: Vec<_> = table.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["x", "y", "z", "w"]);
    }

    #[test]
    fn test_every_measure_covers_every_node() {
        let graph = path_graph();
        for measure in Centrality::ALL {
            let ranker = ImportanceRanker::new(measure).with_alpha(0.1).with_exponent(0.1);
            let table = ranker.rank(&graph).unwrap();
            assert_eq!(table.len(), graph.num_nodes, "{measure}");
            assert_eq!(table.measure, measure);

            let mut ranks: Vec<_> = table.rows.iter().map(|r| r.rank).collect();
            ranks.sort_unstable();
            assert_eq!(ranks, vec![1, 2, 3, 4]);
            assert!(table
                .rows
                .windows(2)
                .all(|w| w[0].importance <= w[1].importance));
        }
    }

    #[test]
    fn test_retain_rows_keeps_ranks() {
        let table = rank_importance(&path_graph(), Centrality::Strength).unwrap();
        let kept = table.retain_rows(|r| r.importance >= 2.0);
        let ranks: Vec<_> = kept.rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![3, 4]);
    }
}
