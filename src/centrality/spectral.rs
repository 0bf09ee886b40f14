//! Spectral centralities by power iteration
//!
//! Eigenvector centrality and hub scores are principal eigenvectors of the
//! weighted adjacency (`A`) and of `AAᵀ` respectively. Both are returned
//! scaled so the largest score is 1.

use crate::graph::csr::CsrGraph;
use tracing::warn;

/// Result of a power iteration
#[derive(Debug, Clone)]
pub struct PowerIterationResult {
    /// Scores for each node (indexed by node ID), max-normalized
    pub scores: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final convergence delta
    pub delta: f64,
    /// Whether the iteration converged
    pub converged: bool,
}

/// `y = A x` over the weighted adjacency
fn multiply(graph: &CsrGraph, x: &[f64], y: &mut [f64]) {
    for (node, out) in y.iter_mut().enumerate() {
        *out = graph.neighbors(node as u32).map(|(nb, w)| w * x[nb as usize]).sum();
    }
}

/// Scale so the largest entry is 1; returns false if every entry is zero
fn normalize_max(x: &mut [f64]) -> bool {
    let max = x.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if max == 0.0 {
        return false;
    }
    for v in x.iter_mut() {
        *v /= max;
    }
    true
}

/// Iterate `x <- step(x)` with max-normalization until the L1 change is
/// below `threshold`
///
/// Starts from the all-ones vector. A step that maps everything to zero
/// (no edges) leaves every node at 1.
fn power_iterate<F>(
    n: usize,
    max_iterations: usize,
    threshold: f64,
    mut step: F,
) -> PowerIterationResult
where
    F: FnMut(&[f64], &mut [f64]),
{
    let mut scores = vec![1.0; n];
    let mut next = vec![0.0; n];
    let mut iterations = 0;
    let mut delta = f64::MAX;

    while iterations < max_iterations && delta > threshold {
        iterations += 1;
        step(&scores, &mut next);
        if !normalize_max(&mut next) {
            return PowerIterationResult {
                scores: vec![1.0; n],
                iterations,
                delta: 0.0,
                converged: true,
            };
        }

        delta = scores
            .iter()
            .zip(next.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut scores, &mut next);
    }

    PowerIterationResult {
        scores,
        iterations,
        delta,
        converged: delta <= threshold,
    }
}

/// Eigenvector centrality
///
/// Iterates on `A + I`, which has the same principal eigenvector as `A` but
/// does not oscillate on bipartite graphs.
pub fn eigenvector(graph: &CsrGraph, max_iterations: usize, threshold: f64) -> Vec<f64> {
    if graph.is_empty() {
        return Vec::new();
    }
    if graph.num_edges() == 0 {
        return vec![1.0; graph.num_nodes];
    }

    let result = power_iterate(graph.num_nodes, max_iterations, threshold, |x, y| {
        multiply(graph, x, y);
        for (out, v) in y.iter_mut().zip(x) {
            *out += v;
        }
    });
    if !result.converged {
        warn!(
            iterations = result.iterations,
            delta = result.delta,
            "eigenvector centrality did not converge"
        );
    }
    result.scores
}

/// Hub scores (Kleinberg)
///
/// For an undirected graph `AAᵀ = A²`, so each step multiplies by `A` twice.
pub fn hub(graph: &CsrGraph, max_iterations: usize, threshold: f64) -> Vec<f64> {
    if graph.is_empty() {
        return Vec::new();
    }

    let mut scratch = vec![0.0; graph.num_nodes];
    let result = power_iterate(graph.num_nodes, max_iterations, threshold, |x, y| {
        multiply(graph, x, &mut scratch);
        multiply(graph, &scratch, y);
    });
    if !result.converged {
        warn!(
            iterations = result.iterations,
            delta = result.delta,
            "hub scores did not converge"
        );
    }
    result.scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    fn build_triangle_graph() -> CsrGraph {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("a");
        let b = builder.get_or_create_node("b");
        let c = builder.get_or_create_node("c");

        builder.increment_edge(a, b, 1.0);
        builder.increment_edge(b, c, 1.0);
        builder.increment_edge(c, a, 1.0);

        CsrGraph::from_builder(&builder)
    }

    fn build_star_graph() -> CsrGraph {
        // Hub connected to 3 spokes
        let mut builder = GraphBuilder::new();
        let hub = builder.get_or_create_node("hub");
        let s1 = builder.get_or_create_node("s1");
        let s2 = builder.get_or_create_node("s2");
        let s3 = builder.get_or_create_node("s3");

        builder.increment_edge(hub, s1, 1.0);
        builder.increment_edge(hub, s2, 1.0);
        builder.increment_edge(hub, s3, 1.0);

        CsrGraph::from_builder(&builder)
    }

    #[test]
    fn test_triangle_equal_scores() {
        let scores = eigenvector(&build_triangle_graph(), 1000, 1e-12);
        for score in &scores {
            assert!((score - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_star_eigenvector() {
        // Principal eigenvector of a 3-spoke star: hub = sqrt(3) * spoke
        let scores = eigenvector(&build_star_graph(), 1000, 1e-12);
        assert!((scores[0] - 1.0).abs() < 1e-9);
        for &spoke in &scores[1..] {
            assert!((spoke - 1.0 / 3f64.sqrt()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_hub_matches_eigenvector_on_non_bipartite_graph() {
        // Triangle with a pendant: the principal eigenvalue is unique in
        // magnitude, so A and A² share the principal eigenvector
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("a");
        let b = builder.get_or_create_node("b");
        let c = builder.get_or_create_node("c");
        let d = builder.get_or_create_node("d");
        builder.increment_edge(a, b, 1.0);
        builder.increment_edge(b, c, 2.0);
        builder.increment_edge(c, a, 1.0);
        builder.increment_edge(c, d, 1.0);
        let graph = CsrGraph::from_builder(&builder);

        let eigen = eigenvector(&graph, 5000, 1e-13);
        let hubs = hub(&graph, 5000, 1e-13);
        for (e, h) in eigen.iter().zip(&hubs) {
            assert!((e - h).abs() < 1e-6, "{e} vs {h}");
        }
        assert!((hubs[2] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_weights_shift_eigenvector() {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("a");
        let b = builder.get_or_create_node("b");
        let c = builder.get_or_create_node("c");
        builder.increment_edge(a, b, 5.0);
        builder.increment_edge(a, c, 1.0);
        let scores = eigenvector(&CsrGraph::from_builder(&builder), 1000, 1e-12);

        assert!(scores[1] > scores[2]);
    }

    #[test]
    fn test_edgeless_graph_is_uniform() {
        let mut builder = GraphBuilder::new();
        builder.get_or_create_node("a");
        builder.get_or_create_node("b");
        let graph = CsrGraph::from_builder(&builder);

        assert_eq!(eigenvector(&graph, 100, 1e-9), vec![1.0, 1.0]);
        assert_eq!(hub(&graph, 100, 1e-9), vec![1.0, 1.0]);
    }

    #[test]
    fn test_empty_graph() {
        let graph = CsrGraph::default();
        assert!(eigenvector(&graph, 100, 1e-9).is_empty());
        assert!(hub(&graph, 100, 1e-9).is_empty());
    }
}
