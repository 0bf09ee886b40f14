//! Centralities defined by a linear system
//!
//! Alpha and power centrality both solve `(I − cA)x = b` over the weighted
//! adjacency. The system is solved densely, which is fine for the few
//! hundred to few thousand terms a review network holds.

use crate::errors::{LitsearchError, Result};
use crate::graph::csr::CsrGraph;

/// Relative pivot size below which a system is treated as singular
const SINGULAR_EPS: f64 = 1e-12;

/// Dense `I − factor·A`, row-major
fn shifted_identity(graph: &CsrGraph, factor: f64) -> Vec<f64> {
    let n = graph.num_nodes;
    let mut m = vec![0.0; n * n];
    for i in 0..n {
        m[i * n + i] = 1.0;
        for (j, w) in graph.neighbors(i as u32) {
            m[i * n + j as usize] -= factor * w;
        }
    }
    m
}

/// Solve `m x = b` by Gaussian elimination with partial pivoting
///
/// Returns `None` if the matrix is numerically singular.
pub fn solve_dense(mut m: Vec<f64>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();
    debug_assert_eq!(m.len(), n * n);

    let scale = m.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if n > 0 && scale == 0.0 {
        return None;
    }

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&a, &b| m[a * n + col].abs().total_cmp(&m[b * n + col].abs()))?;
        if m[pivot_row * n + col].abs() <= SINGULAR_EPS * scale {
            return None;
        }
        if pivot_row != col {
            for k in 0..n {
                m.swap(col * n + k, pivot_row * n + k);
            }
            b.swap(col, pivot_row);
        }

        let pivot = m[col * n + col];
        for row in (col + 1)..n {
            let factor = m[row * n + col] / pivot;
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                m[row * n + k] -= factor * m[col * n + k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| m[row * n + k] * x[k]).sum();
        x[row] = (b[row] - tail) / m[row * n + row];
    }
    Some(x)
}

/// Alpha centrality: solves `(I − αA)x = 1`
pub fn alpha(graph: &CsrGraph, alpha: f64) -> Result<Vec<f64>> {
    let n = graph.num_nodes;
    solve_dense(shifted_identity(graph, alpha), vec![1.0; n])
        .ok_or(LitsearchError::SingularSystem { measure: "alpha" })
}

/// Bonacich power centrality: `c = (I − βA)⁻¹A1`, rescaled so `Σc² = N`
pub fn power(graph: &CsrGraph, exponent: f64) -> Result<Vec<f64>> {
    let n = graph.num_nodes;
    let strengths = graph.total_weight.clone();
    let mut scores = solve_dense(shifted_identity(graph, exponent), strengths)
        .ok_or(LitsearchError::SingularSystem { measure: "power" })?;

    let norm: f64 = scores.iter().map(|c| c * c).sum();
    if norm > 0.0 {
        let factor = (n as f64 / norm).sqrt();
        for c in &mut scores {
            *c *= factor;
        }
    }
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    fn pair_graph(weight: f64) -> CsrGraph {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("a");
        let b = builder.get_or_create_node("b");
        builder.increment_edge(a, b, weight);
        CsrGraph::from_builder(&builder)
    }

    #[test]
    fn test_solve_dense() {
        // 2x + y = 5, x + 3y = 10
        let x = solve_dense(vec![2.0, 1.0, 1.0, 3.0], vec![5.0, 10.0]).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_solve_dense_needs_pivoting() {
        // 0x + y = 2, x + y = 3
        let x = solve_dense(vec![0.0, 1.0, 1.0, 1.0], vec![2.0, 3.0]).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_solve_dense_singular() {
        assert!(solve_dense(vec![1.0, 2.0, 2.0, 4.0], vec![1.0, 2.0]).is_none());
    }

    #[test]
    fn test_alpha_on_pair() {
        // (1 - a w) x = 1 for both nodes
        let scores = alpha(&pair_graph(2.0), 0.1).unwrap();
        let expected = 1.0 / (1.0 - 0.2);
        assert!((scores[0] - expected).abs() < 1e-12);
        assert!((scores[1] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_alpha_singular_system() {
        // I - A with a unit-weight pair is [[1, -1], [-1, 1]]
        let err = alpha(&pair_graph(1.0), 1.0).unwrap_err();
        assert_eq!(err, LitsearchError::SingularSystem { measure: "alpha" });
    }

    #[test]
    fn test_power_is_normalized() {
        let mut builder = GraphBuilder::new();
        let hub = builder.get_or_create_node("hub");
        for spoke in ["s1", "s2", "s3"] {
            let id = builder.get_or_create_node(spoke);
            builder.increment_edge(hub, id, 1.0);
        }
        let graph = CsrGraph::from_builder(&builder);

        let scores = power(&graph, 0.2).unwrap();
        let sum_sq: f64 = scores.iter().map(|c| c * c).sum();
        assert!((sum_sq - 4.0).abs() < 1e-9);
        assert!(scores[0] > scores[1]);
        assert!((scores[1] - scores[3]).abs() < 1e-12);
    }

    #[test]
    fn test_power_without_edges_is_zero() {
        let mut builder = GraphBuilder::new();
        builder.get_or_create_node("a");
        let graph = CsrGraph::from_builder(&builder);
        assert_eq!(power(&graph, 1.0).unwrap(), vec![0.0]);
    }
}
