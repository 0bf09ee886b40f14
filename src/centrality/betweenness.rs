//! Weighted shortest-path betweenness (Brandes)
//!
//! Edge weights are path lengths, so heavily co-occurring terms sit "far"
//! apart. Scores are unnormalized and each unordered pair of endpoints is
//! counted once.

use crate::graph::csr::CsrGraph;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Relative tolerance when comparing path lengths
const PATH_EPS: f64 = 1e-10;

fn same_length(a: f64, b: f64) -> bool {
    (a - b).abs() <= PATH_EPS * a.abs().max(b.abs()).max(1.0)
}

/// Min-heap entry ordered by distance, then node ID
#[derive(Debug, Clone, Copy, PartialEq)]
struct Frontier {
    dist: f64,
    node: u32,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Betweenness centrality for every node, indexed by node ID
pub fn betweenness(graph: &CsrGraph) -> Vec<f64> {
    let n = graph.num_nodes;
    let mut centrality = vec![0.0; n];

    let mut dist = vec![f64::INFINITY; n];
    let mut sigma = vec![0.0_f64; n];
    let mut delta = vec![0.0_f64; n];
    let mut settled = vec![false; n];
    let mut preds: Vec<Vec<u32>> = vec![Vec::new(); n];
    let mut order: Vec<u32> = Vec::with_capacity(n);
    let mut heap = BinaryHeap::new();

    for source in 0..n {
        dist.fill(f64::INFINITY);
        sigma.fill(0.0);
        delta.fill(0.0);
        settled.fill(false);
        preds.iter_mut().for_each(Vec::clear);
        order.clear();

        dist[source] = 0.0;
        sigma[source] = 1.0;
        heap.push(Frontier {
            dist: 0.0,
            node: source as u32,
        });

        while let Some(Frontier { dist: d, node: v }) = heap.pop() {
            let vi = v as usize;
            if settled[vi] {
                continue;
            }
            settled[vi] = true;
            order.push(v);

            for (w, weight) in graph.neighbors(v) {
                let wi = w as usize;
                if settled[wi] {
                    continue;
                }
                let candidate = d + weight;
                let shorter = candidate < dist[wi] && !same_length(candidate, dist[wi]);
                if dist[wi].is_infinite() || shorter {
                    dist[wi] = candidate;
                    sigma[wi] = sigma[vi];
                    preds[wi].clear();
                    preds[wi].push(v);
                    heap.push(Frontier {
                        dist: candidate,
                        node: w,
                    });
                } else if same_length(candidate, dist[wi]) {
                    sigma[wi] += sigma[vi];
                    preds[wi].push(v);
                }
            }
        }

        // Dependencies, farthest nodes first
        for &w in order.iter().rev() {
            let wi = w as usize;
            for &v in &preds[wi] {
                let vi = v as usize;
                delta[vi] += sigma[vi] / sigma[wi] * (1.0 + delta[wi]);
            }
            if wi != source {
                centrality[wi] += delta[wi];
            }
        }
    }

    // Each undirected pair was counted from both ends
    for c in &mut centrality {
        *c /= 2.0;
    }
    centrality
}
