//! Compressed Sparse Row (CSR) graph representation
//!
//! CSR is optimized for iteration over neighbors, which is what every
//! centrality measure does repeatedly.

use super::builder::GraphBuilder;

/// An undirected weighted graph in Compressed Sparse Row format
///
/// Each undirected edge is stored in both endpoint rows with the same weight.
/// Neighbors within a row are sorted by node ID.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrGraph {
    /// Number of nodes
    pub num_nodes: usize,
    /// Row pointers: node i's edges are at indices row_ptr[i]..row_ptr[i+1]
    pub row_ptr: Vec<usize>,
    /// Column indices (target nodes) for each edge
    pub col_idx: Vec<u32>,
    /// Edge weights
    pub weights: Vec<f64>,
    /// Total incident weight (strength) for each node
    pub total_weight: Vec<f64>,
    /// Term for each node
    pub names: Vec<String>,
}

impl CsrGraph {
    /// Convert a GraphBuilder into CSR format
    pub fn from_builder(builder: &GraphBuilder) -> Self {
        let num_nodes = builder.node_count();
        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut col_idx = Vec::new();
        let mut weights = Vec::new();
        let mut total_weight = Vec::with_capacity(num_nodes);
        let mut names = Vec::with_capacity(num_nodes);

        row_ptr.push(0);

        for (_, node) in builder.nodes() {
            names.push(node.name.clone());

            // Collect and sort edges for deterministic iteration
            let mut edges: Vec<_> = node.edges.iter().map(|(&k, &v)| (k, v)).collect();
            edges.sort_by_key(|(k, _)| *k);

            total_weight.push(edges.iter().map(|(_, w)| w).sum());

            for (target, weight) in edges {
                col_idx.push(target);
                weights.push(weight);
            }

            row_ptr.push(col_idx.len());
        }

        Self {
            num_nodes,
            row_ptr,
            col_idx,
            weights,
            total_weight,
            names,
        }
    }

    /// Iterate over neighbors of a node
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        (start..end).map(move |i| (self.col_idx[i], self.weights[i]))
    }

    /// Number of distinct neighbors of a node
    pub fn degree(&self, node: u32) -> usize {
        self.row_ptr[node as usize + 1] - self.row_ptr[node as usize]
    }

    /// Sum of incident edge weights of a node
    pub fn strength(&self, node: u32) -> f64 {
        self.total_weight[node as usize]
    }

    /// Weight of the edge between two nodes, if any
    pub fn edge_weight(&self, a: u32, b: u32) -> Option<f64> {
        let start = self.row_ptr[a as usize];
        let end = self.row_ptr[a as usize + 1];
        self.col_idx[start..end]
            .binary_search(&b)
            .ok()
            .map(|pos| self.weights[start + pos])
    }

    /// Get the term for a node
    pub fn name(&self, node: u32) -> &str {
        &self.names[node as usize]
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Number of undirected edges
    pub fn num_edges(&self) -> usize {
        self.col_idx.len() / 2
    }

    /// Iterate over undirected edges once each, as `(low, high, weight)`
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32, f64)> + '_ {
        (0..self.num_nodes as u32).flat_map(move |a| {
            self.neighbors(a)
                .filter(move |&(b, _)| a < b)
                .map(move |(b, w)| (a, b, w))
        })
    }

    /// Get node ID by term (linear search - use sparingly)
    pub fn get_node_by_name(&self, name: &str) -> Option<u32> {
        self.names.iter().position(|n| n == name).map(|i| i as u32)
    }

    /// Vertex-induced subgraph over the nodes where `keep[node]` is true
    ///
    /// Surviving nodes keep their relative order; only edges between
    /// surviving nodes remain, with unchanged weights.
    pub fn induced_subgraph(&self, keep: &[bool]) -> Self {
        let mut builder = GraphBuilder::with_capacity(self.num_nodes);
        let mut new_id = vec![None; self.num_nodes];

        for node in 0..self.num_nodes {
            if keep.get(node).copied().unwrap_or(false) {
                new_id[node] = Some(builder.get_or_create_node(&self.names[node]));
            }
        }

        for (a, b, weight) in self.edges() {
            if let (Some(na), Some(nb)) = (new_id[a as usize], new_id[b as usize]) {
                builder.increment_edge(na, nb, weight);
            }
        }

        Self::from_builder(&builder)
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            weights: Vec::new(),
            total_weight: Vec::new(),
            names: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_test_graph() -> GraphBuilder {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("a");
        let b = builder.get_or_create_node("b");
        let c = builder.get_or_create_node("c");

        builder.increment_edge(a, b, 1.0);
        builder.increment_edge(b, c, 2.0);
        builder.increment_edge(a, c, 1.5);

        builder
    }

    #[test]
    fn test_csr_conversion() {
        let builder = build_test_graph();
        let csr = CsrGraph::from_builder(&builder);

        assert_eq!(csr.num_nodes, 3);
        assert_eq!(csr.names, vec!["a", "b", "c"]);
        assert_eq!(csr.num_edges(), 3);
    }

    #[test]
    fn test_neighbor_iteration() {
        let builder = build_test_graph();
        let csr = CsrGraph::from_builder(&builder);

        let neighbors: Vec<_> = csr.neighbors(0).collect();
        assert_eq!(neighbors, vec![(1, 1.0), (2, 1.5)]);
    }

    #[test]
    fn test_degree_and_strength() {
        let builder = build_test_graph();
        let csr = CsrGraph::from_builder(&builder);

        assert_eq!(csr.degree(0), 2);
        assert!((csr.strength(0) - 2.5).abs() < 1e-10);
        assert!((csr.strength(2) - 3.5).abs() < 1e-10);
    }

    #[test]
    fn test_edge_weight_is_symmetric() {
        let csr = CsrGraph::from_builder(&build_test_graph());

        assert_eq!(csr.edge_weight(1, 2), Some(2.0));
        assert_eq!(csr.edge_weight(2, 1), Some(2.0));
        assert_eq!(csr.edge_weight(0, 0), None);
    }

    #[test]
    fn test_edges_listed_once() {
        let csr = CsrGraph::from_builder(&build_test_graph());
        let edges: Vec<_> = csr.edges().collect();
        assert_eq!(edges, vec![(0, 1, 1.0), (0, 2, 1.5), (1, 2, 2.0)]);
    }

    #[test]
    fn test_empty_graph() {
        let builder = GraphBuilder::new();
        let csr = CsrGraph::from_builder(&builder);

        assert!(csr.is_empty());
        assert_eq!(csr.num_edges(), 0);
        assert_eq!(csr, CsrGraph::default());
    }

    #[test]
    fn test_induced_subgraph() {
        let csr = CsrGraph::from_builder(&build_test_graph());
        let sub = csr.induced_subgraph(&[true, false, true]);

        assert_eq!(sub.names, vec!["a", "c"]);
        assert_eq!(sub.num_edges(), 1);
        assert_eq!(sub.edge_weight(0, 1), Some(1.5));
    }

    #[test]
    fn test_get_node_by_name() {
        let csr = CsrGraph::from_builder(&build_test_graph());

        assert_eq!(csr.get_node_by_name("a"), Some(0));
        assert_eq!(csr.get_node_by_name("c"), Some(2));
        assert_eq!(csr.get_node_by_name("z"), None);
    }
}
