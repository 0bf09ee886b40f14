//! Keyword selection
//!
//! Filters importance tables by term length, reduces a graph to the nodes at
//! or above an importance cutoff, and exports the surviving terms.

use crate::centrality::ImportanceTable;
use crate::graph::csr::CsrGraph;
use crate::nlp::text::word_count;
use rustc_hash::FxHashMap;
use tracing::{debug, instrument};

/// Rows whose term has at least `n` words
pub fn select_ngrams(table: &ImportanceTable, n: usize) -> ImportanceTable {
    table.retain_rows(|row| word_count(&row.name) >= n)
}

/// Rows whose term is a single word
pub fn select_unigrams(table: &ImportanceTable) -> ImportanceTable {
    table.retain_rows(|row| word_count(&row.name) == 1)
}

/// Keep the nodes whose importance is at least `cutoff`
///
/// Nodes that do not appear in `table` are dropped. The result is the
/// vertex-induced subgraph: node order and edge weights are preserved.
#[instrument(skip(graph, table), fields(nodes = graph.num_nodes))]
pub fn reduce_graph(graph: &CsrGraph, table: &ImportanceTable, cutoff: f64) -> CsrGraph {
    let importance: FxHashMap<&str, f64> = table
        .rows
        .iter()
        .map(|row| (row.name.as_str(), row.importance))
        .collect();

    let keep: Vec<bool> = graph
        .names
        .iter()
        .map(|name| {
            importance
                .get(name.as_str())
                .is_some_and(|&value| value >= cutoff)
        })
        .collect();

    let reduced = graph.induced_subgraph(&keep);
    debug!(
        kept = reduced.num_nodes,
        edges = reduced.num_edges(),
        "reduced graph"
    );
    reduced
}

/// Node names in graph order
pub fn export_keywords(graph: &CsrGraph) -> Vec<String> {
    graph.names.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::centrality::{rank_importance, Centrality};
    use crate::graph::builder::GraphBuilder;

    fn term_graph() -> CsrGraph {
        // Strengths: fire 5, black-backed woodpecker 4, burn severity 2,
        // occupancy model 1
        let mut builder = GraphBuilder::new();
        let fire = builder.get_or_create_node("fire");
        let bbwo = builder.get_or_create_node("black-backed woodpecker");
        let occ = builder.get_or_create_node("occupancy model");
        let sev = builder.get_or_create_node("burn severity");
        builder.increment_edge(fire, bbwo, 3.0);
        builder.increment_edge(fire, sev, 2.0);
        builder.increment_edge(bbwo, occ, 1.0);
        CsrGraph::from_builder(&builder)
    }

    #[test]
    fn test_select_ngrams_and_unigrams() {
        let table = rank_importance(&term_graph(), Centrality::Strength).unwrap();

        let multi = select_ngrams(&table, 2);
        let names: Vec<_> = multi.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["occupancy model", "burn severity", "black-backed woodpecker"]
        );

        let single = select_unigrams(&table);
        assert_eq!(single.len(), 1);
        assert_eq!(single.rows[0].name, "fire");
        // Rank from the full table
        assert_eq!(single.rows[0].rank, 4);
    }

    #[test]
    fn test_reduce_graph() {
        let graph = term_graph();
        let table = rank_importance(&graph, Centrality::Strength).unwrap();

        let reduced = reduce_graph(&graph, &table, 2.5);
        assert_eq!(
            export_keywords(&reduced),
            vec!["fire", "black-backed woodpecker"]
        );
        assert_eq!(reduced.edge_weight(0, 1), Some(3.0));
        assert_eq!(reduced.num_edges(), 1);

        for name in &reduced.names {
            assert!(table.importance_of(name).unwrap() >= 2.5);
        }
    }

    #[test]
    fn test_reduce_graph_no_new_edges() {
        let graph = term_graph();
        let table = rank_importance(&graph, Centrality::Strength).unwrap();
        let reduced = reduce_graph(&graph, &table, 0.0);

        assert_eq!(reduced, graph);
        for (a, b, w) in reduced.edges() {
            let sa = graph.get_node_by_name(reduced.name(a)).unwrap();
            let sb = graph.get_node_by_name(reduced.name(b)).unwrap();
            assert_eq!(graph.edge_weight(sa, sb), Some(w));
        }
    }

    #[test]
    fn test_nodes_missing_from_table_are_dropped() {
        let graph = term_graph();
        let table = rank_importance(&graph, Centrality::Strength).unwrap();
        let partial = select_ngrams(&table, 2);

        let reduced = reduce_graph(&graph, &partial, 0.0);
        assert!(reduced.get_node_by_name("fire").is_none());
        assert_eq!(reduced.num_nodes, 3);
    }

    #[test]
    fn test_cutoff_above_everything() {
        let graph = term_graph();
        let table = rank_importance(&graph, Centrality::Strength).unwrap();
        let reduced = reduce_graph(&graph, &table, 100.0);
        assert!(reduced.is_empty());
        assert!(export_keywords(&reduced).is_empty());
    }
}
