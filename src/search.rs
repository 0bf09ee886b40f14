//! Boolean search strings
//!
//! Concept groups of keywords become a query of the form
//! `("a" OR b) AND (c OR "d e")`: synonyms within a group are alternatives,
//! and every group must match.

use crate::errors::{LitsearchError, Result};
use crate::nlp::text::collapse_whitespace;
use rustc_hash::FxHashSet;
use tracing::{debug, instrument};

/// Formatting options for [`write_search`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Quote single-word terms too, not only phrases
    pub quote_all: bool,
}

impl SearchOptions {
    /// Builder method: quote every term
    pub fn with_quote_all(mut self, quote_all: bool) -> Self {
        self.quote_all = quote_all;
        self
    }
}

/// Lowercase, collapse whitespace and drop embedded quotes
fn normalize_term(term: &str) -> String {
    collapse_whitespace(&term.replace('"', " ")).to_lowercase()
}

fn format_term(term: &str, options: SearchOptions) -> String {
    if options.quote_all || term.contains(' ') {
        format!("\"{term}\"")
    } else {
        term.to_string()
    }
}

/// Build a Boolean query from concept groups
///
/// Terms within a group are joined with `OR`, groups with `AND`, and each
/// group is parenthesised. Multi-word terms are quoted. Repeated terms in a
/// group are dropped, keeping the first.
#[instrument(skip(groups), fields(groups = groups.len()))]
pub fn write_search<S: AsRef<str>>(groups: &[Vec<S>], options: SearchOptions) -> Result<String> {
    if groups.is_empty() {
        return Err(LitsearchError::missing_input(
            "search needs at least one concept group",
        ));
    }

    let mut clauses = Vec::with_capacity(groups.len());
    for (index, group) in groups.iter().enumerate() {
        let mut seen = FxHashSet::default();
        let terms: Vec<String> = group
            .iter()
            .map(|term| normalize_term(term.as_ref()))
            .filter(|term| !term.is_empty())
            .filter(|term| seen.insert(term.clone()))
            .map(|term| format_term(&term, options))
            .collect();

        if terms.is_empty() {
            return Err(LitsearchError::missing_input(format!(
                "concept group {index} has no terms"
            )));
        }
        clauses.push(format!("({})", terms.join(" OR ")));
    }

    let query = clauses.join(" AND ");
    debug!(len = query.len(), "wrote search string");
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_two_groups() {
        let groups = vec![
            group(&["black-backed woodpecker", "picoides arcticus"]),
            group(&["fire", "burned forest", "wildfire"]),
        ];
        let query = write_search(&groups, SearchOptions::default()).unwrap();
        assert_eq!(
            query,
            "(\"black-backed woodpecker\" OR \"picoides arcticus\") AND (fire OR \"burned forest\" OR wildfire)"
        );
    }

    #[test]
    fn test_single_group() {
        let query = write_search(&[vec!["occupancy"]], SearchOptions::default()).unwrap();
        assert_eq!(query, "(occupancy)");
    }

    #[test]
    fn test_duplicates_keep_first() {
        let groups = vec![group(&["Fire", "wildfire", "fire", "  Wildfire "])];
        let query = write_search(&groups, SearchOptions::default()).unwrap();
        assert_eq!(query, "(fire OR wildfire)");
    }

    #[test]
    fn test_quote_all() {
        let groups = vec![group(&["fire", "burn severity"])];
        let query = write_search(&groups, SearchOptions::default().with_quote_all(true)).unwrap();
        assert_eq!(query, "(\"fire\" OR \"burn severity\")");
    }

    #[test]
    fn test_embedded_quotes_are_dropped() {
        let groups = vec![group(&["\"home range\""])];
        let query = write_search(&groups, SearchOptions::default()).unwrap();
        assert_eq!(query, "(\"home range\")");
    }

    #[test]
    fn test_missing_groups() {
        let empty: Vec<Vec<String>> = Vec::new();
        assert!(matches!(
            write_search(&empty, SearchOptions::default()),
            Err(LitsearchError::MissingInput(_))
        ));

        let groups = vec![group(&["fire"]), group(&["  ", ""])];
        assert!(matches!(
            write_search(&groups, SearchOptions::default()),
            Err(LitsearchError::MissingInput(_))
        ));
    }
}
