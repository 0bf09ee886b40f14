//! Document-feature matrix
//!
//! Rows are documents, columns are candidate terms. Cells hold non-negative
//! counts; [`build_dfm`] only ever writes presence (0 or 1), but the network
//! builder accepts any counts.

use crate::errors::{LitsearchError, Result};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use regex::Regex;
use tracing::{debug, instrument};

/// Dense row-major documents × terms matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFeatureMatrix {
    n_docs: usize,
    terms: Vec<String>,
    cells: Vec<u32>,
}

impl DocumentFeatureMatrix {
    /// Wrap row-major cells; `cells.len()` must equal `n_docs * terms.len()`
    pub fn new(n_docs: usize, terms: Vec<String>, cells: Vec<u32>) -> Result<Self> {
        if cells.len() != n_docs * terms.len() {
            return Err(LitsearchError::invalid_config(format!(
                "matrix of {} x {} needs {} cells, got {}",
                n_docs,
                terms.len(),
                n_docs * terms.len(),
                cells.len()
            )));
        }
        Ok(Self {
            n_docs,
            terms,
            cells,
        })
    }

    /// Build from one row per document
    pub fn from_rows(terms: Vec<String>, rows: &[Vec<u32>]) -> Result<Self> {
        let n_terms = terms.len();
        let mut cells = Vec::with_capacity(rows.len() * n_terms);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_terms {
                return Err(LitsearchError::invalid_config(format!(
                    "row {i} has {} cells, expected {n_terms}",
                    row.len()
                )));
            }
            cells.extend_from_slice(row);
        }
        Self::new(rows.len(), terms, cells)
    }

    /// Number of documents (rows)
    pub fn n_docs(&self) -> usize {
        self.n_docs
    }

    /// Number of terms (columns)
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// Column names
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Check if the matrix has no rows or no columns
    pub fn is_empty(&self) -> bool {
        self.n_docs == 0 || self.terms.is_empty()
    }

    /// Cell value at (document, term)
    pub fn get(&self, doc: usize, term: usize) -> u32 {
        self.cells[doc * self.terms.len() + term]
    }

    /// One document's row
    pub fn row(&self, doc: usize) -> &[u32] {
        let n = self.terms.len();
        &self.cells[doc * n..(doc + 1) * n]
    }

    /// Iterate over document rows
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        (0..self.n_docs).map(move |doc| self.row(doc))
    }

    /// Sum of one term's column
    pub fn column_sum(&self, term: usize) -> u64 {
        self.rows().map(|row| u64::from(row[term])).sum()
    }

    /// Number of documents in which a term is present
    pub fn document_frequency(&self, term: usize) -> usize {
        self.rows().filter(|row| row[term] > 0).count()
    }

    /// Sum of one document's row
    pub fn row_sum(&self, doc: usize) -> u64 {
        self.row(doc).iter().map(|&c| u64::from(c)).sum()
    }

    /// Keep only the listed columns, in the given order
    pub fn select_columns(&self, keep: &[usize]) -> Self {
        let terms = keep.iter().map(|&t| self.terms[t].clone()).collect();
        let cells = self
            .rows()
            .flat_map(|row| keep.iter().map(move |&t| row[t]))
            .collect();
        Self {
            n_docs: self.n_docs,
            terms,
            cells,
        }
    }

    /// Fold columns that share a term name into the first one
    ///
    /// A merged cell holds the largest count any duplicate had in that
    /// document. Returns the merged matrix and the number of columns folded.
    pub fn merge_duplicate_terms(&self) -> (Self, usize) {
        let mut slots: FxHashMap<&str, usize> = FxHashMap::default();
        let mut terms: Vec<String> = Vec::with_capacity(self.terms.len());
        let targets: Vec<usize> = self
            .terms
            .iter()
            .map(|term| {
                *slots.entry(term.as_str()).or_insert_with(|| {
                    terms.push(term.clone());
                    terms.len() - 1
                })
            })
            .collect();

        let merged = self.terms.len() - terms.len();
        if merged == 0 {
            return (self.clone(), 0);
        }

        let n_terms = terms.len();
        let mut cells = vec![0u32; self.n_docs * n_terms];
        for (d, row) in self.rows().enumerate() {
            for (&target, &count) in targets.iter().zip(row) {
                let cell = &mut cells[d * n_terms + target];
                *cell = (*cell).max(count);
            }
        }
        let matrix = Self {
            n_docs: self.n_docs,
            terms,
            cells,
        };
        (matrix, merged)
    }

    /// Keep only the listed rows, in the given order
    pub fn select_rows(&self, keep: &[usize]) -> Self {
        let cells = keep
            .iter()
            .flat_map(|&doc| self.row(doc).iter().copied())
            .collect();
        Self {
            n_docs: keep.len(),
            terms: self.terms.clone(),
            cells,
        }
    }
}

/// Build a binary presence matrix of terms in documents
///
/// Documents and terms are lowercased. Each term is a regular expression
/// matched anywhere in the document, so a term that is a substring of a
/// longer word ("burn" in "burned") counts as present.
#[instrument(skip(documents, terms), fields(documents = documents.len(), terms = terms.len()))]
pub fn build_dfm<D, T>(documents: &[D], terms: &[T]) -> Result<DocumentFeatureMatrix>
where
    D: AsRef<str> + Sync,
    T: AsRef<str> + Sync,
{
    let docs: Vec<String> = documents.iter().map(|d| d.as_ref().to_lowercase()).collect();
    let terms: Vec<String> = terms.iter().map(|t| t.as_ref().to_lowercase()).collect();

    let columns: Vec<Result<Vec<u32>>> = terms
        .par_iter()
        .map(|term| {
            let pattern = Regex::new(term).map_err(|e| LitsearchError::InvalidPattern {
                term: term.clone(),
                reason: e.to_string(),
            })?;
            Ok(docs
                .iter()
                .map(|doc| u32::from(pattern.is_match(doc)))
                .collect())
        })
        .collect();
    let columns = columns.into_iter().collect::<Result<Vec<_>>>()?;

    let n_terms = terms.len();
    let mut cells = vec![0u32; docs.len() * n_terms];
    for (t, column) in columns.iter().enumerate() {
        for (d, &present) in column.iter().enumerate() {
            cells[d * n_terms + t] = present;
        }
    }

    let matrix = DocumentFeatureMatrix::new(docs.len(), terms, cells)?;
    debug!(
        nonzero = matrix.cells.iter().filter(|&&c| c > 0).count(),
        "built document-feature matrix"
    );
    Ok(matrix)
}
