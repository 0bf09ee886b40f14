//! Graph construction and representation
//!
//! This module provides the term co-occurrence network: building it from a
//! document-feature matrix and storing it for centrality computations.

pub mod builder;
pub mod csr;
pub mod network;
