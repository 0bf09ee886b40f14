//! Candidate term extraction
//!
//! [`ngram`] pulls stopword-free word windows out of free text;
//! [`aggregate`] counts and filters them (or author keywords) into the
//! candidate term list.

pub mod aggregate;
pub mod ngram;
