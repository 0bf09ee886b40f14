//! Text collaborators
//!
//! Stopword lists, punctuation handling, keyword cleaning and word windows.

pub mod stopwords;
pub mod text;
