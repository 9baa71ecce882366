//! plWordNet Search - lemma search over a loaded graph
//!
//! Provides exact substring search and fuzzy search (nucleo).

pub mod error;
pub mod exact;
pub mod traits;

#[cfg(feature = "fuzzy")]
pub mod fuzzy;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{SearchError, SearchResult};
pub use exact::ExactSearchEngine;
pub use traits::{SearchEngine, SearchHit};

#[cfg(feature = "fuzzy")]
pub use fuzzy::FuzzySearchEngine;
