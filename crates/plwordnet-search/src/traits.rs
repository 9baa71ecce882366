//! Search engine traits

use plwordnet_core::{LemmaQuery, LexicalUnit, Wordnet};
use serde::Serialize;

pub use crate::error::{SearchError, SearchResult as Result};

/// Result from search including score
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    pub unit: &'a LexicalUnit,
    /// Engine-specific score; higher is better
    pub score: u32,
}

/// Trait for lemma search engines
///
/// Engines are stateless: the loaded graph is the index.
pub trait SearchEngine: Send + Sync {
    /// Units matching `query`, best first, at most `query.limit` of them
    fn search<'a>(&self, query: &LemmaQuery, wordnet: &'a Wordnet) -> Result<Vec<SearchHit<'a>>>;
}

/// Reject queries with no text
pub(crate) fn query_text(query: &LemmaQuery) -> Result<&str> {
    let text = query.text.trim();
    if text.is_empty() {
        return Err(SearchError::Query("search text must not be empty".to_string()));
    }
    Ok(text)
}

/// Best first; ties keep ascending unit id
pub(crate) fn rank(mut hits: Vec<SearchHit<'_>>, limit: usize) -> Vec<SearchHit<'_>> {
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits.truncate(limit);
    hits
}
