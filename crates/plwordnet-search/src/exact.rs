//! Exact search engine - case-insensitive substring matching on lemmas

use crate::traits::{query_text, rank, Result, SearchEngine, SearchHit};
use plwordnet_core::{LemmaQuery, Wordnet};

const SCORE_EXACT: u32 = 2;
const SCORE_PREFIX: u32 = 1;
const SCORE_CONTAINS: u32 = 0;

/// Simple exact substring search engine (stateless)
///
/// A whole-lemma match ranks above a prefix match, which ranks above any
/// other substring match.
pub struct ExactSearchEngine;

impl ExactSearchEngine {
    pub fn new() -> Self {
        Self
    }

    fn score(lemma: &str, needle: &str) -> Option<u32> {
        if lemma == needle {
            Some(SCORE_EXACT)
        } else if lemma.starts_with(needle) {
            Some(SCORE_PREFIX)
        } else if lemma.contains(needle) {
            Some(SCORE_CONTAINS)
        } else {
            None
        }
    }
}

impl Default for ExactSearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine for ExactSearchEngine {
    fn search<'a>(&self, query: &LemmaQuery, wordnet: &'a Wordnet) -> Result<Vec<SearchHit<'a>>> {
        let needle = query_text(query)?.to_lowercase();

        let hits = wordnet
            .lexical_units()
            .filter(|unit| query.accepts(unit))
            .filter_map(|unit| {
                let score = Self::score(&unit.name.to_lowercase(), &needle)?;
                Some(SearchHit { unit, score })
            })
            .collect();

        Ok(rank(hits, query.limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::testing;
    use plwordnet_core::{Language, PartOfSpeech};

    fn names(hits: &[SearchHit<'_>]) -> Vec<String> {
        hits.iter().map(|h| h.unit.to_string()).collect()
    }

    #[test]
    fn test_exact_search_ranking() {
        let wn = testing::wordnet();
        let hits = ExactSearchEngine::new()
            .search(&LemmaQuery::new("kot"), &wn)
            .unwrap();

        assert_eq!(
            names(&hits),
            vec!["kot.1", "Kot.2", "kotek.1", "kotwica.1", "kotłować.1", "szkot.1"]
        );
        assert_eq!(hits[0].score, 2);
        assert_eq!(hits[5].score, 0);
    }

    #[test]
    fn test_exact_search_filters() {
        let wn = testing::wordnet();
        let engine = ExactSearchEngine::new();

        let verbs = engine
            .search(&LemmaQuery::new("kot").with_pos(PartOfSpeech::Verb), &wn)
            .unwrap();
        assert_eq!(names(&verbs), vec!["kotłować.1"]);

        let english = engine
            .search(&LemmaQuery::new("a").with_language(Language::English), &wn)
            .unwrap();
        assert_eq!(names(&english), vec!["cat.1"]);
    }

    #[test]
    fn test_exact_search_limit() {
        let wn = testing::wordnet();
        let hits = ExactSearchEngine::new()
            .search(&LemmaQuery::new("KOT").with_limit(2), &wn)
            .unwrap();
        assert_eq!(names(&hits), vec!["kot.1", "Kot.2"]);
    }

    #[test]
    fn test_empty_query_rejected() {
        let wn = testing::wordnet();
        let err = ExactSearchEngine::new()
            .search(&LemmaQuery::new("  "), &wn)
            .unwrap_err();
        assert!(matches!(err, SearchError::Query(_)));
    }
}
