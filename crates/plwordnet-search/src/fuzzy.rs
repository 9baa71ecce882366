//! Fuzzy search using nucleo

use nucleo_matcher::{
    pattern::{AtomKind, CaseMatching, Normalization, Pattern},
    Config, Matcher, Utf32Str,
};

use crate::traits::{query_text, rank, Result, SearchEngine, SearchHit};
use plwordnet_core::{LemmaQuery, Wordnet};

/// Stateless fuzzy search engine using nucleo
pub struct FuzzySearchEngine {
    /// Hits scoring below this are dropped
    pub min_score: u32,
}

impl FuzzySearchEngine {
    pub fn new() -> Self {
        Self { min_score: 0 }
    }

    pub fn with_min_score(mut self, min_score: u32) -> Self {
        self.min_score = min_score;
        self
    }
}

impl Default for FuzzySearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine for FuzzySearchEngine {
    fn search<'a>(&self, query: &LemmaQuery, wordnet: &'a Wordnet) -> Result<Vec<SearchHit<'a>>> {
        let text = query_text(query)?;
        let pattern = Pattern::new(
            text,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );
        let mut matcher = Matcher::new(Config::DEFAULT);
        let mut buf = Vec::new();

        let hits: Vec<SearchHit<'a>> = wordnet
            .lexical_units()
            .filter(|unit| query.accepts(unit))
            .filter_map(|unit| {
                let score = pattern.score(Utf32Str::new(&unit.name, &mut buf), &mut matcher)?;
                (score >= self.min_score).then_some(SearchHit { unit, score })
            })
            .collect();

        tracing::debug!("Fuzzy search '{}' matched {} units", text, hits.len());
        Ok(rank(hits, query.limit))
    }
}
