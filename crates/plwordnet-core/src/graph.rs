//! The loaded, immutable wordnet graph and its query surface

use crate::builder::{LoadOptions, LoadStats, WordnetBuilder};
use crate::entity::{
    Language, LexicalUnit, LexicalUnitId, RelationType, RelationTypeId, Synset, SynsetId,
};
use crate::error::Result;
use crate::query::{split_sense_token, FindResult, RelationQuery};
use crate::schema::RawWordnet;
use crate::sentiment::SentimentTable;
use crate::store::TripleStore;
use crate::traversal::Hierarchy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// A relation between two synsets, resolved to entities
pub type SynsetRelation<'a> = (&'a Synset, &'a RelationType, &'a Synset);

/// A relation between two lexical units, resolved to entities
pub type LexicalRelation<'a> = (&'a LexicalUnit, &'a RelationType, &'a LexicalUnit);

/// Fully linked wordnet.
///
/// Built once by [`WordnetBuilder`] and never mutated afterwards, so shared
/// references can be handed to any number of readers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wordnet {
    pub(crate) relation_types: BTreeMap<RelationTypeId, RelationType>,
    pub(crate) synsets: BTreeMap<SynsetId, Synset>,
    pub(crate) lexical_units: BTreeMap<LexicalUnitId, LexicalUnit>,
    pub(crate) synset_relations: TripleStore<SynsetId>,
    pub(crate) lexical_relations: TripleStore<LexicalUnitId>,
    /// Lowercased lemma to unit ids, ascending
    pub(crate) lemma_index: HashMap<String, Vec<LexicalUnitId>>,
    pub(crate) hierarchy: Hierarchy,
    pub(crate) stats: LoadStats,
}

impl Wordnet {
    // ─────────────────────────────────────────────────────────────────────────
    // Loading
    // ─────────────────────────────────────────────────────────────────────────

    /// Load from an XML source
    pub fn load<R: BufRead>(source: R, options: &LoadOptions) -> Result<Self> {
        let raw = RawWordnet::from_xml(source)?;
        Ok(Self::builder(raw).with_options(options.clone()).build())
    }

    /// Load from an XML source plus a sentiment table
    pub fn load_with_sentiment<R: BufRead, S: Read>(
        source: R,
        sentiment: S,
        options: &LoadOptions,
    ) -> Result<Self> {
        let raw = RawWordnet::from_xml(source)?;
        let table = SentimentTable::from_reader(sentiment, options.sentiment_delimiter)?;
        Ok(Self::builder(raw)
            .with_sentiment(table)
            .with_options(options.clone())
            .build())
    }

    /// Load from files on disk
    pub fn from_paths(
        xml: impl AsRef<Path>,
        sentiment: Option<&Path>,
        options: &LoadOptions,
    ) -> Result<Self> {
        let source = BufReader::new(File::open(xml.as_ref())?);
        tracing::debug!("Loading wordnet from {}", xml.as_ref().display());
        match sentiment {
            Some(path) => {
                tracing::debug!("Loading sentiment table from {}", path.display());
                let table = BufReader::new(File::open(path)?);
                Self::load_with_sentiment(source, table, options)
            }
            None => Self::load(source, options),
        }
    }

    pub fn builder(raw: RawWordnet) -> WordnetBuilder {
        WordnetBuilder::new(raw)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn synset(&self, id: impl Into<SynsetId>) -> Option<&Synset> {
        self.synsets.get(&id.into())
    }

    pub fn lexical_unit(&self, id: impl Into<LexicalUnitId>) -> Option<&LexicalUnit> {
        self.lexical_units.get(&id.into())
    }

    pub fn relation_type(&self, id: impl Into<RelationTypeId>) -> Option<&RelationType> {
        self.relation_types.get(&id.into())
    }

    /// All synsets, by ascending id
    pub fn synsets(&self) -> impl Iterator<Item = &Synset> {
        self.synsets.values()
    }

    /// All lexical units, by ascending id
    pub fn lexical_units(&self) -> impl Iterator<Item = &LexicalUnit> {
        self.lexical_units.values()
    }

    /// All relation types, by ascending id
    pub fn relation_types(&self) -> impl Iterator<Item = &RelationType> {
        self.relation_types.values()
    }

    /// Relation types with exactly this name
    pub fn relation_types_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a RelationType> + 'a {
        self.relation_types.values().filter(move |r| r.name == name)
    }

    /// Member units of `synset`, in source order
    pub fn members<'a>(
        &'a self,
        synset: &'a Synset,
    ) -> impl Iterator<Item = &'a LexicalUnit> + 'a {
        synset
            .lexical_units
            .iter()
            .filter_map(|id| self.lexical_units.get(id))
    }

    /// Synset owning `unit`
    pub fn owner(&self, unit: &LexicalUnit) -> Option<&Synset> {
        self.synsets.get(&unit.synset)
    }

    pub fn inverse(&self, relation_type: &RelationType) -> Option<&RelationType> {
        relation_type
            .inverse
            .and_then(|id| self.relation_types.get(&id))
    }

    pub fn parent(&self, relation_type: &RelationType) -> Option<&RelationType> {
        relation_type
            .parent
            .and_then(|id| self.relation_types.get(&id))
    }

    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Relation queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Synset relations matching every supplied filter, in load order.
    ///
    /// Fails with [`crate::Error::InvalidQuery`] when the query has no
    /// filter. Triples naming a synset or relation type that did not survive
    /// loading are skipped.
    pub fn synset_relations_where(
        &self,
        query: &RelationQuery<SynsetId>,
    ) -> Result<Vec<SynsetRelation<'_>>> {
        let triples = self
            .synset_relations
            .matching(query.subject, query.predicate, query.object)?;
        Ok(triples
            .into_iter()
            .filter_map(|t| {
                Some((
                    self.synsets.get(&t.subject)?,
                    self.relation_types.get(&t.predicate)?,
                    self.synsets.get(&t.object)?,
                ))
            })
            .collect())
    }

    /// Lexical relations matching every supplied filter, in load order
    pub fn lexical_relations_where(
        &self,
        query: &RelationQuery<LexicalUnitId>,
    ) -> Result<Vec<LexicalRelation<'_>>> {
        let triples = self
            .lexical_relations
            .matching(query.subject, query.predicate, query.object)?;
        Ok(triples
            .into_iter()
            .filter_map(|t| {
                Some((
                    self.lexical_units.get(&t.subject)?,
                    self.relation_types.get(&t.predicate)?,
                    self.lexical_units.get(&t.object)?,
                ))
            })
            .collect())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lemma lookup
    // ─────────────────────────────────────────────────────────────────────────

    /// Units with this lemma, case-insensitive, by ascending id
    pub fn lemmas(&self, name: &str) -> Vec<&LexicalUnit> {
        self.lemma_index
            .get(&name.to_lowercase())
            .map(|ids| ids.iter().filter_map(|id| self.lexical_units.get(id)).collect())
            .unwrap_or_default()
    }

    /// Resolve `lemma` or `lemma.N`.
    ///
    /// With a variant, the matching unit in the primary language wins over
    /// one in the secondary language.
    pub fn find(&self, token: &str) -> FindResult<'_> {
        let (lemma, variant) = split_sense_token(token);
        let candidates = self.lemmas(lemma);
        match variant {
            None => FindResult::Candidates(candidates),
            Some(variant) => {
                let mut matching = candidates.into_iter().filter(|u| u.variant == variant);
                let first = matching.next();
                let polish = first
                    .filter(|u| u.language == Language::Polish)
                    .or_else(|| matching.find(|u| u.language == Language::Polish));
                FindResult::Variant(polish.or(first))
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Display
    // ─────────────────────────────────────────────────────────────────────────

    /// `{#id : lemma.1 lemma.2}`, optionally truncated to `max_items` members
    pub fn display_synset(&self, synset: &Synset, max_items: Option<usize>) -> String {
        let members: Vec<String> = self.members(synset).map(|u| u.to_string()).collect();
        let shown = max_items.map_or(members.len(), |max| max.min(members.len()));
        let mut lemmas = members[..shown].join(" ");
        if shown < members.len() {
            lemmas.push_str(" ...");
        }
        format!("{{#{} : {}}}", synset.id, lemmas)
    }
}

impl fmt::Display for Wordnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testing;

    #[test]
    fn test_accessors() {
        let wn = testing::wordnet();
        assert_eq!(wn.synset(100u32).unwrap().id, SynsetId(100));
        assert_eq!(wn.lexical_unit(2u32).unwrap().to_string(), "kot.2");
        assert_eq!(wn.relation_type(10u32).unwrap().name, "hiperonimia");
        assert!(wn.synset(999u32).is_none());

        let named: Vec<_> = wn.relation_types_named("hiponimia").collect();
        assert_eq!(named.len(), 1);
        assert_eq!(wn.parent(wn.relation_type(50u32).unwrap()).unwrap().id, RelationTypeId(10));
    }

    #[test]
    fn test_query_requires_filter() {
        let wn = testing::wordnet();
        let err = wn
            .synset_relations_where(&RelationQuery::new())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidQuery(_)));
        assert!(wn.lexical_relations_where(&RelationQuery::new()).is_err());
    }

    #[test]
    fn test_single_filter_matches_every_triple() {
        let wn = testing::wordnet();
        let found = wn
            .synset_relations_where(&RelationQuery::new().subject(SynsetId(100)))
            .unwrap();
        let objects: Vec<u32> = found.iter().map(|(_, _, o)| o.id.0).collect();
        assert_eq!(objects, vec![103, 107, 104]);
        assert!(found.iter().all(|(s, _, _)| s.id == SynsetId(100)));

        let by_predicate = wn
            .synset_relations_where(&RelationQuery::new().predicate(10u32))
            .unwrap();
        assert!(by_predicate.iter().all(|(_, p, _)| p.id == RelationTypeId(10)));
        // 105 -> 108 is dangling and skipped.
        assert!(by_predicate.iter().all(|(_, _, o)| o.id != SynsetId(108)));
    }

    #[test]
    fn test_query_by_entity_reference() {
        let wn = testing::wordnet();
        let ssak = wn.synset(103u32).unwrap();
        let hyponymy = wn.relation_type(11u32).unwrap();
        let found = wn
            .synset_relations_where(&RelationQuery::new().subject(ssak).predicate(hyponymy))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].2.id, SynsetId(100));
    }

    #[test]
    fn test_lexical_relations_keep_duplicates() {
        let wn = testing::wordnet();
        let found = wn
            .lexical_relations_where(
                &RelationQuery::new()
                    .subject(LexicalUnitId(1))
                    .object(LexicalUnitId(2)),
            )
            .unwrap();
        assert_eq!(found.len(), 2);
        assert!(found[0].1.is_symmetric());
    }

    #[test]
    fn test_lemmas_case_insensitive() {
        let wn = testing::wordnet();
        let units: Vec<String> = wn.lemmas("KOT").iter().map(|u| u.to_string()).collect();
        assert_eq!(units, vec!["kot.1", "kot.2", "kot.3", "Kot.3"]);
        assert!(wn.lemmas("żyrafa").is_empty());
    }

    #[test]
    fn test_find_with_variant_prefers_polish() {
        let wn = testing::wordnet();
        // kot.3 exists in both languages; the English unit has the lower id.
        match wn.find("kot.3") {
            FindResult::Variant(Some(unit)) => {
                assert_eq!(unit.id, LexicalUnitId(13));
                assert_eq!(unit.language, Language::Polish);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            wn.find("kot.1").units()[0].id,
            LexicalUnitId(1)
        );
        assert_eq!(wn.find("kot.9"), FindResult::Variant(None));
    }

    #[test]
    fn test_find_secondary_language_fallback() {
        let wn = testing::wordnet();
        let unit = wn.find("cat.1").units();
        assert_eq!(unit.len(), 1);
        assert_eq!(unit[0].language, Language::English);
    }

    #[test]
    fn test_find_without_variant() {
        let wn = testing::wordnet();
        let result = wn.find("kot");
        assert!(matches!(result, FindResult::Candidates(_)));
        assert_eq!(result.units().len(), 4);
        assert!(wn.find("nic").is_empty());
    }

    #[test]
    fn test_display() {
        let wn = testing::wordnet();
        let synset = wn.synset(107u32).unwrap();
        assert_eq!(wn.display_synset(synset, None), "{#107 : byt.1 istota.1}");
        assert_eq!(wn.display_synset(synset, Some(1)), "{#107 : byt.1 ...}");

        let summary = wn.to_string();
        assert!(summary.starts_with("PlWordnet\n  lexical units: "));
        assert!(summary.contains("synset relations: "));
    }

    #[test]
    fn test_from_paths() {
        let dir = tempfile::tempdir().unwrap();
        let xml = dir.path().join("plwordnet.xml");
        let csv = dir.path().join("sentiment.csv");
        std::fs::write(&xml, testing::FIXTURE).unwrap();
        std::fs::write(&csv, testing::SENTIMENT).unwrap();

        let options = LoadOptions::default();
        let wn = Wordnet::from_paths(&xml, Some(csv.as_path()), &options).unwrap();
        assert_eq!(wn, testing::wordnet_with_sentiment());

        let missing = dir.path().join("missing.xml");
        let err = Wordnet::from_paths(&missing, None, &options).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
