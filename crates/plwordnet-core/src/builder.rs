//! Entity linker: raw records to a frozen, queryable [`Wordnet`]
//!
//! The pipeline is fixed and runs once, in order:
//!
//! 1. resolve relation type `parent`/`inverse` ids and infer missing inverses
//! 2. attach lexical units to the synset listing them
//! 3. clean known bad-data artifacts out of free text
//! 4. drop synsets left without members
//! 5. merge sentiment annotations
//! 6. parse rich descriptions (optional)
//! 7. build the triple and lemma indices
//!
//! Nothing here fails: records that cannot be linked are dropped and counted
//! in [`LoadStats`].

use crate::description::{parse_description, Description};
use crate::entity::{LexicalUnit, LexicalUnitId, RelationType, RelationTypeId, Synset, SynsetId};
use crate::graph::Wordnet;
use crate::schema::{RawLexicalUnit, RawWordnet};
use crate::sentiment::SentimentTable;
use crate::store::TripleStore;
use crate::traversal::Hierarchy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Literal placeholders the source uses instead of leaving a field empty
const PLACEHOLDERS: &[&str] = &["brak danych", "brak definicji"];

/// Options for the load pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Run the rich description pass
    pub parse_descriptions: bool,

    /// Field delimiter of the sentiment table
    pub sentiment_delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            parse_descriptions: true,
            sentiment_delimiter: b',',
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_descriptions(mut self, parse: bool) -> Self {
        self.parse_descriptions = parse;
        self
    }

    pub fn with_sentiment_delimiter(mut self, delimiter: u8) -> Self {
        self.sentiment_delimiter = delimiter;
        self
    }
}

/// Counters collected while loading
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    pub relation_types: usize,
    pub lexical_units: usize,
    pub synsets: usize,
    pub synset_relations: usize,
    pub lexical_relations: usize,

    /// Units listed by no synset, or by a synset after their first owner
    pub dropped_units: usize,
    /// Member ids naming units that do not exist
    pub dangling_members: usize,
    /// Relation type parent/inverse ids naming types that do not exist
    pub dangling_relation_refs: usize,
    pub inferred_inverses: usize,
    pub removed_synsets: usize,
    pub sentiment_annotations: usize,

    pub descriptions_parsed: usize,
    pub descriptions_malformed: usize,
    pub synset_fallbacks: usize,
}

impl fmt::Display for LoadStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PlWordnet")?;
        writeln!(f, "  lexical units: {}", self.lexical_units)?;
        writeln!(f, "  synsets: {}", self.synsets)?;
        writeln!(f, "  relation types: {}", self.relation_types)?;
        writeln!(f, "  synset relations: {}", self.synset_relations)?;
        write!(f, "  lexical relations: {}", self.lexical_relations)
    }
}

/// Runs the load pipeline over raw records.
///
/// Only [`WordnetBuilder::build`] yields a [`Wordnet`], so a graph can never
/// be queried half-linked.
#[derive(Debug)]
pub struct WordnetBuilder {
    raw: RawWordnet,
    sentiment: Option<SentimentTable>,
    options: LoadOptions,
    stats: LoadStats,
}

impl WordnetBuilder {
    pub fn new(raw: RawWordnet) -> Self {
        Self {
            raw,
            sentiment: None,
            options: LoadOptions::default(),
            stats: LoadStats::default(),
        }
    }

    pub fn with_sentiment(mut self, table: SentimentTable) -> Self {
        self.sentiment = Some(table);
        self
    }

    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(mut self) -> Wordnet {
        let raw = std::mem::take(&mut self.raw);

        let relation_types = self.link_relation_types(raw.relation_types);
        let (mut synsets, mut lexical_units) = self.link_units(raw.synsets, raw.lexical_units);

        clean_text_fields(&mut synsets, &mut lexical_units);
        self.remove_empty_synsets(&mut synsets);
        self.attach_sentiment(&mut lexical_units);
        if self.options.parse_descriptions {
            self.attach_descriptions(&synsets, &mut lexical_units);
        }

        let synset_relations = TripleStore::new(raw.synset_relations);
        let lexical_relations = TripleStore::new(raw.lexical_relations);
        let lemma_index = build_lemma_index(&lexical_units);
        let hierarchy = Hierarchy::resolve(&relation_types);

        self.stats.relation_types = relation_types.len();
        self.stats.synsets = synsets.len();
        self.stats.lexical_units = lexical_units.len();
        self.stats.synset_relations = synset_relations.len();
        self.stats.lexical_relations = lexical_relations.len();

        tracing::info!(
            "Linked {} synsets, {} lexical units, {} relation types",
            self.stats.synsets,
            self.stats.lexical_units,
            self.stats.relation_types
        );

        Wordnet {
            relation_types,
            synsets,
            lexical_units,
            synset_relations,
            lexical_relations,
            lemma_index,
            hierarchy,
            stats: self.stats,
        }
    }

    fn link_relation_types(
        &mut self,
        raw: Vec<RelationType>,
    ) -> BTreeMap<RelationTypeId, RelationType> {
        let mut types: BTreeMap<RelationTypeId, RelationType> = BTreeMap::new();
        for relation_type in raw {
            if types.contains_key(&relation_type.id) {
                tracing::debug!("Duplicate relation type {} ignored", relation_type.id);
                continue;
            }
            types.insert(relation_type.id, relation_type);
        }

        let ids: Vec<RelationTypeId> = types.keys().copied().collect();
        for relation_type in types.values_mut() {
            for reference in [&mut relation_type.parent, &mut relation_type.inverse] {
                if reference.is_some_and(|id| ids.binary_search(&id).is_err()) {
                    *reference = None;
                    self.stats.dangling_relation_refs += 1;
                }
            }
        }

        // A pair declared from one side only gets the other side filled in.
        for id in &ids {
            let Some(inverse) = types.get(id).and_then(|r| r.inverse) else {
                continue;
            };
            if inverse == *id {
                continue;
            }
            if let Some(other) = types.get_mut(&inverse) {
                if other.inverse.is_none() {
                    other.inverse = Some(*id);
                    self.stats.inferred_inverses += 1;
                    tracing::debug!("Inferred inverse {} -> {}", inverse, id);
                }
            }
        }

        types
    }

    fn link_units(
        &mut self,
        raw_synsets: Vec<Synset>,
        raw_units: Vec<RawLexicalUnit>,
    ) -> (
        BTreeMap<SynsetId, Synset>,
        BTreeMap<LexicalUnitId, LexicalUnit>,
    ) {
        let mut pending: HashMap<LexicalUnitId, RawLexicalUnit> = HashMap::new();
        for unit in raw_units {
            pending.entry(unit.id).or_insert(unit);
        }

        let mut synsets = BTreeMap::new();
        let mut lexical_units = BTreeMap::new();

        for mut synset in raw_synsets {
            if synsets.contains_key(&synset.id) {
                tracing::debug!("Duplicate synset {} ignored", synset.id);
                continue;
            }
            let members = std::mem::take(&mut synset.lexical_units);
            for unit_id in members {
                match pending.remove(&unit_id) {
                    Some(raw) => {
                        lexical_units.insert(unit_id, attach(raw, synset.id));
                        synset.lexical_units.push(unit_id);
                    }
                    None if lexical_units.contains_key(&unit_id) => {
                        tracing::debug!(
                            "Unit {} already belongs to another synset, skipped in {}",
                            unit_id,
                            synset.id
                        );
                    }
                    None => self.stats.dangling_members += 1,
                }
            }
            synsets.insert(synset.id, synset);
        }

        self.stats.dropped_units = pending.len();
        if self.stats.dropped_units > 0 || self.stats.dangling_members > 0 {
            tracing::warn!(
                "Dropped {} lexical units without a synset and {} dangling member ids",
                self.stats.dropped_units,
                self.stats.dangling_members
            );
        }

        (synsets, lexical_units)
    }

    fn remove_empty_synsets(&mut self, synsets: &mut BTreeMap<SynsetId, Synset>) {
        let before = synsets.len();
        synsets.retain(|_, synset| !synset.is_empty());
        self.stats.removed_synsets = before - synsets.len();
        if self.stats.removed_synsets > 0 {
            tracing::info!("Removed {} empty synsets", self.stats.removed_synsets);
        }
    }

    fn attach_sentiment(&mut self, lexical_units: &mut BTreeMap<LexicalUnitId, LexicalUnit>) {
        let Some(table) = &self.sentiment else {
            return;
        };
        for unit in lexical_units.values_mut() {
            let annotations = table.get(&unit.name, unit.variant);
            self.stats.sentiment_annotations += annotations.len();
            unit.sentiment.extend_from_slice(annotations);
        }
        tracing::debug!(
            "Attached {} sentiment annotations",
            self.stats.sentiment_annotations
        );
    }

    /// Own description first; the owning synset's definition, then its
    /// description, when the unit has none or it is malformed.
    fn attach_descriptions(
        &mut self,
        synsets: &BTreeMap<SynsetId, Synset>,
        lexical_units: &mut BTreeMap<LexicalUnitId, LexicalUnit>,
    ) {
        for unit in lexical_units.values_mut() {
            let own = self.parse(&unit.description);
            let needs_fallback = !matches!(own, Some((false, _)));

            let mut chosen = None;
            if needs_fallback {
                if let Some(synset) = synsets.get(&unit.synset) {
                    for text in [&synset.definition, &synset.description] {
                        if let Some((false, mut description)) = self.parse(text) {
                            description.from_synset = true;
                            chosen = Some(description);
                            self.stats.synset_fallbacks += 1;
                            break;
                        }
                    }
                }
            }

            unit.rich_description = chosen.or(own.map(|(_, description)| description));
        }

        if self.stats.descriptions_malformed > 0 {
            tracing::warn!(
                "{} of {} parsed descriptions were malformed",
                self.stats.descriptions_malformed,
                self.stats.descriptions_parsed
            );
        }
    }

    fn parse(&mut self, text: &str) -> Option<(bool, Description)> {
        if text.trim().is_empty() {
            return None;
        }
        self.stats.descriptions_parsed += 1;
        let (error, description) = parse_description(text);
        if error {
            self.stats.descriptions_malformed += 1;
        }
        Some((error, description))
    }
}

fn attach(raw: RawLexicalUnit, synset: SynsetId) -> LexicalUnit {
    LexicalUnit {
        id: raw.id,
        synset,
        name: raw.name,
        variant: raw.variant,
        pos: raw.pos,
        language: raw.language,
        domain: raw.domain,
        description: raw.description,
        rich_description: None,
        tag_count: raw.tag_count,
        sentiment: Vec::new(),
    }
}

/// Strip placeholder tokens and embedded newlines
pub(crate) fn clean_text(text: &str) -> String {
    let mut cleaned = text.replace("\r\n", " ").replace(['\n', '\r'], " ");
    for placeholder in PLACEHOLDERS {
        cleaned = cleaned.replace(placeholder, "");
    }
    cleaned.trim().to_string()
}

fn clean_text_fields(
    synsets: &mut BTreeMap<SynsetId, Synset>,
    lexical_units: &mut BTreeMap<LexicalUnitId, LexicalUnit>,
) {
    for synset in synsets.values_mut() {
        synset.definition = clean_text(&synset.definition);
        synset.description = clean_text(&synset.description);
    }
    for unit in lexical_units.values_mut() {
        unit.description = clean_text(&unit.description);
    }
}

fn build_lemma_index(
    lexical_units: &BTreeMap<LexicalUnitId, LexicalUnit>,
) -> HashMap<String, Vec<LexicalUnitId>> {
    let mut index: HashMap<String, Vec<LexicalUnitId>> = HashMap::new();
    for unit in lexical_units.values() {
        index.entry(unit.name.to_lowercase()).or_default().push(unit.id);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("ssak\nkręgowy"), "ssak kręgowy");
        assert_eq!(clean_text("a\r\nb"), "a b");
        assert_eq!(clean_text("brak danych"), "");
        assert_eq!(clean_text("  x  "), "x");
    }

    #[test]
    fn test_every_member_points_back() {
        let wn = testing::wordnet();
        for synset in wn.synsets() {
            assert!(!synset.lexical_units.is_empty());
            for unit in wn.members(synset) {
                assert_eq!(unit.synset, synset.id);
            }
        }
        for unit in wn.lexical_units() {
            assert!(wn.synset(unit.synset).is_some());
        }
    }

    #[test]
    fn test_members_keep_source_order() {
        let wn = testing::wordnet();
        let synset = wn.synset(SynsetId(107)).unwrap();
        assert_eq!(synset.lexical_units, vec![LexicalUnitId(9), LexicalUnitId(12)]);
    }

    #[test]
    fn test_orphans_and_empty_synsets_dropped() {
        let wn = testing::wordnet();
        assert!(wn.lexical_unit(LexicalUnitId(7)).is_none());
        assert!(wn.synset(SynsetId(108)).is_none());

        let stats = wn.stats();
        assert_eq!(stats.dropped_units, 1);
        assert_eq!(stats.dangling_members, 1);
        // 108 has no members; 109 only lists a unit owned by 107.
        assert_eq!(stats.removed_synsets, 2);
    }

    #[test]
    fn test_unit_owned_by_first_synset() {
        let wn = testing::wordnet();
        assert_eq!(
            wn.lexical_unit(LexicalUnitId(12)).unwrap().synset,
            SynsetId(107)
        );
        // Its second listing left synset 109 empty.
        assert!(wn.synset(SynsetId(109)).is_none());
    }

    #[test]
    fn test_inverse_symmetry() {
        let wn = testing::wordnet();
        for relation_type in wn.relation_types() {
            if let Some(inverse) = wn.inverse(relation_type) {
                assert_eq!(inverse.inverse, Some(relation_type.id));
            }
        }

        let hyponymy = wn.relation_type(RelationTypeId(11)).unwrap();
        assert_eq!(hyponymy.inverse, Some(RelationTypeId(10)));
        assert!(wn.relation_type(RelationTypeId(20)).unwrap().is_symmetric());
        assert_eq!(wn.relation_type(RelationTypeId(40)).unwrap().inverse, None);
        assert_eq!(wn.stats().inferred_inverses, 1);
    }

    #[test]
    fn test_dangling_relation_refs_cleared() {
        let wn = testing::wordnet();
        let rel = wn.relation_type(RelationTypeId(50)).unwrap();
        assert_eq!(rel.inverse, None);
        assert_eq!(rel.parent, Some(RelationTypeId(10)));
        assert_eq!(wn.stats().dangling_relation_refs, 1);
    }

    #[test]
    fn test_text_cleanup_applied() {
        let wn = testing::wordnet();
        assert_eq!(
            wn.lexical_unit(LexicalUnitId(4)).unwrap().description,
            "##D: ssak kręgowy"
        );
        assert_eq!(wn.synset(SynsetId(103)).unwrap().definition, "");
    }

    #[test]
    fn test_own_description_parsed() {
        let wn = testing::wordnet();
        let desc = wn
            .lexical_unit(LexicalUnitId(2))
            .unwrap()
            .rich_description
            .as_ref()
            .unwrap();
        assert_eq!(desc.definition.as_deref(), Some("samiec."));
        assert_eq!(desc.examples, vec!["P: Kot przyszedł."]);
        assert!(!desc.from_synset);
    }

    #[test]
    fn test_malformed_description_falls_back_to_synset() {
        let wn = testing::wordnet();
        let desc = wn
            .lexical_unit(LexicalUnitId(3))
            .unwrap()
            .rich_description
            .as_ref()
            .unwrap();
        assert!(desc.from_synset);
        assert_eq!(desc.definition.as_deref(), Some("organizm."));
    }

    #[test]
    fn test_no_usable_description() {
        let wn = testing::wordnet();
        // Only a plain-text synset definition, which does not parse cleanly.
        assert!(wn
            .lexical_unit(LexicalUnitId(1))
            .unwrap()
            .rich_description
            .is_none());
        assert!(wn.stats().descriptions_malformed >= 2);
        assert!(wn.stats().synset_fallbacks >= 1);
    }

    #[test]
    fn test_descriptions_can_be_skipped() {
        let wn = testing::wordnet_with(LoadOptions::new().with_descriptions(false));
        assert!(wn.lexical_units().all(|u| u.rich_description.is_none()));
        assert_eq!(wn.stats().descriptions_parsed, 0);
    }

    #[test]
    fn test_sentiment_attached() {
        let wn = testing::wordnet_with_sentiment();
        let kot = wn.lexical_unit(LexicalUnitId(1)).unwrap();
        assert_eq!(kot.sentiment.len(), 1);
        assert!(kot.sentiment[0].emotions.contains("radość"));
        assert!(wn
            .lexical_unit(LexicalUnitId(2))
            .unwrap()
            .sentiment
            .is_empty());
        assert_eq!(wn.stats().sentiment_annotations, 1);
    }
}
