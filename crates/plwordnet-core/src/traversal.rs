//! Hypernymy traversal
//!
//! Which relation types count as hypernymy is fixed by name: the native
//! vocabulary covers the primary language, the interlingual one adds the
//! cross-language and secondary-language relations.

use crate::entity::{RelationType, RelationTypeId, Synset, SynsetId};
use crate::graph::Wordnet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Vocabulary a hypernym relation name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    Native,
    Interlingual,
}

/// Relation type names treated as hypernymy
pub const HYPERNYM_RELATIONS: &[(&str, Vocabulary)] = &[
    ("hiperonimia", Vocabulary::Native),
    ("typ", Vocabulary::Native),
    ("hypernym", Vocabulary::Interlingual),
    ("instance_hypernym", Vocabulary::Interlingual),
    ("Hiper_plWN-PWN", Vocabulary::Interlingual),
    ("Hiper_PWN-plWN", Vocabulary::Interlingual),
];

/// Hypernym and hyponym relation types resolved against a loaded graph.
///
/// Hyponym types are the inverses of the hypernym types; a hypernym type
/// without an inverse contributes no hyponym type. An inverse shared by
/// several hypernym types is listed once, in the native group if any native
/// type claims it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hierarchy {
    native_hypernyms: Vec<RelationTypeId>,
    interlingual_hypernyms: Vec<RelationTypeId>,
    native_hyponyms: Vec<RelationTypeId>,
    interlingual_hyponyms: Vec<RelationTypeId>,
}

impl Hierarchy {
    pub fn resolve(relation_types: &BTreeMap<RelationTypeId, RelationType>) -> Self {
        let mut hierarchy = Self::default();
        for relation_type in relation_types.values() {
            let Some((_, vocabulary)) = HYPERNYM_RELATIONS
                .iter()
                .find(|(name, _)| *name == relation_type.name)
            else {
                continue;
            };
            let (hypernyms, hyponyms) = match vocabulary {
                Vocabulary::Native => (
                    &mut hierarchy.native_hypernyms,
                    &mut hierarchy.native_hyponyms,
                ),
                Vocabulary::Interlingual => (
                    &mut hierarchy.interlingual_hypernyms,
                    &mut hierarchy.interlingual_hyponyms,
                ),
            };
            hypernyms.push(relation_type.id);
            if let Some(inverse) = relation_type.inverse {
                if relation_types.contains_key(&inverse) {
                    hyponyms.push(inverse);
                }
            }
        }
        hierarchy.native_hyponyms.sort();
        hierarchy.native_hyponyms.dedup();
        hierarchy.interlingual_hyponyms.sort();
        hierarchy.interlingual_hyponyms.dedup();
        let native = &hierarchy.native_hyponyms;
        hierarchy
            .interlingual_hyponyms
            .retain(|inverse| !native.contains(inverse));
        hierarchy
    }

    /// Hypernym relation types, native first, each group by ascending id
    pub fn hypernym_types(&self, interlingual: bool) -> Vec<RelationTypeId> {
        Self::select(&self.native_hypernyms, &self.interlingual_hypernyms, interlingual)
    }

    /// Hyponym relation types, native first, each group by ascending id
    pub fn hyponym_types(&self, interlingual: bool) -> Vec<RelationTypeId> {
        Self::select(&self.native_hyponyms, &self.interlingual_hyponyms, interlingual)
    }

    fn select(
        native: &[RelationTypeId],
        interlingual: &[RelationTypeId],
        include_interlingual: bool,
    ) -> Vec<RelationTypeId> {
        let mut types = native.to_vec();
        if include_interlingual {
            types.extend_from_slice(interlingual);
        }
        types
    }
}

/// One element of a hypernym path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathStep<'a> {
    Synset(&'a Synset),
    /// The next hypernym was already on the path
    Cycle,
}

impl<'a> PathStep<'a> {
    pub fn synset(&self) -> Option<&'a Synset> {
        match self {
            Self::Synset(synset) => Some(*synset),
            Self::Cycle => None,
        }
    }

    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::Cycle)
    }
}

/// Hypernym chain from just above the start synset up to a root or a cycle
pub type HypernymPath<'a> = Vec<PathStep<'a>>;

/// Options for [`Wordnet::hypernym_paths`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathOptions {
    /// Follow every hypernym instead of only the first one at each step
    pub full_search: bool,
    /// Include interlingual hypernym relations
    pub interlingual: bool,
}

impl PathOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn full_search(mut self, full: bool) -> Self {
        self.full_search = full;
        self
    }

    pub fn interlingual(mut self, interlingual: bool) -> Self {
        self.interlingual = interlingual;
        self
    }
}

impl Wordnet {
    /// Direct hypernyms of `synset`.
    ///
    /// Grouped by relation type in [`Hierarchy::hypernym_types`] order, load
    /// order within a type. Duplicate edges yield duplicate entries.
    pub fn hypernyms(&self, synset: impl Into<SynsetId>, interlingual: bool) -> Vec<&Synset> {
        self.related_by(synset.into(), &self.hierarchy.hypernym_types(interlingual))
    }

    /// Direct hyponyms of `synset`, ordered like [`Wordnet::hypernyms`]
    pub fn hyponyms(&self, synset: impl Into<SynsetId>, interlingual: bool) -> Vec<&Synset> {
        self.related_by(synset.into(), &self.hierarchy.hyponym_types(interlingual))
    }

    /// Hypernym paths starting above `synset`.
    ///
    /// Greedy mode follows only the first hypernym at each step and yields at
    /// most one path. Full search branches over every hypernym. A hypernym
    /// already on the current path ends that path with [`PathStep::Cycle`].
    pub fn hypernym_paths(
        &self,
        synset: impl Into<SynsetId>,
        options: PathOptions,
    ) -> Vec<HypernymPath<'_>> {
        let start = synset.into();
        let mut visited = vec![start];
        self.walk_hypernyms(start, &options, &mut visited)
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    fn related_by(&self, synset: SynsetId, types: &[RelationTypeId]) -> Vec<&Synset> {
        types
            .iter()
            .flat_map(|predicate| {
                self.synset_relations
                    .matching(Some(synset), Some(*predicate), None)
                    .into_iter()
                    .flatten()
            })
            .filter_map(|triple| self.synsets.get(&triple.object))
            .collect()
    }

    fn walk_hypernyms(
        &self,
        synset: SynsetId,
        options: &PathOptions,
        visited: &mut Vec<SynsetId>,
    ) -> Vec<HypernymPath<'_>> {
        let mut hypernyms = self.hypernyms(synset, options.interlingual);
        if !options.full_search {
            hypernyms.truncate(1);
        }

        let mut paths = Vec::new();
        for hypernym in hypernyms {
            if visited.contains(&hypernym.id) {
                paths.push(vec![PathStep::Cycle]);
                continue;
            }

            visited.push(hypernym.id);
            let tails = self.walk_hypernyms(hypernym.id, options, visited);
            visited.pop();

            if tails.is_empty() {
                paths.push(vec![PathStep::Synset(hypernym)]);
                continue;
            }
            for tail in tails {
                let mut path = Vec::with_capacity(tail.len() + 1);
                path.push(PathStep::Synset(hypernym));
                path.extend(tail);
                paths.push(path);
            }
        }
        paths
    }
}
