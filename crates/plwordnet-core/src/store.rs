//! Indexed triple store
//!
//! Triples are kept in load order and never deduplicated. Each index maps an
//! id to the ascending positions of the triples it appears in, so a filtered
//! lookup is an intersection of sorted position lists.

use crate::entity::RelationTypeId;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// A `(subject, predicate, object)` edge instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple<I> {
    pub subject: I,
    pub predicate: RelationTypeId,
    pub object: I,
}

impl<I> Triple<I> {
    pub fn new(subject: I, predicate: RelationTypeId, object: I) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

/// Triples plus subject, predicate and object indices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripleStore<I: Copy + Eq + Hash> {
    triples: Vec<Triple<I>>,
    by_subject: HashMap<I, Vec<usize>>,
    by_predicate: HashMap<RelationTypeId, Vec<usize>>,
    by_object: HashMap<I, Vec<usize>>,
}

impl<I: Copy + Eq + Hash> TripleStore<I> {
    /// Build all three indices over `triples`
    pub fn new(triples: Vec<Triple<I>>) -> Self {
        let mut by_subject: HashMap<I, Vec<usize>> = HashMap::new();
        let mut by_predicate: HashMap<RelationTypeId, Vec<usize>> = HashMap::new();
        let mut by_object: HashMap<I, Vec<usize>> = HashMap::new();

        for (position, triple) in triples.iter().enumerate() {
            by_subject.entry(triple.subject).or_default().push(position);
            by_predicate.entry(triple.predicate).or_default().push(position);
            by_object.entry(triple.object).or_default().push(position);
        }

        Self {
            triples,
            by_subject,
            by_predicate,
            by_object,
        }
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Triple<I>> {
        self.triples.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple<I>> {
        self.triples.iter()
    }

    /// Positions of triples matching every supplied filter, ascending.
    ///
    /// Fails with [`Error::InvalidQuery`] when no filter is supplied.
    pub fn positions(
        &self,
        subject: Option<I>,
        predicate: Option<RelationTypeId>,
        object: Option<I>,
    ) -> Result<Vec<usize>> {
        if subject.is_none() && predicate.is_none() && object.is_none() {
            return Err(Error::InvalidQuery(
                "must specify at least subject, predicate or object".to_string(),
            ));
        }

        let mut partitions: Vec<&[usize]> = Vec::with_capacity(3);
        if let Some(subject) = subject {
            partitions.push(Self::partition(&self.by_subject, &subject));
        }
        if let Some(predicate) = predicate {
            partitions.push(Self::partition(&self.by_predicate, &predicate));
        }
        if let Some(object) = object {
            partitions.push(Self::partition(&self.by_object, &object));
        }

        partitions.sort_by_key(|p| p.len());
        let Some((smallest, rest)) = partitions.split_first() else {
            return Ok(Vec::new());
        };

        Ok(smallest
            .iter()
            .copied()
            .filter(|position| rest.iter().all(|p| p.binary_search(position).is_ok()))
            .collect())
    }

    /// Triples matching every supplied filter, in load order
    pub fn matching(
        &self,
        subject: Option<I>,
        predicate: Option<RelationTypeId>,
        object: Option<I>,
    ) -> Result<Vec<&Triple<I>>> {
        Ok(self
            .positions(subject, predicate, object)?
            .into_iter()
            .filter_map(|position| self.triples.get(position))
            .collect())
    }

    fn partition<'a, K: Eq + Hash>(index: &'a HashMap<K, Vec<usize>>, key: &K) -> &'a [usize] {
        index.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl<I: Copy + Eq + Hash> Default for TripleStore<I> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
