//! Query types for the loaded graph

use crate::entity::{Language, LexicalUnit, PartOfSpeech, RelationTypeId};

/// Subject/predicate/object filter over one triple collection.
///
/// Each filter accepts a raw id or an entity reference:
///
/// ```
/// # use plwordnet_core::{RelationQuery, SynsetId, RelationTypeId};
/// let query: RelationQuery<SynsetId> = RelationQuery::new()
///     .subject(SynsetId(10))
///     .predicate(11u32);
/// assert_eq!(query.predicate, Some(RelationTypeId(11)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationQuery<I> {
    pub subject: Option<I>,
    pub predicate: Option<RelationTypeId>,
    pub object: Option<I>,
}

impl<I> Default for RelationQuery<I> {
    fn default() -> Self {
        Self {
            subject: None,
            predicate: None,
            object: None,
        }
    }
}

impl<I> RelationQuery<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(mut self, subject: impl Into<I>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn predicate(mut self, predicate: impl Into<RelationTypeId>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    pub fn object(mut self, object: impl Into<I>) -> Self {
        self.object = Some(object.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.subject.is_none() && self.predicate.is_none() && self.object.is_none()
    }
}

/// Outcome of [`crate::Wordnet::find`]
#[derive(Debug, Clone, PartialEq)]
pub enum FindResult<'a> {
    /// No variant was given: every unit with the lemma
    Candidates(Vec<&'a LexicalUnit>),
    /// A variant was given: the matching unit, if any
    Variant(Option<&'a LexicalUnit>),
}

impl<'a> FindResult<'a> {
    /// All units in the result
    pub fn units(&self) -> Vec<&'a LexicalUnit> {
        match self {
            Self::Candidates(units) => units.clone(),
            Self::Variant(unit) => unit.iter().copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Candidates(units) => units.is_empty(),
            Self::Variant(unit) => unit.is_none(),
        }
    }
}

/// Split a `lemma.N` token into the lemma and the sense variant.
///
/// Only a trailing run of digits after the last dot counts as a variant, so
/// `itd.` and `kot.a` are plain lemmas.
pub fn split_sense_token(token: &str) -> (&str, Option<u32>) {
    if let Some((lemma, suffix)) = token.rsplit_once('.') {
        if !lemma.is_empty() && !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit())
        {
            if let Ok(variant) = suffix.parse::<u32>() {
                return (lemma, Some(variant));
            }
        }
    }
    (token, None)
}

/// Lemma search query
#[derive(Debug, Clone, PartialEq)]
pub struct LemmaQuery {
    pub text: String,
    pub pos: Option<PartOfSpeech>,
    pub language: Option<Language>,
    pub limit: usize,
}

fn default_limit() -> usize {
    20
}

impl LemmaQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pos: None,
            language: None,
            limit: default_limit(),
        }
    }

    pub fn with_pos(mut self, pos: PartOfSpeech) -> Self {
        self.pos = Some(pos);
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Whether `unit` passes the part-of-speech and language filters
    pub fn accepts(&self, unit: &LexicalUnit) -> bool {
        self.pos.map_or(true, |pos| unit.pos == pos)
            && self.language.map_or(true, |language| unit.language == language)
    }
}
