//! plWordNet Core - graph engine for the Polish WordNet
//!
//! Loads the XML dump (and optionally the sentiment annotation table) into an
//! immutable, fully linked [`Wordnet`] and answers relation, lemma and
//! hypernymy queries over it.

pub mod builder;
pub mod description;
pub mod entity;
pub mod error;
pub mod graph;
pub mod query;
pub mod schema;
pub mod sentiment;
pub mod store;
pub mod traversal;

#[cfg(test)]
pub(crate) mod testing;

pub use builder::{LoadOptions, LoadStats, WordnetBuilder};
pub use description::{parse_description, Description};
pub use entity::{
    EmotionalAnnotation, Language, LexicalUnit, LexicalUnitId, PartOfSpeech, Polarity,
    RelationType, RelationTypeId, Synset, SynsetId,
};
pub use error::{Error, Result};
pub use graph::{LexicalRelation, SynsetRelation, Wordnet};
pub use query::{split_sense_token, FindResult, LemmaQuery, RelationQuery};
pub use schema::{RawLexicalUnit, RawWordnet};
pub use sentiment::SentimentTable;
pub use store::{Triple, TripleStore};
pub use traversal::{Hierarchy, HypernymPath, PathOptions, PathStep};
