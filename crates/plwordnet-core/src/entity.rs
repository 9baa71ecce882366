//! Entity (node) types: relation types, synsets, lexical units

use crate::description::Description;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a synset, as assigned by the source document
    SynsetId
);
entity_id!(
    /// Identifier of a lexical unit, as assigned by the source document
    LexicalUnitId
);
entity_id!(
    /// Identifier of a relation type, as assigned by the source document
    RelationTypeId
);

/// Grammatical category of a lexical unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    Adjective,
    Adverb,
    Verb,
}

/// Suffix marking a part-of-speech label as belonging to the secondary language
pub const SECONDARY_LANGUAGE_MARKER: &str = " pwn";

impl PartOfSpeech {
    /// Map a source label such as `rzeczownik` or `czasownik pwn` to a
    /// part of speech and the language it implies.
    pub fn from_label(label: &str) -> Option<(Self, Language)> {
        let label = label.trim();
        let (base, language) = match label.strip_suffix(SECONDARY_LANGUAGE_MARKER) {
            Some(base) => (base.trim_end(), Language::English),
            None => (label, Language::Polish),
        };
        let pos = match base {
            "rzeczownik" => Self::Noun,
            "przymiotnik" => Self::Adjective,
            "przysłówek" => Self::Adverb,
            "czasownik" => Self::Verb,
            _ => return None,
        };
        Some((pos, language))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Noun => "NOUN",
            Self::Adjective => "ADJ",
            Self::Adverb => "ADV",
            Self::Verb => "VERB",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartOfSpeech {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "noun" | "n" => Ok(Self::Noun),
            "adj" | "adjective" | "a" => Ok(Self::Adjective),
            "adv" | "adverb" | "r" => Ok(Self::Adverb),
            "verb" | "v" => Ok(Self::Verb),
            other => Self::from_label(other)
                .map(|(pos, _)| pos)
                .ok_or_else(|| format!("unknown part of speech: {}", s)),
        }
    }
}

/// Language of a lexical unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Language {
    /// Primary language of the resource
    Polish,
    /// Secondary language, marked by the `pwn` suffix in the source
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Polish => "pl",
            Self::English => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pl" | "polish" => Ok(Self::Polish),
            "en" | "english" => Ok(Self::English),
            _ => Err(format!("unknown language: {}", s)),
        }
    }
}

/// A typed edge kind, e.g. hypernymy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationType {
    pub id: RelationTypeId,

    /// Parent in the relation type hierarchy (informational only)
    pub parent: Option<RelationTypeId>,

    /// Semantic inverse; a symmetric relation is its own inverse
    pub inverse: Option<RelationTypeId>,

    pub name: String,

    /// Kind of relation as declared by the source (synset or lexical level)
    pub kind: String,

    pub description: String,

    pub shortcut: String,

    /// Display template with `<x#>` and `<y#>` placeholders
    pub display: String,

    /// Parts of speech this relation applies to
    pub pos: Vec<PartOfSpeech>,

    /// Whether the source wants the inverse materialized automatically
    pub auto_reverse: bool,
}

impl RelationType {
    /// Format `x` and `y` joined by this relation.
    ///
    /// Uses the display template unless `short` is set or no template exists,
    /// in which case the shortcut is used.
    pub fn format(&self, x: impl fmt::Display, y: impl fmt::Display, short: bool) -> String {
        if short || self.display.is_empty() {
            format!("{} {} {}", x, self.shortcut, y)
        } else {
            self.display
                .replace("<x#>", &x.to_string())
                .replace("<y#>", &y.to_string())
        }
    }

    pub fn is_symmetric(&self) -> bool {
        self.inverse == Some(self.id)
    }
}

/// A set of lexical units sharing one sense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synset {
    pub id: SynsetId,

    pub definition: String,

    pub description: String,

    pub is_abstract: bool,

    /// Split/partition marker carried over from the source
    pub split: i32,

    /// Member units in source order
    pub lexical_units: Vec<LexicalUnitId>,
}

impl Synset {
    pub fn is_empty(&self) -> bool {
        self.lexical_units.is_empty()
    }
}

/// One word-sense pairing (lemma + sense variant)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalUnit {
    pub id: LexicalUnitId,

    /// Owning synset
    pub synset: SynsetId,

    /// Surface form (lemma)
    pub name: String,

    /// Sense variant number
    pub variant: u32,

    pub pos: PartOfSpeech,

    pub language: Language,

    /// Semantic domain code
    pub domain: String,

    /// Raw free-text description
    pub description: String,

    /// Structured description, when rich description parsing ran
    pub rich_description: Option<Description>,

    pub tag_count: u32,

    pub sentiment: Vec<EmotionalAnnotation>,
}

impl fmt::Display for LexicalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.name, self.variant)
    }
}

impl From<&RelationType> for RelationTypeId {
    fn from(relation_type: &RelationType) -> Self {
        relation_type.id
    }
}

impl From<&Synset> for SynsetId {
    fn from(synset: &Synset) -> Self {
        synset.id
    }
}

impl From<&LexicalUnit> for LexicalUnitId {
    fn from(unit: &LexicalUnit) -> Self {
        unit.id
    }
}

/// Sentiment polarity of an annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Polarity {
    StrongNegative,
    WeakNegative,
    Neutral,
    WeakPositive,
    StrongPositive,
    #[default]
    Unknown,
}

impl Polarity {
    /// Parse a polarity code from the annotation table (`- m`, `+ s`, `0`, ...)
    pub fn from_code(code: &str) -> Self {
        let compact: String = code.chars().filter(|c| !c.is_whitespace()).collect();
        match compact.as_str() {
            "-m" => Self::StrongNegative,
            "-s" => Self::WeakNegative,
            "0" => Self::Neutral,
            "+s" => Self::WeakPositive,
            "+m" => Self::StrongPositive,
            _ => Self::Unknown,
        }
    }

    /// Numeric level from -2 to +2, or `None` when unknown
    pub fn value(&self) -> Option<i8> {
        match self {
            Self::StrongNegative => Some(-2),
            Self::WeakNegative => Some(-1),
            Self::Neutral => Some(0),
            Self::WeakPositive => Some(1),
            Self::StrongPositive => Some(2),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::StrongNegative => "strong negative",
            Self::WeakNegative => "weak negative",
            Self::Neutral => "neutral",
            Self::WeakPositive => "weak positive",
            Self::StrongPositive => "strong positive",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Sentiment annotation attached to a lexical unit
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmotionalAnnotation {
    pub polarity: Polarity,
    pub emotions: BTreeSet<String>,
    pub valuations: BTreeSet<String>,
    /// At most two illustrative examples
    pub examples: Vec<String>,
}

impl EmotionalAnnotation {
    pub fn is_empty(&self) -> bool {
        self.polarity == Polarity::Unknown
            && self.emotions.is_empty()
            && self.valuations.is_empty()
            && self.examples.is_empty()
    }
}
