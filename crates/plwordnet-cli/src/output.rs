//! Output formatting utilities

use plwordnet_core::{HypernymPath, LexicalUnit, PathStep, RelationType, Synset, Wordnet};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Table,
        }
    }
}

/// Print `data` as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Compact reference to a synset
#[derive(Debug, Serialize)]
pub struct SynsetRef {
    pub id: u32,
    pub label: String,
}

impl SynsetRef {
    pub fn new(wn: &Wordnet, synset: &Synset) -> Self {
        Self {
            id: synset.id.0,
            label: wn.display_synset(synset, None),
        }
    }
}

/// Compact reference to a lexical unit
#[derive(Debug, Serialize)]
pub struct UnitRef {
    pub id: u32,
    pub label: String,
}

impl From<&LexicalUnit> for UnitRef {
    fn from(unit: &LexicalUnit) -> Self {
        Self {
            id: unit.id.0,
            label: unit.to_string(),
        }
    }
}

/// Compact reference to a relation type
#[derive(Debug, Serialize)]
pub struct RelationRef {
    pub id: u32,
    pub name: String,
}

impl From<&RelationType> for RelationRef {
    fn from(relation_type: &RelationType) -> Self {
        Self {
            id: relation_type.id.0,
            name: relation_type.name.clone(),
        }
    }
}

/// One resolved relation triple
#[derive(Debug, Serialize)]
pub struct RelationRow<T> {
    pub subject: T,
    pub predicate: RelationRef,
    pub object: T,
}

/// Hypernym path element
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StepView {
    Synset { id: u32, label: String },
    Cycle,
}

pub fn path_view(wn: &Wordnet, path: &HypernymPath<'_>) -> Vec<StepView> {
    path.iter()
        .map(|step| match step {
            PathStep::Synset(synset) => StepView::Synset {
                id: synset.id.0,
                label: wn.display_synset(synset, Some(3)),
            },
            PathStep::Cycle => StepView::Cycle,
        })
        .collect()
}

/// `start → a → b`, with `(cycle)` marking a loop back into the path
pub fn path_line(wn: &Wordnet, start: &Synset, path: &HypernymPath<'_>) -> String {
    let mut parts = vec![wn.display_synset(start, Some(3))];
    parts.extend(path.iter().map(|step| match step {
        PathStep::Synset(synset) => wn.display_synset(synset, Some(3)),
        PathStep::Cycle => "(cycle)".to_string(),
    }));
    parts.join(" → ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from("table"), OutputFormat::Table);
        assert_eq!(OutputFormat::from("whatever"), OutputFormat::Table);
    }

    #[test]
    fn test_step_view_json() {
        let json = serde_json::to_string(&vec![
            StepView::Synset {
                id: 1,
                label: "{#1 : kot.1}".to_string(),
            },
            StepView::Cycle,
        ])
        .unwrap();
        assert_eq!(
            json,
            r#"[{"kind":"synset","id":1,"label":"{#1 : kot.1}"},{"kind":"cycle"}]"#
        );
    }
}
