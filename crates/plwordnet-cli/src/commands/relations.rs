//! Relation triple queries

use clap::Args;

use crate::output::{print_json, OutputFormat, RelationRow, SynsetRef, UnitRef};
use crate::{AppContext, Cli};
use plwordnet_core::{LexicalUnitId, RelationQuery, RelationTypeId, SynsetId, Wordnet};

#[derive(Args)]
pub struct RelationsArgs {
    /// Query synset relations
    #[arg(long, conflicts_with = "unit", required_unless_present = "unit")]
    pub synset: bool,

    /// Query lexical unit relations
    #[arg(long)]
    pub unit: bool,

    /// Subject id
    #[arg(long)]
    pub subject: Option<u32>,

    /// Relation type id or name
    #[arg(long)]
    pub predicate: Option<String>,

    /// Object id
    #[arg(long)]
    pub object: Option<u32>,

    /// Use relation shortcuts instead of display templates
    #[arg(long)]
    pub short: bool,
}

/// Predicate ids to query; `[None]` when no predicate was given.
///
/// A name may be shared by several relation types; each is queried in turn.
fn predicates(wn: &Wordnet, predicate: Option<&str>) -> anyhow::Result<Vec<Option<RelationTypeId>>> {
    let Some(predicate) = predicate else {
        return Ok(vec![None]);
    };
    if let Ok(id) = predicate.parse::<u32>() {
        return Ok(vec![Some(RelationTypeId(id))]);
    }
    let ids: Vec<_> = wn
        .relation_types_named(predicate)
        .map(|r| Some(r.id))
        .collect();
    if ids.is_empty() {
        anyhow::bail!("Unknown relation type: {}", predicate);
    }
    Ok(ids)
}

pub fn run(args: &RelationsArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let wn = ctx.load_wordnet()?;
    let predicates = predicates(&wn, args.predicate.as_deref())?;
    let format = cli.output_format();

    let mut lines = Vec::new();
    if args.synset {
        let mut rows = Vec::new();
        for predicate in predicates {
            let query = RelationQuery::<SynsetId> {
                subject: args.subject.map(SynsetId),
                predicate,
                object: args.object.map(SynsetId),
            };
            for (subject, relation_type, object) in wn.synset_relations_where(&query)? {
                lines.push(relation_type.format(
                    wn.display_synset(subject, Some(3)),
                    wn.display_synset(object, Some(3)),
                    args.short,
                ));
                rows.push(RelationRow {
                    subject: SynsetRef::new(&wn, subject),
                    predicate: relation_type.into(),
                    object: SynsetRef::new(&wn, object),
                });
            }
        }
        if format == OutputFormat::Json {
            return print_json(&rows);
        }
    } else {
        let mut rows = Vec::new();
        for predicate in predicates {
            let query = RelationQuery::<LexicalUnitId> {
                subject: args.subject.map(LexicalUnitId),
                predicate,
                object: args.object.map(LexicalUnitId),
            };
            for (subject, relation_type, object) in wn.lexical_relations_where(&query)? {
                lines.push(relation_type.format(subject, object, args.short));
                rows.push(RelationRow {
                    subject: UnitRef::from(subject),
                    predicate: relation_type.into(),
                    object: UnitRef::from(object),
                });
            }
        }
        if format == OutputFormat::Json {
            return print_json(&rows);
        }
    }

    tracing::info!("Found {} relations", lines.len());
    if lines.is_empty() {
        println!("No relations found");
    }
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}
