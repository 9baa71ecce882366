//! Lookup commands: lemma, find, describe, synset

use clap::Args;
use serde::Serialize;

use crate::output::{print_json, OutputFormat, RelationRef, SynsetRef, UnitRef};
use crate::{AppContext, Cli};
use plwordnet_core::{
    FindResult, LexicalUnit, LexicalUnitId, RelationQuery, RelationType, Synset, SynsetId, Wordnet,
};

#[derive(Args)]
pub struct LemmaArgs {
    /// Lemma, matched case-insensitively
    pub name: String,
}

#[derive(Args)]
pub struct FindArgs {
    /// `lemma` or `lemma.N`
    pub token: String,
}

#[derive(Args)]
pub struct DescribeArgs {
    /// Lexical unit id
    pub id: u32,
}

#[derive(Args)]
pub struct SynsetArgs {
    /// Synset id
    pub id: u32,
}

/// Which way an edge points, seen from the described entity
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
enum Direction {
    Outgoing,
    Incoming,
    Symmetric,
}

#[derive(Serialize)]
struct Edge<T> {
    relation: RelationRef,
    direction: Direction,
    target: T,
}

impl<T> Edge<T> {
    fn line(&self, target: &str) -> String {
        let op = match self.direction {
            Direction::Outgoing => "→",
            Direction::Symmetric => "⟷",
            Direction::Incoming => "←",
        };
        format!("{} {} {}", self.relation.name, op, target)
    }
}

fn direction_of(relation_type: &RelationType) -> Direction {
    if relation_type.is_symmetric() {
        Direction::Symmetric
    } else {
        Direction::Outgoing
    }
}

/// Outgoing edges, then incoming edges of asymmetric relations
fn unit_edges(wn: &Wordnet, unit: &LexicalUnit) -> anyhow::Result<Vec<Edge<UnitRef>>> {
    let mut edges = Vec::new();
    let outgoing = RelationQuery::<LexicalUnitId>::new().subject(unit);
    for (_, relation_type, object) in wn.lexical_relations_where(&outgoing)? {
        edges.push(Edge {
            relation: relation_type.into(),
            direction: direction_of(relation_type),
            target: object.into(),
        });
    }
    let incoming = RelationQuery::<LexicalUnitId>::new().object(unit);
    for (subject, relation_type, _) in wn.lexical_relations_where(&incoming)? {
        if !relation_type.is_symmetric() {
            edges.push(Edge {
                relation: relation_type.into(),
                direction: Direction::Incoming,
                target: subject.into(),
            });
        }
    }
    Ok(edges)
}

fn synset_edges(wn: &Wordnet, synset: &Synset) -> anyhow::Result<Vec<Edge<SynsetRef>>> {
    let mut edges = Vec::new();
    let outgoing = RelationQuery::<SynsetId>::new().subject(synset);
    for (_, relation_type, object) in wn.synset_relations_where(&outgoing)? {
        edges.push(Edge {
            relation: relation_type.into(),
            direction: direction_of(relation_type),
            target: SynsetRef::new(wn, object),
        });
    }
    let incoming = RelationQuery::<SynsetId>::new().object(synset);
    for (subject, relation_type, _) in wn.synset_relations_where(&incoming)? {
        if !relation_type.is_symmetric() {
            edges.push(Edge {
                relation: relation_type.into(),
                direction: Direction::Incoming,
                target: SynsetRef::new(wn, subject),
            });
        }
    }
    Ok(edges)
}

fn unit_line(wn: &Wordnet, unit: &LexicalUnit) -> String {
    let synset = wn
        .owner(unit)
        .map(|s| wn.display_synset(s, Some(3)))
        .unwrap_or_default();
    format!(
        "#{} {} {} {} {}",
        unit.id, unit, unit.pos, unit.language, synset
    )
}

fn print_units(wn: &Wordnet, units: &[&LexicalUnit], cli: &Cli, empty: &str) -> anyhow::Result<()> {
    match cli.output_format() {
        OutputFormat::Json => print_json(units)?,
        OutputFormat::Table => {
            if units.is_empty() {
                println!("{}", empty);
            }
            for unit in units {
                println!("{}", unit_line(wn, unit));
            }
        }
    }
    Ok(())
}

pub fn run_lemma(args: &LemmaArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let wn = ctx.load_wordnet()?;
    let units = wn.lemmas(&args.name);
    tracing::info!("Found {} units for lemma '{}'", units.len(), args.name);
    print_units(
        &wn,
        &units,
        cli,
        &format!("No lexical units with lemma '{}'", args.name),
    )
}

pub fn run_find(args: &FindArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let wn = ctx.load_wordnet()?;
    let result = wn.find(&args.token);
    let empty = match &result {
        FindResult::Candidates(_) => format!("No lexical units with lemma '{}'", args.token),
        FindResult::Variant(_) => format!("No lexical unit '{}'", args.token),
    };
    print_units(&wn, &result.units(), cli, &empty)
}

#[derive(Serialize)]
struct UnitDetails<'a> {
    unit: &'a LexicalUnit,
    synset: Option<SynsetRef>,
    synset_definition: Option<&'a str>,
    synonyms: Vec<UnitRef>,
    relations: Vec<Edge<UnitRef>>,
}

pub fn run_describe(args: &DescribeArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let wn = ctx.load_wordnet()?;
    let unit = wn
        .lexical_unit(args.id)
        .ok_or_else(|| anyhow::anyhow!("Lexical unit #{} not found", args.id))?;
    let synset = wn.owner(unit);
    let details = UnitDetails {
        unit,
        synset: synset.map(|s| SynsetRef::new(&wn, s)),
        synset_definition: synset
            .map(|s| s.definition.as_str())
            .filter(|d| !d.is_empty()),
        synonyms: synset
            .map(|s| {
                wn.members(s)
                    .filter(|u| u.id != unit.id)
                    .map(UnitRef::from)
                    .collect()
            })
            .unwrap_or_default(),
        relations: unit_edges(&wn, unit)?,
    };

    match cli.output_format() {
        OutputFormat::Json => print_json(&details)?,
        OutputFormat::Table => print_unit_details(&details),
    }
    Ok(())
}

fn print_unit_details(details: &UnitDetails<'_>) {
    let unit = details.unit;
    println!(
        "#{} {} {} {} {}",
        unit.id,
        unit.pos,
        unit.language.code().to_uppercase(),
        unit.name,
        unit.variant
    );

    let rich = unit.rich_description.as_ref();
    match rich.and_then(|d| d.definition.as_deref()) {
        Some(definition) => println!("DEFINITION: {}", definition),
        None if !unit.description.is_empty() => println!("DESCRIPTION: {}", unit.description),
        None => {}
    }
    if let Some(definition) = details.synset_definition {
        println!("SYNSET DEFINITION: {}", definition);
    }
    println!("DOMAIN: {}", unit.domain);
    if !details.synonyms.is_empty() {
        let synonyms: Vec<&str> = details.synonyms.iter().map(|u| u.label.as_str()).collect();
        println!("SYNONYMS: {}", synonyms.join(", "));
    }
    if let Some(description) = rich {
        for example in &description.examples {
            println!("EXAMPLE: {}", example);
        }
        for link in &description.links {
            println!("LINK: {}", link);
        }
    }
    for annotation in &unit.sentiment {
        println!("SENTIMENT:");
        println!("  polarity: {}", annotation.polarity);
        println!("  emotions: {}", join(&annotation.emotions));
        println!("  valuations: {}", join(&annotation.valuations));
        println!("  examples: {}", join(&annotation.examples));
    }
    if !details.relations.is_empty() {
        println!("RELATIONS:");
        for edge in &details.relations {
            println!("  {}", edge.line(&edge.target.label));
        }
    }
}

fn join<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Serialize)]
struct SynsetDetails<'a> {
    synset: &'a Synset,
    label: String,
    members: Vec<UnitRef>,
    relations: Vec<Edge<SynsetRef>>,
}

pub fn run_synset(args: &SynsetArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let wn = ctx.load_wordnet()?;
    let synset = wn
        .synset(args.id)
        .ok_or_else(|| anyhow::anyhow!("Synset #{} not found", args.id))?;
    let details = SynsetDetails {
        synset,
        label: wn.display_synset(synset, None),
        members: wn.members(synset).map(UnitRef::from).collect(),
        relations: synset_edges(&wn, synset)?,
    };

    match cli.output_format() {
        OutputFormat::Json => print_json(&details)?,
        OutputFormat::Table => {
            println!("{}", details.label);
            if !synset.definition.is_empty() {
                println!("DEFINITION: {}", synset.definition);
            }
            if !synset.description.is_empty() {
                println!("DESCRIPTION: {}", synset.description);
            }
            if !details.relations.is_empty() {
                println!("RELATIONS:");
                for edge in &details.relations {
                    let target = wn
                        .synset(edge.target.id)
                        .map(|s| wn.display_synset(s, Some(3)))
                        .unwrap_or_else(|| edge.target.label.clone());
                    println!("  {}", edge.line(&target));
                }
            }
        }
    }
    Ok(())
}
