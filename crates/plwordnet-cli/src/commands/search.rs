//! Search command

use clap::Args;

use crate::output::{print_json, OutputFormat};
use crate::{AppContext, Cli};
use plwordnet_core::{Language, LemmaQuery, PartOfSpeech};
use plwordnet_search::{ExactSearchEngine, SearchEngine};

#[derive(Args)]
pub struct SearchArgs {
    /// Search text
    pub text: String,

    /// Enable fuzzy search
    #[arg(long)]
    pub fuzzy: bool,

    /// Filter by part of speech (noun, verb, adj, adv)
    #[arg(long)]
    pub pos: Option<PartOfSpeech>,

    /// Filter by language (pl, en)
    #[arg(long)]
    pub lang: Option<Language>,

    /// Limit results
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

impl SearchArgs {
    fn query(&self) -> LemmaQuery {
        let mut query = LemmaQuery::new(&self.text).with_limit(self.limit);
        if let Some(pos) = self.pos {
            query = query.with_pos(pos);
        }
        if let Some(language) = self.lang {
            query = query.with_language(language);
        }
        query
    }
}

#[cfg(feature = "fuzzy")]
fn engine(fuzzy: bool) -> anyhow::Result<Box<dyn SearchEngine>> {
    if fuzzy {
        Ok(Box::new(plwordnet_search::FuzzySearchEngine::new()))
    } else {
        Ok(Box::new(ExactSearchEngine::new()))
    }
}

#[cfg(not(feature = "fuzzy"))]
fn engine(fuzzy: bool) -> anyhow::Result<Box<dyn SearchEngine>> {
    if fuzzy {
        anyhow::bail!("This build has no fuzzy search support");
    }
    Ok(Box::new(ExactSearchEngine::new()))
}

pub fn run(args: &SearchArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let engine = engine(args.fuzzy)?;
    let wn = ctx.load_wordnet()?;
    let hits = engine.search(&args.query(), &wn)?;
    tracing::info!("Search '{}' returned {} hits", args.text, hits.len());

    match cli.output_format() {
        OutputFormat::Json => print_json(&hits)?,
        OutputFormat::Table => {
            if hits.is_empty() {
                println!("No matches for '{}'", args.text);
            }
            for hit in &hits {
                let unit = hit.unit;
                let synset = wn
                    .owner(unit)
                    .map(|s| wn.display_synset(s, Some(3)))
                    .unwrap_or_default();
                println!(
                    "{:>5}  #{} {} {} {}",
                    hit.score, unit.id, unit, unit.pos, synset
                );
            }
        }
    }
    Ok(())
}
