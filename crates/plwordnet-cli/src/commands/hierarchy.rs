//! Hypernymy commands

use clap::Args;

use crate::output::{path_line, path_view, print_json, OutputFormat, SynsetRef};
use crate::{AppContext, Cli};
use plwordnet_core::{PathOptions, Synset, Wordnet};

#[derive(Args)]
pub struct HierarchyArgs {
    /// Synset id
    pub id: u32,

    /// Also follow interlingual hypernymy
    #[arg(short, long)]
    pub interlingual: bool,
}

#[derive(Args)]
pub struct PathsArgs {
    /// Synset id
    pub id: u32,

    /// Branch on every hypernym instead of following the first one
    #[arg(long)]
    pub full: bool,

    /// Also follow interlingual hypernymy
    #[arg(short, long)]
    pub interlingual: bool,
}

fn start<'a>(wn: &'a Wordnet, id: u32) -> anyhow::Result<&'a Synset> {
    wn.synset(id)
        .ok_or_else(|| anyhow::anyhow!("Synset #{} not found", id))
}

fn print_synsets(wn: &Wordnet, synsets: &[&Synset], cli: &Cli, empty: &str) -> anyhow::Result<()> {
    match cli.output_format() {
        OutputFormat::Json => {
            let refs: Vec<SynsetRef> = synsets.iter().map(|s| SynsetRef::new(wn, s)).collect();
            print_json(&refs)?;
        }
        OutputFormat::Table => {
            if synsets.is_empty() {
                println!("{}", empty);
            }
            for synset in synsets {
                println!("{}", wn.display_synset(synset, None));
            }
        }
    }
    Ok(())
}

pub fn run_hypernyms(args: &HierarchyArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let wn = ctx.load_wordnet()?;
    let synset = start(&wn, args.id)?;
    let interlingual = args.interlingual || ctx.config.interlingual;
    let hypernyms = wn.hypernyms(synset, interlingual);
    print_synsets(&wn, &hypernyms, cli, "No hypernyms")
}

pub fn run_hyponyms(args: &HierarchyArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let wn = ctx.load_wordnet()?;
    let synset = start(&wn, args.id)?;
    let interlingual = args.interlingual || ctx.config.interlingual;
    let hyponyms = wn.hyponyms(synset, interlingual);
    print_synsets(&wn, &hyponyms, cli, "No hyponyms")
}

pub fn run_paths(args: &PathsArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let wn = ctx.load_wordnet()?;
    let synset = start(&wn, args.id)?;
    let options = PathOptions::new()
        .full_search(args.full)
        .interlingual(args.interlingual || ctx.config.interlingual);
    let paths = wn.hypernym_paths(synset, options);
    tracing::info!("Found {} hypernym paths from #{}", paths.len(), synset.id);

    match cli.output_format() {
        OutputFormat::Json => {
            let views: Vec<_> = paths.iter().map(|p| path_view(&wn, p)).collect();
            print_json(&views)?;
        }
        OutputFormat::Table => {
            if paths.is_empty() {
                println!("{} has no hypernyms", wn.display_synset(synset, Some(3)));
            }
            for path in &paths {
                println!("{}", path_line(&wn, synset, path));
            }
        }
    }
    Ok(())
}
