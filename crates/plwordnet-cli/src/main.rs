//! plWordNet CLI - import the XML dump once, query the snapshot

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, config as config_cmd, hierarchy, import, info, query, relations, search};
use config::{default_data_dir, Backend, Config};
use output::OutputFormat;
use plwordnet_core::Wordnet;
use plwordnet_storage::{FileSnapshot, SnapshotStore};

#[derive(Parser)]
#[command(name = "plwordnet")]
#[command(author, version, about = "Query the Polish WordNet from the command line")]
pub struct Cli {
    /// Data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<String>,

    /// Snapshot file name or path
    #[arg(short, long, global = true)]
    pub snapshot: Option<String>,

    /// Snapshot backend
    #[arg(short, long, value_enum, global = true)]
    pub backend: Option<Backend>,

    /// Output format: table, json
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Data directory: flag, then config, then the platform default
    pub fn data_dir(&self, config: &Config) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(PathBuf::from)
            .or_else(|| config.data_dir.clone())
            .unwrap_or_else(default_data_dir)
    }

    pub fn backend(&self, config: &Config) -> Backend {
        self.backend.unwrap_or(config.backend)
    }

    /// Snapshot location; an absolute snapshot path ignores the data directory
    pub fn snapshot_path(&self, config: &Config) -> PathBuf {
        let name = self
            .snapshot
            .clone()
            .or_else(|| config.snapshot.clone())
            .unwrap_or_else(|| self.backend(config).default_snapshot_name().to_string());
        self.data_dir(config).join(name)
    }

    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from(self.format.as_str())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load an XML dump and save it as a snapshot
    Import(import::ImportArgs),
    /// Show snapshot metadata and graph counts
    Info,
    /// List lexical units with a lemma
    Lemma(query::LemmaArgs),
    /// Resolve a `lemma` or `lemma.N` token
    Find(query::FindArgs),
    /// Show one lexical unit in detail
    Describe(query::DescribeArgs),
    /// Show one synset and its relations
    Synset(query::SynsetArgs),
    /// Query relation triples
    Relations(relations::RelationsArgs),
    /// Direct hypernyms of a synset
    Hypernyms(hierarchy::HierarchyArgs),
    /// Direct hyponyms of a synset
    Hyponyms(hierarchy::HierarchyArgs),
    /// Hypernym paths from a synset up to the roots
    Paths(hierarchy::PathsArgs),
    /// Search lemmas
    Search(search::SearchArgs),
    /// Manage configuration
    Config(config_cmd::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context with the snapshot backend
pub struct AppContext {
    pub config: Config,
    pub store: Box<dyn SnapshotStore>,
}

impl AppContext {
    pub fn new(cli: &Cli, config: Config) -> anyhow::Result<Self> {
        let path = cli.snapshot_path(&config);
        let backend = cli.backend(&config);
        tracing::debug!("Using {} snapshot at: {:?}", backend.as_str(), path);

        let store = open_store(backend, path)?;
        Ok(Self { config, store })
    }

    /// Restore the imported graph
    pub fn load_wordnet(&self) -> anyhow::Result<Wordnet> {
        if !self.store.exists() {
            anyhow::bail!(
                "No snapshot at {}. Run `plwordnet import <xml>` first.",
                self.store.location()
            );
        }
        let wordnet = self.store.load()?;
        tracing::debug!("Loaded snapshot from {}", self.store.location());
        Ok(wordnet)
    }
}

fn open_store(backend: Backend, path: PathBuf) -> anyhow::Result<Box<dyn SnapshotStore>> {
    match backend {
        Backend::File => Ok(Box::new(FileSnapshot::new(path))),
        #[cfg(feature = "redb")]
        Backend::Redb => Ok(Box::new(plwordnet_storage::RedbSnapshot::open(path)?)),
        #[cfg(not(feature = "redb"))]
        Backend::Redb => anyhow::bail!("This build has no redb support; use --backend file"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Logs go to stderr so JSON output stays parseable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting plwordnet CLI");

    // Commands that never touch a snapshot
    match &cli.command {
        Commands::Config(args) => return config_cmd::run(args),
        Commands::Completions(args) => return completions::run(args),
        _ => {}
    }

    let ctx = AppContext::new(&cli, Config::load())?;

    match &cli.command {
        Commands::Import(args) => import::run(args, &cli, &ctx)?,
        Commands::Info => info::run(&cli, &ctx)?,
        Commands::Lemma(args) => query::run_lemma(args, &cli, &ctx)?,
        Commands::Find(args) => query::run_find(args, &cli, &ctx)?,
        Commands::Describe(args) => query::run_describe(args, &cli, &ctx)?,
        Commands::Synset(args) => query::run_synset(args, &cli, &ctx)?,
        Commands::Relations(args) => relations::run(args, &cli, &ctx)?,
        Commands::Hypernyms(args) => hierarchy::run_hypernyms(args, &cli, &ctx)?,
        Commands::Hyponyms(args) => hierarchy::run_hyponyms(args, &cli, &ctx)?,
        Commands::Paths(args) => hierarchy::run_paths(args, &cli, &ctx)?,
        Commands::Search(args) => search::run(args, &cli, &ctx)?,
        Commands::Config(_) | Commands::Completions(_) => {}
    }

    Ok(())
}
