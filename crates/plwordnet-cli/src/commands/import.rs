//! Import command

use std::path::PathBuf;

use clap::Args;

use crate::config::parse_delimiter;
use crate::output::{print_json, OutputFormat};
use crate::{AppContext, Cli};
use plwordnet_core::{LoadOptions, Wordnet};

#[derive(Args)]
pub struct ImportArgs {
    /// plWordNet XML dump
    pub xml: PathBuf,

    /// Sentiment annotation table (CSV)
    #[arg(long)]
    pub sentiment: Option<PathBuf>,

    /// Keep raw descriptions without parsing their markup
    #[arg(long)]
    pub no_descriptions: bool,

    /// Field delimiter of the sentiment table (`tab` for tabs)
    #[arg(long)]
    pub delimiter: Option<String>,
}

impl ImportArgs {
    fn load_options(&self, ctx: &AppContext) -> anyhow::Result<LoadOptions> {
        let delimiter = match &self.delimiter {
            Some(value) => parse_delimiter(value)?,
            None => ctx.config.sentiment_delimiter,
        };
        // ASCII is checked when the delimiter is parsed or set
        let delimiter = u8::try_from(delimiter)
            .map_err(|_| anyhow::anyhow!("Delimiter must be an ASCII character"))?;

        Ok(LoadOptions::new()
            .with_descriptions(ctx.config.parse_descriptions && !self.no_descriptions)
            .with_sentiment_delimiter(delimiter))
    }
}

pub fn run(args: &ImportArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let options = args.load_options(ctx)?;
    tracing::info!("Importing {}", args.xml.display());

    let wordnet = Wordnet::from_paths(&args.xml, args.sentiment.as_deref(), &options)?;
    let header = ctx.store.save(&wordnet)?;

    match cli.output_format() {
        OutputFormat::Json => print_json(&header)?,
        OutputFormat::Table => {
            println!(
                "Imported {} into {}",
                args.xml.display(),
                ctx.store.location()
            );
            println!("{}", wordnet);
        }
    }
    Ok(())
}
