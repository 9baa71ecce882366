//! Info command

use crate::output::{print_json, OutputFormat};
use crate::{AppContext, Cli};

pub fn run(cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    if !ctx.store.exists() {
        anyhow::bail!(
            "No snapshot at {}. Run `plwordnet import <xml>` first.",
            ctx.store.location()
        );
    }
    let header = ctx.store.header()?;

    match cli.output_format() {
        OutputFormat::Json => print_json(&header)?,
        OutputFormat::Table => {
            let stats = &header.stats;
            println!("Snapshot: {}", ctx.store.location());
            println!("  format version: {}", header.format_version);
            println!("  written by: plwordnet {}", header.crate_version);
            println!("  created: {}", header.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
            println!("{}", stats);
            println!("  dropped units: {}", stats.dropped_units);
            println!("  removed synsets: {}", stats.removed_synsets);
            println!("  inferred inverses: {}", stats.inferred_inverses);
            println!("  sentiment annotations: {}", stats.sentiment_annotations);
            println!(
                "  descriptions parsed: {} ({} malformed)",
                stats.descriptions_parsed, stats.descriptions_malformed
            );
        }
    }
    Ok(())
}
