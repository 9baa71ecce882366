//! Config command

use clap::{Args, Subcommand};

use crate::config::{config_file_path, default_data_dir, Config};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print one value
    Get {
        /// Config key name
        key: String,
    },
    /// Change one value and save
    Set {
        /// Config key name
        key: String,
        /// New value
        value: String,
    },
    /// Reset one value to its default and save
    Unset {
        /// Config key name
        key: String,
    },
    /// Print every value, marking defaults
    List,
    /// Print the config file location
    Path,
    /// Write a config file holding the defaults
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs) -> anyhow::Result<()> {
    let path = config_file_path();
    match &args.command {
        ConfigCommands::Get { key } => {
            if !Config::keys().contains(&key.as_str()) {
                anyhow::bail!(
                    "Unknown config key: {}. Available keys: {}",
                    key,
                    Config::keys().join(", ")
                );
            }
            println!("{}", value_or_default(&Config::load(), key));
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load();
            config.set(key, value)?;
            config.save()?;
            tracing::info!("Saved {} to {}", key, path.display());
            println!("{} = {}", key, value_or_default(&config, key));
        }
        ConfigCommands::Unset { key } => {
            let mut config = Config::load();
            config.unset(key)?;
            config.save()?;
            println!("{} = {}", key, value_or_default(&config, key));
        }
        ConfigCommands::List => {
            let config = Config::load();
            let defaults = Config::default();
            println!("# {}", path.display());
            for key in Config::keys() {
                let marker = if config.get(key) == defaults.get(key) {
                    "  (default)"
                } else {
                    ""
                };
                println!("{} = {}{}", key, value_or_default(&config, key), marker);
            }
        }
        ConfigCommands::Path => println!("{}", path.display()),
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Config::default().save()?;
            println!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}

/// Unset path keys show what the CLI falls back to
fn value_or_default(config: &Config, key: &str) -> String {
    match (config.get(key), key) {
        (Some(value), _) => value,
        (None, "data_dir") => default_data_dir().display().to_string(),
        (None, "snapshot") => config.backend.default_snapshot_name().to_string(),
        (None, _) => String::new(),
    }
}
