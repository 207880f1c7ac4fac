//! Config command - manage configuration and registered providers.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use payverify_core::models::config::AppConfig;
use payverify_core::Provider;

use super::{config_path, load_config};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Show configuration file path
    Path,

    /// Register a provider, replacing any provider with the same name
    AddProvider {
        /// Provider name ("CBE", "TeleBirr", or any other)
        name: String,
        /// Base URL of the provider's receipt page
        url: String,
    },
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, explicit: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(explicit),
        ConfigCommand::Init(init_args) => init_config(init_args, explicit),
        ConfigCommand::Path => show_path(explicit),
        ConfigCommand::AddProvider { name, url } => add_provider(explicit, name, url),
    }
}

fn show_config(explicit: Option<&str>) -> anyhow::Result<()> {
    let path = config_path(explicit);

    let config = if path.exists() {
        load_config(explicit)?
    } else {
        eprintln!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
        AppConfig::default()
    };

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, explicit: Option<&str>) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(|| config_path(explicit));

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let config = AppConfig::default();
    config.save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn add_provider(explicit: Option<&str>, name: String, url: String) -> anyhow::Result<()> {
    let path = config_path(explicit);

    let mut config = if path.exists() {
        AppConfig::from_file(&path)?
    } else {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        AppConfig::default()
    };

    let provider = Provider::new(name, url);
    println!(
        "{} Registered {} ({:?} layout) at {}",
        style("✓").green(),
        provider.name,
        provider.kind().layout(),
        provider.url
    );

    config.upsert_provider(provider);
    config.save(&path)?;

    Ok(())
}

fn show_path(explicit: Option<&str>) -> anyhow::Result<()> {
    let path = config_path(explicit);

    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'payverify config init' to create a configuration file.");
    }

    Ok(())
}
