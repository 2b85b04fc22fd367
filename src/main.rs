//! Folio - portfolio page components CLI.

use anyhow::Result;
use clap::Parser;
use folio::cli::{Cli, Commands};
use folio::commands;
use folio::config::SiteConfig;
use std::path::Path;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(cli)?));
    let env = cli.env();

    match &cli.command {
        Commands::Check { .. } => commands::check(config, env),
        Commands::Render { open, .. } => commands::render(config, env, open.as_deref()),
        Commands::Open { slug, json, .. } => commands::open(config, env, slug, *json),
        Commands::Replay {
            events, json, html, ..
        } => commands::replay(config, env, events, *json, *html),
    }
}

/// Load and validate configuration from CLI arguments.
///
/// A missing config file is not an error: every section has defaults.
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}
