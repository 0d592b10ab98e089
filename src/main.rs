//! cupofcraft - content layer CLI for the cupofcraft personal site.

use anyhow::Result;
use clap::Parser;
use cupofcraft::{
    cli::{Cli, Commands},
    config::SiteConfig,
    content::ContentStore,
    log,
    serve::serve_site,
};
use std::path::Path;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Check => check_content(config),
        Commands::Serve { .. } => serve_site(config),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
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

/// Validate every content collection and report per-category counts.
///
/// Any invalid document aborts with a non-zero exit; the build pipeline
/// must never run against partially valid content.
fn check_content(config: &SiteConfig) -> Result<()> {
    let store = ContentStore::load(&config.content_dir())?;

    for (category, count) in store.counts() {
        log!("check"; "{category}: {count}");
    }
    log!("check"; "validated {} documents", store.len());

    Ok(())
}
