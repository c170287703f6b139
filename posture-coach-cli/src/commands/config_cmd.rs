use anyhow::Result;
use std::path::Path;

use crate::config::Config;

pub fn show_config(explicit: Option<&Path>) -> Result<()> {
    let config = Config::load(explicit)?;
    let config_str = toml::to_string_pretty(&config)?;

    println!("{}", config_str);

    Ok(())
}

pub fn init_config(explicit: Option<&Path>, force: bool) -> Result<()> {
    let config_file = Config::resolve_path(explicit)?;

    if config_file.exists() && !force {
        println!(
            "Configuration file already exists at: {}",
            config_file.display()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config = Config::default();
    config.save(&config_file)?;

    tracing::debug!(path = %config_file.display(), "Wrote default configuration");
    println!("✓ Configuration initialized at: {}", config_file.display());

    Ok(())
}

pub fn config_path(explicit: Option<&Path>) -> Result<()> {
    println!("{}", Config::resolve_path(explicit)?.display());
    Ok(())
}
