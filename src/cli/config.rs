//! `calcany config`

use anyhow::{bail, Context, Result};

use crate::config::Config;

pub fn print_path() -> Result<()> {
    println!("{}", Config::config_path().display());
    Ok(())
}

pub fn show() -> Result<()> {
    let config = Config::load();
    let out = toml::to_string_pretty(&config).context("Failed to serialize config")?;
    print!("{}", out);
    Ok(())
}

pub fn init(force: bool) -> Result<()> {
    let path = Config::config_path();
    if path.exists() && !force {
        bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::default()
        .save_to(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
