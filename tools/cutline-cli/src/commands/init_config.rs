//! Write the effective configuration to disk.

use std::path::PathBuf;

use cutline_common::config::{config_file_path, AppConfig};

/// Save `config` to `output`, or to the standard location.
pub fn run(config: &AppConfig, output: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = output.unwrap_or_else(config_file_path);
    if path.exists() && !force {
        anyhow::bail!("{} already exists; pass --force to overwrite", path.display());
    }
    config.save_to(&path)?;
    tracing::info!(path = %path.display(), "Wrote config");
    println!("{}", path.display());
    Ok(())
}
