//! Setup shared by every command

use anyhow::{Context, Result};
use msm_core::{ConfigFiles, MsmConfig};

use crate::cli::GlobalArgs;

/// Resolve configuration from arguments, environment and config files.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<MsmConfig> {
    let config = MsmConfig::resolve(&global.overrides(), |name| std::env::var(name).ok())
        .context("Failed to resolve configuration")?;
    log::info!(
        "Configuration initialized: {}",
        serde_json::to_string(config.items())?
    );
    Ok(config)
}

/// Resolve configuration and attach the configuration folder.
pub(crate) fn load_files(global: &GlobalArgs) -> Result<(MsmConfig, ConfigFiles)> {
    let config = load_config(global)?;
    let files = ConfigFiles::attach(&config).with_context(|| {
        format!(
            "Failed to attach configuration folder {}",
            config.config_folder.display()
        )
    })?;
    Ok((config, files))
}
