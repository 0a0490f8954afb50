pub mod annotate;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use docner_core::models::config::DocnerConfig;
use docner_core::models::catalog::EntityCatalog;
use tracing::debug;

/// Default per-user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docner")
        .join("config.json")
}

/// Explicit `--config` path, else the per-user file if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DocnerConfig> {
    if let Some(path) = config_path {
        debug!("Loading config from {}", path);
        return Ok(DocnerConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(DocnerConfig::from_file(&default_path)?)
    } else {
        Ok(DocnerConfig::default())
    }
}

/// The config's catalog, or the one from `--catalog` if given.
pub fn resolve_catalog(config: &DocnerConfig, catalog: Option<&Path>) -> anyhow::Result<EntityCatalog> {
    match catalog {
        Some(path) => Ok(EntityCatalog::from_file(path)?),
        None => {
            config.catalog.validate()?;
            Ok(config.catalog.clone())
        }
    }
}
