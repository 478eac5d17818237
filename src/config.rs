use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::GameConfig;

/// Read a JSON [`GameConfig`] from `path` and validate it.
///
/// Missing fields fall back to their defaults, so `{}` is a valid config.
pub fn load_config(path: impl AsRef<Path>) -> Result<GameConfig> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .with_context(|| format!("parse config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}
