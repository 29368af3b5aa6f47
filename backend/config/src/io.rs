//! Config file location and loading.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "parley.yaml";

/// Legacy config file looked up in the working directory.
const LEGACY_CONFIG_FILE: &str = "config.json";

/// Resolve the Parley config directory.
/// Priority: `PARLEY_CONFIG_DIR` env > `~/.parley/`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PARLEY_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(".parley"))
        .unwrap_or_else(|| PathBuf::from(".parley"))
}

/// Pick the config file to load.
///
/// Priority: explicit path > `PARLEY_CONFIG` env > `<config_dir>/parley.yaml`
/// if present > `./config.json` if present > `<config_dir>/parley.yaml`.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var("PARLEY_CONFIG") {
        return PathBuf::from(path);
    }
    let preferred = config_dir().join(CONFIG_FILE_NAME);
    if preferred.exists() {
        return preferred;
    }
    let legacy = PathBuf::from(LEGACY_CONFIG_FILE);
    if legacy.exists() {
        return legacy;
    }
    preferred
}

/// Read a YAML or JSON config file into an untyped value tree.
///
/// A missing or empty file yields an empty object; validation reports what is missing.
pub async fn load_config(path: &Path) -> Result<Value> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(Value::Object(Default::default()));
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    // YAML is a superset of JSON, so one parser covers both formats.
    let value: Value = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(match value {
        Value::Null => Value::Object(Default::default()),
        other => other,
    })
}
