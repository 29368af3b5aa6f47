//! `parley-config`: bot configuration management.
//!
//! Provides:
//! - Typed config schema (compatible with the legacy camelCase `config.json`)
//! - YAML/JSON loading from a resolved path
//! - `${ENV_VAR}` substitution
//! - Default value application
//! - Validation with dotted-path errors and warnings
//! - Config redaction for safe display

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, load_config, resolve_config_path};
pub use redact::redact;
pub use schema::{CompletionConfig, GrammarConfig, LoggingConfig, ParleyConfig, TranslationConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use parley_core::ParleyError;
use std::path::Path;

/// Load, substitute env vars, apply defaults, and validate a config file.
///
/// This is the main entry point at startup. Validation warnings are logged;
/// any validation error aborts with `ParleyError::Config`.
pub async fn load_and_prepare(path: &Path) -> Result<ParleyConfig> {
    let (config, report) = prepare(path).await?;
    enforce(&report)?;
    Ok(config)
}

/// Everything `load_and_prepare` does except reporting, so callers can set
/// up logging from the loaded config before the report is emitted.
pub async fn prepare(path: &Path) -> Result<(ParleyConfig, ValidationReport)> {
    let raw = load_config(path).await?;
    let value = resolve_env_vars(&raw).context("Failed to resolve env vars in config")?;

    let config: ParleyConfig =
        serde_json::from_value(value).context("Failed to deserialize config")?;
    let config = apply_all_defaults(config);
    let report = validate(&config);
    Ok((config, report))
}

/// Log every finding in `report` and fail if it holds any error.
pub fn enforce(report: &ValidationReport) -> Result<(), ParleyError> {
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if !report.is_valid() {
        let summary: Vec<String> = report.errors.iter().map(ToString::to_string).collect();
        return Err(ParleyError::Config(summary.join("; ")));
    }
    Ok(())
}
