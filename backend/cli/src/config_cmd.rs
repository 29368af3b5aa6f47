use std::path::Path;

use anyhow::{bail, Result};
use parley_config::ValidationReport;

/// Print the resolved config with secrets masked, followed by every
/// validation finding. Fails when the config has errors.
pub async fn check(path: &Path) -> Result<()> {
    println!("\n🔍 Checking {}\n", path.display());

    let (config, report) = parley_config::prepare(path).await?;
    let redacted = parley_config::redact(&serde_json::to_value(&config)?);
    println!("{}\n", serde_json::to_string_pretty(&redacted)?);

    print!("{}", render_report(&report));
    if !report.is_valid() {
        bail!("config has {} error(s)", report.errors.len());
    }
    Ok(())
}

fn render_report(report: &ValidationReport) -> String {
    let mut out = String::new();
    for error in &report.errors {
        out.push_str(&format!("  🔴 {}: {}\n", error.path, error.message));
    }
    for warning in &report.warnings {
        out.push_str(&format!("  🟡 {}: {}\n", warning.path, warning.message));
    }
    if report.is_valid() {
        out.push_str("✅ Config is valid.\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_config::ParleyConfig;

    #[test]
    fn empty_config_reports_missing_session_fields() {
        let report = parley_config::validate(&ParleyConfig::default());
        let rendered = render_report(&report);
        assert!(rendered.contains("🔴 token"));
        assert!(rendered.contains("🔴 guildId"));
        assert!(!rendered.contains("✅"));
    }
}
