use crate::config::PyauditConfig;
use crate::io::{
    self,
    output::{self, OutputFormat},
};
use crate::security::{
    analyze_file_security, analyze_project_security, flatten_issues, max_severity, SecurityIssue,
    Severity,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct SecurityCommandConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
    /// Overrides `security.min_severity` from the config
    pub min_severity: Option<Severity>,
    pub fail_on: Option<Severity>,
}

pub fn handle_security(options: SecurityCommandConfig, config: &PyauditConfig) -> Result<()> {
    let mut config = config.clone();
    if let Some(min_severity) = options.min_severity {
        config.security.min_severity = min_severity;
    }

    let issues = scan(&options.path, &config)?;
    log::info!("Found {} security issues", issues.len());

    let mut writer = output::create_writer(options.format);
    writer.write_security(&issues)?;

    if let Some(threshold) = options.fail_on {
        check_fail_on(&issues, threshold)?;
    }
    Ok(())
}

fn scan(path: &Path, config: &PyauditConfig) -> Result<Vec<SecurityIssue>> {
    if !path.exists() {
        anyhow::bail!("File {} does not exist", path.display());
    }

    if io::dir_exists(path) {
        let results = analyze_project_security(path, config)
            .with_context(|| format!("Failed to scan {}", path.display()))?;
        return Ok(flatten_issues(&results));
    }

    if path.extension().and_then(|ext| ext.to_str()) != Some("py") {
        anyhow::bail!("Only Python files (.py) are supported");
    }

    analyze_file_security(path, &config.security)
        .with_context(|| format!("Failed to scan {}", path.display()))
}

fn check_fail_on(issues: &[SecurityIssue], threshold: Severity) -> Result<()> {
    match max_severity(issues) {
        Some(worst) if worst >= threshold => {
            anyhow::bail!("Found {} severity issues (--fail-on {})", worst, threshold)
        }
        _ => Ok(()),
    }
}
