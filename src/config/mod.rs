mod loader;

pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};

use crate::security::Severity;
use serde::{Deserialize, Serialize};

/// Root configuration structure, read from `.pyaudit.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PyauditConfig {
    #[serde(default)]
    pub thresholds: ThresholdsConfig,

    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub security: SecurityConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Upper bounds (inclusive) of the cyclomatic complexity rating bands
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThresholdsConfig {
    #[serde(default = "default_low")]
    pub low: u32,

    #[serde(default = "default_moderate")]
    pub moderate: u32,

    #[serde(default = "default_high")]
    pub high: u32,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            low: default_low(),
            moderate: default_moderate(),
            high: default_high(),
        }
    }
}

impl ThresholdsConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.low <= self.moderate && self.moderate <= self.high {
            Ok(())
        } else {
            Err(format!(
                "rating bands must be ascending (low={}, moderate={}, high={})",
                self.low, self.moderate, self.high
            ))
        }
    }
}

fn default_low() -> u32 {
    10
}

fn default_moderate() -> u32 {
    20
}

fn default_high() -> u32 {
    50
}

/// Which files a directory scan picks up
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilesConfig {
    /// Extensions without the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns matched against paths relative to the scan root
    #[serde(default = "default_ignore_patterns")]
    pub ignore: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            ignore: default_ignore_patterns(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["py".to_string()]
}

fn default_ignore_patterns() -> Vec<String> {
    ["venv/**", ".venv/**", "**/__pycache__/**", "build/**", "dist/**"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityConfig {
    /// Rule ids (or id prefixes) that never report
    #[serde(default)]
    pub disabled_rules: Vec<String>,

    #[serde(default = "default_min_severity")]
    pub min_severity: Severity,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            disabled_rules: Vec::new(),
            min_severity: default_min_severity(),
        }
    }
}

impl SecurityConfig {
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        !self
            .disabled_rules
            .iter()
            .any(|disabled| rule_id.starts_with(disabled.as_str()))
    }

    pub fn reports(&self, rule_id: &str, severity: Severity) -> bool {
        severity >= self.min_severity && self.is_rule_enabled(rule_id)
    }
}

fn default_min_severity() -> Severity {
    Severity::Low
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default = "default_results_file")]
    pub results_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_file: default_results_file(),
        }
    }
}

fn default_results_file() -> String {
    "analysis_results.json".to_string()
}

/// Contents written by `pyaudit init`
pub const DEFAULT_CONFIG_TOML: &str = r#"# pyaudit configuration

[thresholds]
# Inclusive upper bounds of the cyclomatic complexity ratings
low = 10
moderate = 20
high = 50

[files]
extensions = ["py"]
ignore = [
    "venv/**",
    ".venv/**",
    "**/__pycache__/**",
    "build/**",
    "dist/**",
]

[security]
disabled_rules = []
min_severity = "low"

[output]
results_file = "analysis_results.json"
"#;
