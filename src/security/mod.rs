pub mod report;
pub mod rules;
pub mod types;
mod visitor;

pub use report::{count_by_severity, generate_security_report};
pub use types::{SecurityIssue, Severity};
pub use visitor::SecurityVisitor;

use crate::config::{PyauditConfig, SecurityConfig};
use crate::core::ast::{parse_python, ParsedModule};
use crate::errors::Result;
use crate::io::walker::FileWalker;
use crate::progress;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Scan an already parsed module. Files with syntax errors yield no issues.
pub fn analyze_module_security(module: &ParsedModule, config: &SecurityConfig) -> Vec<SecurityIssue> {
    if module.has_syntax_error() {
        log::debug!(
            "Skipping security scan of {}: syntax error",
            module.path.display()
        );
        return Vec::new();
    }
    SecurityVisitor::new(module, config).run()
}

pub fn analyze_source_security(
    source: &str,
    path: impl AsRef<Path>,
    config: &SecurityConfig,
) -> Result<Vec<SecurityIssue>> {
    let module = parse_python(source, path)?;
    Ok(analyze_module_security(&module, config))
}

pub fn analyze_file_security(path: &Path, config: &SecurityConfig) -> Result<Vec<SecurityIssue>> {
    let source = crate::io::read_file(path)?;
    analyze_source_security(&source, path, config)
}

/// Scan every Python file under `root`. Files that cannot be read are logged and skipped.
pub fn analyze_project_security(
    root: &Path,
    config: &PyauditConfig,
) -> Result<BTreeMap<PathBuf, Vec<SecurityIssue>>> {
    let files = FileWalker::from_config(root, &config.files).walk()?;
    let bar = progress::file_progress_bar(files.len() as u64, "Scanning");

    let results = files
        .par_iter()
        .progress_with(bar.clone())
        .filter_map(|path| match analyze_file_security(path, &config.security) {
            Ok(issues) => Some((path.clone(), issues)),
            Err(e) => {
                log::warn!("Error analyzing {}: {}", path.display(), e);
                None
            }
        })
        .collect();

    bar.finish_and_clear();
    Ok(results)
}

/// Flatten per-file results into one list ordered by file, then scan order
pub fn flatten_issues(results: &BTreeMap<PathBuf, Vec<SecurityIssue>>) -> Vec<SecurityIssue> {
    results.values().flatten().cloned().collect()
}

/// Highest severity among the issues, if any
pub fn max_severity(issues: &[SecurityIssue]) -> Option<Severity> {
    issues.iter().map(|issue| issue.severity).max()
}
