pub mod halstead;
pub mod maintainability;
mod visitor;

pub use halstead::{halstead_volume, HalsteadCounts};
pub use maintainability::maintainability_index;
pub use visitor::ComplexityVisitor;

use crate::config::PyauditConfig;
use crate::core::ast::{parse_python, ParsedModule};
use crate::core::ComplexityMetrics;
use crate::errors::Result;
use crate::io::walker::FileWalker;
use crate::progress;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Non-blank lines that are not `#` comments
pub fn count_code_lines(source: &str) -> usize {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .count()
}

/// Metrics for an already parsed module. A module with syntax errors gets
/// the all-zero value.
pub fn analyze_module_complexity(module: &ParsedModule) -> ComplexityMetrics {
    if module.has_syntax_error() {
        log::debug!(
            "Skipping complexity of {}: syntax error",
            module.path.display()
        );
        return ComplexityMetrics::default();
    }

    let root = module.root();
    let mut visitor = ComplexityVisitor::new(&module.source);
    visitor.visit(root);

    let lines_of_code = count_code_lines(&module.source);
    ComplexityMetrics {
        cyclomatic_complexity: visitor.cyclomatic,
        cognitive_complexity: visitor.cognitive,
        halstead_volume: halstead_volume(root, &module.source),
        maintainability_index: maintainability_index(visitor.cyclomatic, lines_of_code),
        lines_of_code,
        num_functions: visitor.functions.len(),
        num_classes: visitor.classes.len(),
        functions: visitor.functions,
    }
}

pub fn analyze_source(source: &str, path: impl AsRef<Path>) -> Result<ComplexityMetrics> {
    let module = parse_python(source, path)?;
    Ok(analyze_module_complexity(&module))
}

pub fn analyze_file_complexity(path: &Path) -> Result<ComplexityMetrics> {
    let source = crate::io::read_file(path)?;
    analyze_source(&source, path)
}

/// Metrics for every Python file under `root`, keyed by path.
///
/// Unreadable files are logged and left out.
pub fn analyze_project_complexity(
    root: &Path,
    config: &PyauditConfig,
) -> Result<BTreeMap<PathBuf, ComplexityMetrics>> {
    let files = FileWalker::from_config(root, &config.files).walk()?;
    let bar = progress::file_progress_bar(files.len() as u64, "Measuring");

    let results = files
        .par_iter()
        .progress_with(bar.clone())
        .filter_map(|path| match analyze_file_complexity(path) {
            Ok(metrics) => Some((path.clone(), metrics)),
            Err(e) => {
                log::warn!("Error analyzing {}: {}", path.display(), e);
                None
            }
        })
        .collect();

    bar.finish_and_clear();
    Ok(results)
}
