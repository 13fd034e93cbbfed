use super::{CodeAnalyzer, PythonAnalyzer};
use crate::config::PyauditConfig;
use crate::core::FileSummary;
use crate::errors::Result;
use crate::io::walker::FileWalker;
use crate::progress;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Runs the registered analyzer for each supported file under a project root
pub struct ProjectAnalyzer {
    analyzers: HashMap<String, Arc<dyn CodeAnalyzer>>,
    config: PyauditConfig,
}

impl Default for ProjectAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectAnalyzer {
    pub fn new() -> Self {
        let mut analyzers: HashMap<String, Arc<dyn CodeAnalyzer>> = HashMap::new();
        analyzers.insert(".py".to_string(), Arc::new(PythonAnalyzer::new()));
        Self {
            analyzers,
            config: PyauditConfig::default(),
        }
    }

    /// Registers the Python analyzer for every configured extension it supports
    pub fn with_config(config: PyauditConfig) -> Self {
        let python: Arc<dyn CodeAnalyzer> =
            Arc::new(PythonAnalyzer::with_config(Some(config.clone())));
        let analyzers = config
            .files
            .extensions
            .iter()
            .map(|ext| format!(".{}", ext.trim_start_matches('.')))
            .filter(|ext| python.supported_extensions().contains(&ext.as_str()))
            .map(|ext| (ext, Arc::clone(&python)))
            .collect();
        Self { analyzers, config }
    }

    pub fn register(&mut self, extension: &str, analyzer: Arc<dyn CodeAnalyzer>) {
        let key = format!(".{}", extension.trim_start_matches('.'));
        self.analyzers.insert(key, analyzer);
    }

    fn analyzer_for(&self, path: &Path) -> Option<&Arc<dyn CodeAnalyzer>> {
        let ext = path.extension()?.to_str()?;
        self.analyzers.get(&format!(".{ext}"))
    }

    /// Analyze every supported file under `project_path`.
    ///
    /// Failures on individual files are logged and left out of the result.
    pub fn analyze_project(&self, project_path: &Path) -> Result<BTreeMap<PathBuf, FileSummary>> {
        let extensions = self
            .analyzers
            .keys()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .collect();
        let files = FileWalker::from_config(project_path, &self.config.files)
            .with_extensions(extensions)
            .walk()?;

        let bar = progress::file_progress_bar(files.len() as u64, "Analyzing");
        let results = files
            .par_iter()
            .progress_with(bar.clone())
            .filter_map(|path| {
                let analyzer = self.analyzer_for(path)?;
                match analyzer.analyze_file(path) {
                    Ok(summary) => Some((path.clone(), summary)),
                    Err(e) => {
                        log::warn!("Error analyzing {}: {}", path.display(), e);
                        None
                    }
                }
            })
            .collect();
        bar.finish_and_clear();

        Ok(results)
    }
}

/// Plain-text summary of a project run
pub fn generate_report(results: &BTreeMap<PathBuf, FileSummary>) -> String {
    let total_files = results.len();
    let total_lines: usize = results.values().map(|r| r.lines_of_code).sum();
    let total_functions: usize = results.values().map(|r| r.functions.len()).sum();
    let total_classes: usize = results.values().map(|r| r.classes.len()).sum();
    let avg_complexity = if total_files > 0 {
        results.values().map(|r| r.complexity_score).sum::<f64>() / total_files as f64
    } else {
        0.0
    };

    let mut report = format!(
        "\nCode Analysis Report\n\
         ===================\n\
         Total Files: {total_files}\n\
         Total Lines of Code: {total_lines}\n\
         Total Functions: {total_functions}\n\
         Total Classes: {total_classes}\n\
         Average Complexity: {avg_complexity:.2}\n\
         \n\
         File Details:\n"
    );

    for (path, result) in results {
        let _ = write!(report, "\n{}:\n", path.display());
        let _ = writeln!(report, "  Lines: {}", result.lines_of_code);
        let _ = writeln!(report, "  Functions: {}", join_or_none(&result.functions));
        let _ = writeln!(report, "  Classes: {}", join_or_none(&result.classes));
        let _ = writeln!(report, "  Complexity: {:.2}", result.complexity_score);
    }

    report
}

fn join_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "None".to_string()
    } else {
        names.join(", ")
    }
}

/// `{ "<path>": FileSummary, ... }` pretty-printed with two-space indentation
pub fn results_to_json(results: &BTreeMap<PathBuf, FileSummary>) -> Result<String> {
    let keyed: BTreeMap<String, &FileSummary> = results
        .iter()
        .map(|(path, summary)| (path.display().to_string(), summary))
        .collect();
    Ok(serde_json::to_string_pretty(&keyed)?)
}
