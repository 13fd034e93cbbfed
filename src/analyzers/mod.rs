use crate::core::FileSummary;
use crate::errors::Result;
use std::path::Path;

pub mod project;
pub mod python;

pub use project::{generate_report, results_to_json, ProjectAnalyzer};
pub use python::PythonAnalyzer;

/// Produces a structural summary for files of one language
pub trait CodeAnalyzer: Send + Sync {
    fn analyze_file(&self, path: &Path) -> Result<FileSummary>;

    /// Extensions this analyzer accepts, including the leading dot
    fn supported_extensions(&self) -> &[&'static str];

    fn supports(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.supported_extensions()
                    .iter()
                    .any(|supported| supported.trim_start_matches('.') == ext)
            })
            .unwrap_or(false)
    }
}
