use crate::complexity::{analyze_file_complexity, analyze_project_complexity};
use crate::config::PyauditConfig;
use crate::core::ComplexityType;
use crate::io::{
    self,
    output::{self, ComplexityReportOptions, OutputFormat},
};
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ComplexityConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub show_functions: bool,
    pub sort_by: Option<ComplexityType>,
}

pub fn handle_complexity(options: ComplexityConfig, config: &PyauditConfig) -> Result<()> {
    let report_options = ComplexityReportOptions {
        thresholds: config.thresholds.clone(),
        show_functions: options.show_functions,
        sort_by: options.sort_by,
    };
    let mut writer = output::create_writer(options.format);
    let path = &options.path;

    if io::file_exists(path) {
        let metrics = analyze_file_complexity(path)
            .with_context(|| format!("Failed to analyze {}", path.display()))?;
        writer.write_complexity_file(path, &metrics, &report_options)
    } else if io::dir_exists(path) {
        let results = analyze_project_complexity(path, config)
            .with_context(|| format!("Failed to analyze {}", path.display()))?;
        log::info!("Measured {} files", results.len());
        writer.write_complexity_project(path, &results, &report_options)
    } else {
        anyhow::bail!("{} is not a valid file or directory", path.display())
    }
}
