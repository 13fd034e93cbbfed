use crate::analyzers::{results_to_json, ProjectAnalyzer};
use crate::config::PyauditConfig;
use crate::io::{self, output::OutputFormat};
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub path: PathBuf,
    /// Overrides `output.results_file` from the config
    pub output: Option<PathBuf>,
    pub no_save: bool,
    pub format: OutputFormat,
}

impl AnalyzeConfig {
    fn results_file(&self, config: &PyauditConfig) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.output.results_file))
    }
}

pub fn handle_analyze(options: AnalyzeConfig, config: &PyauditConfig) -> Result<()> {
    if !options.path.exists() {
        anyhow::bail!("Path '{}' does not exist.", options.path.display());
    }

    let analyzer = ProjectAnalyzer::with_config(config.clone());
    let results = analyzer
        .analyze_project(&options.path)
        .with_context(|| format!("Failed to analyze {}", options.path.display()))?;
    log::info!("Analyzed {} files", results.len());

    let mut writer = io::output::create_writer(options.format);
    writer.write_project(&results)?;

    if options.no_save {
        return Ok(());
    }

    let results_file = options.results_file(config);
    let json = results_to_json(&results)?;
    io::write_file(&results_file, &json)
        .with_context(|| format!("Failed to save results to {}", results_file.display()))?;

    match options.format {
        OutputFormat::Terminal => println!("\nResults saved to {}", results_file.display()),
        OutputFormat::Json => log::info!("Results saved to {}", results_file.display()),
    }
    Ok(())
}
