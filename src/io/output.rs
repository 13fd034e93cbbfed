use crate::analyzers::{generate_report, results_to_json};
use crate::config::ThresholdsConfig;
use crate::core::{ComplexityMetrics, ComplexityRating, ComplexityType, FileSummary, FunctionComplexity};
use crate::security::report::severity_heading;
use crate::security::{count_by_severity, generate_security_report, SecurityIssue, Severity};
use chrono::{DateTime, Utc};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

/// How a complexity report is laid out
#[derive(Debug, Clone, Default)]
pub struct ComplexityReportOptions {
    pub thresholds: ThresholdsConfig,
    pub show_functions: bool,
    /// Worst files first by this metric; path order when unset
    pub sort_by: Option<ComplexityType>,
}

pub trait OutputWriter {
    fn write_project(&mut self, results: &BTreeMap<PathBuf, FileSummary>) -> anyhow::Result<()>;

    fn write_complexity_file(
        &mut self,
        path: &Path,
        metrics: &ComplexityMetrics,
        options: &ComplexityReportOptions,
    ) -> anyhow::Result<()>;

    fn write_complexity_project(
        &mut self,
        root: &Path,
        results: &BTreeMap<PathBuf, ComplexityMetrics>,
        options: &ComplexityReportOptions,
    ) -> anyhow::Result<()>;

    fn write_security(&mut self, issues: &[SecurityIssue]) -> anyhow::Result<()>;
}

pub fn create_writer(format: OutputFormat) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Terminal => Box::new(TerminalWriter::new(std::io::stdout())),
        OutputFormat::Json => Box::new(JsonWriter::new(std::io::stdout())),
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    color: bool,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            color: colored::control::SHOULD_COLORIZE.should_colorize(),
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn rating(&self, rating: ComplexityRating) -> String {
        if !self.color {
            return rating.to_string();
        }
        let label = rating.to_string();
        match rating {
            ComplexityRating::Low => label.green().to_string(),
            ComplexityRating::Moderate => label.yellow().to_string(),
            ComplexityRating::High => label.red().to_string(),
            ComplexityRating::VeryHigh => label.red().bold().to_string(),
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn write_function_table(&mut self, functions: &[FunctionComplexity]) -> anyhow::Result<()> {
        if functions.is_empty() {
            writeln!(self.writer, "  No functions")?;
            return Ok(());
        }
        writeln!(self.writer, "{}", function_table(functions))?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_project(&mut self, results: &BTreeMap<PathBuf, FileSummary>) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", generate_report(results))?;
        Ok(())
    }

    fn write_complexity_file(
        &mut self,
        path: &Path,
        metrics: &ComplexityMetrics,
        options: &ComplexityReportOptions,
    ) -> anyhow::Result<()> {
        let title = format!("Complexity Analysis for {}:", path.display());
        let rating = self.rating(metrics.rating(&options.thresholds));
        writeln!(self.writer, "{}", self.heading(&title))?;
        writeln!(
            self.writer,
            "  Cyclomatic Complexity: {} ({rating})",
            metrics.cyclomatic_complexity
        )?;
        writeln!(
            self.writer,
            "  Cognitive Complexity: {}",
            metrics.cognitive_complexity
        )?;
        writeln!(self.writer, "  Lines of Code: {}", metrics.lines_of_code)?;
        writeln!(self.writer, "  Functions: {}", metrics.num_functions)?;
        writeln!(self.writer, "  Classes: {}", metrics.num_classes)?;
        writeln!(self.writer, "  Halstead Volume: {:.2}", metrics.halstead_volume)?;
        writeln!(
            self.writer,
            "  Maintainability Index: {:.2}",
            metrics.maintainability_index
        )?;

        if options.show_functions {
            writeln!(self.writer)?;
            self.write_function_table(&metrics.functions)?;
        }
        Ok(())
    }

    fn write_complexity_project(
        &mut self,
        root: &Path,
        results: &BTreeMap<PathBuf, ComplexityMetrics>,
        options: &ComplexityReportOptions,
    ) -> anyhow::Result<()> {
        let title = format!("Project Complexity Analysis for {}:", root.display());
        writeln!(self.writer, "{}", self.heading(&title))?;

        for (path, metrics) in ordered_entries(results, options.sort_by) {
            let rating = self.rating(metrics.rating(&options.thresholds));
            writeln!(self.writer, "\n{}:", path.display())?;
            writeln!(
                self.writer,
                "  Complexity: {} ({rating})",
                metrics.cyclomatic_complexity
            )?;
            writeln!(self.writer, "  Cognitive: {}", metrics.cognitive_complexity)?;
            writeln!(self.writer, "  Lines: {}", metrics.lines_of_code)?;

            if options.show_functions && !metrics.functions.is_empty() {
                self.write_function_table(&metrics.functions)?;
            }
        }
        Ok(())
    }

    fn write_security(&mut self, issues: &[SecurityIssue]) -> anyhow::Result<()> {
        let report = generate_security_report(issues);
        if !self.color {
            writeln!(self.writer, "{report}")?;
            return Ok(());
        }

        for line in report.lines() {
            match Severity::DESCENDING
                .iter()
                .find(|&&severity| severity_heading(severity) == line)
            {
                Some(&severity) => writeln!(self.writer, "{}", color_severity(line, severity))?,
                None => writeln!(self.writer, "{line}")?,
            }
        }
        Ok(())
    }
}

fn color_severity(text: &str, severity: Severity) -> ColoredString {
    match severity {
        Severity::Critical => text.red().bold(),
        Severity::High => text.red(),
        Severity::Medium => text.yellow(),
        Severity::Low => text.blue(),
    }
}

pub fn function_table(functions: &[FunctionComplexity]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Function", "Line", "Cyclomatic", "Cognitive"]);
    for function in functions {
        table.add_row(vec![
            function.name.clone(),
            function.line.to_string(),
            function.cyclomatic.to_string(),
            function.cognitive.to_string(),
        ]);
    }
    table
}

/// Entries in path order, or worst-first by `sort_by`
pub fn ordered_entries(
    results: &BTreeMap<PathBuf, ComplexityMetrics>,
    sort_by: Option<ComplexityType>,
) -> Vec<(&PathBuf, &ComplexityMetrics)> {
    let mut entries: Vec<_> = results.iter().collect();
    if let Some(kind) = sort_by {
        entries.sort_by(|(_, a), (_, b)| {
            let (a, b) = (a.value_of(kind), b.value_of(kind));
            if kind.higher_is_worse() {
                b.total_cmp(&a)
            } else {
                a.total_cmp(&b)
            }
        });
    }
    entries
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    pub tool: &'static str,
    pub version: &'static str,
    pub generated_at: DateTime<Utc>,
}

impl Metadata {
    pub fn now() -> Self {
        Self {
            tool: "pyaudit",
            version: env!("CARGO_PKG_VERSION"),
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonEnvelope<T: Serialize> {
    pub metadata: Metadata,
    pub results: T,
}

impl<T: Serialize> JsonEnvelope<T> {
    pub fn new(results: T) -> Self {
        Self {
            metadata: Metadata::now(),
            results,
        }
    }
}

#[derive(Debug, Serialize)]
struct ComplexityEntry<'a> {
    #[serde(flatten)]
    metrics: &'a ComplexityMetrics,
    rating: String,
}

#[derive(Debug, Serialize)]
struct SecuritySummary {
    total_issues: usize,
    by_severity: BTreeMap<String, usize>,
}

#[derive(Debug, Serialize)]
struct SecurityResults<'a> {
    summary: SecuritySummary,
    issues: &'a [SecurityIssue],
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }

    fn write_complexity_entries<'a>(
        &mut self,
        entries: impl IntoIterator<Item = (&'a PathBuf, &'a ComplexityMetrics)>,
        thresholds: &ThresholdsConfig,
    ) -> anyhow::Result<()> {
        let keyed: BTreeMap<String, ComplexityEntry<'a>> = entries
            .into_iter()
            .map(|(path, metrics)| {
                let entry = ComplexityEntry {
                    metrics,
                    rating: metrics.rating(thresholds).to_string(),
                };
                (path.display().to_string(), entry)
            })
            .collect();
        self.write_json(&JsonEnvelope::new(keyed))
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_project(&mut self, results: &BTreeMap<PathBuf, FileSummary>) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", results_to_json(results)?)?;
        Ok(())
    }

    fn write_complexity_file(
        &mut self,
        path: &Path,
        metrics: &ComplexityMetrics,
        options: &ComplexityReportOptions,
    ) -> anyhow::Result<()> {
        let path = path.to_path_buf();
        self.write_complexity_entries([(&path, metrics)], &options.thresholds)
    }

    fn write_complexity_project(
        &mut self,
        _root: &Path,
        results: &BTreeMap<PathBuf, ComplexityMetrics>,
        options: &ComplexityReportOptions,
    ) -> anyhow::Result<()> {
        self.write_complexity_entries(results, &options.thresholds)
    }

    fn write_security(&mut self, issues: &[SecurityIssue]) -> anyhow::Result<()> {
        let by_severity = count_by_severity(issues)
            .into_iter()
            .map(|(severity, count)| (severity.to_string(), count))
            .collect();
        let results = SecurityResults {
            summary: SecuritySummary {
                total_issues: issues.len(),
                by_severity,
            },
            issues,
        };
        self.write_json(&JsonEnvelope::new(results))
    }
}
