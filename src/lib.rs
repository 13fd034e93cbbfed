// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod complexity;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;
pub mod progress;
pub mod security;

// Re-export commonly used types
pub use crate::core::{
    ComplexityMetrics, ComplexityRating, ComplexityType, FileSummary, FunctionComplexity,
};

pub use crate::core::ast::{parse_python, ParsedModule};

pub use crate::analyzers::{generate_report, results_to_json, CodeAnalyzer, ProjectAnalyzer, PythonAnalyzer};

pub use crate::complexity::{
    analyze_file_complexity, analyze_module_complexity, analyze_project_complexity,
    analyze_source,
};

pub use crate::security::{
    analyze_file_security, analyze_project_security, analyze_source_security,
    generate_security_report, SecurityIssue, Severity,
};

pub use crate::config::PyauditConfig;
pub use crate::errors::{Error, Result};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
