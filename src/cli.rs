use crate::core::ComplexityType;
use crate::io::output::OutputFormat;
use crate::security::Severity;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pyaudit")]
#[command(about = "Complexity and security analyzer for Python code", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Hide progress bars
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (defaults to searching for .pyaudit.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub plain: bool,

    /// Number of worker threads (0 = all cores)
    #[arg(short, long, default_value = "0", global = true)]
    pub jobs: usize,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a project: lines, functions, classes and a keyword complexity score
    Analyze {
        /// Project directory to analyze
        path: PathBuf,

        /// Where to save the JSON results
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip saving results to disk
        #[arg(long)]
        no_save: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Measure cyclomatic, cognitive and Halstead complexity of a file or directory
    Complexity {
        /// Python file or directory
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Show a per-function breakdown
        #[arg(long)]
        functions: bool,

        /// Order directory results worst-first by this metric
        #[arg(long, value_enum)]
        sort_by: Option<ComplexityType>,
    },

    /// Scan Python code for common security issues
    Security {
        /// Python file or directory
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Drop issues below this severity
        #[arg(long, value_enum, ignore_case = true)]
        min_severity: Option<Severity>,

        /// Exit with status 1 when an issue at or above this severity is found
        #[arg(long, value_enum, ignore_case = true)]
        fail_on: Option<Severity>,
    },

    /// Write a default .pyaudit.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
