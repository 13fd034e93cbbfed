pub mod ast;

use crate::config::ThresholdsConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Structural summary of a single source file.
///
/// Serialized field names are part of the `analysis_results.json` format.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FileSummary {
    pub file_path: PathBuf,
    pub lines_of_code: usize,
    pub functions: Vec<String>,
    pub classes: Vec<String>,
    pub complexity_score: f64,
}

/// Complexity breakdown for one function definition
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionComplexity {
    pub name: String,
    pub line: usize,
    pub cyclomatic: u32,
    pub cognitive: u32,
}

/// File-level complexity metrics.
///
/// The all-zero `Default` value stands for a file that failed to parse.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ComplexityMetrics {
    pub cyclomatic_complexity: u32,
    pub cognitive_complexity: u32,
    pub halstead_volume: f64,
    pub maintainability_index: f64,
    pub lines_of_code: usize,
    pub num_functions: usize,
    pub num_classes: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunctionComplexity>,
}

impl ComplexityMetrics {
    pub fn rating(&self, thresholds: &ThresholdsConfig) -> ComplexityRating {
        ComplexityRating::from_cyclomatic(self.cyclomatic_complexity, thresholds)
    }

    /// Value of the requested metric, used for sorting directory reports
    pub fn value_of(&self, kind: ComplexityType) -> f64 {
        match kind {
            ComplexityType::Cyclomatic => f64::from(self.cyclomatic_complexity),
            ComplexityType::Cognitive => f64::from(self.cognitive_complexity),
            ComplexityType::Halstead => self.halstead_volume,
            ComplexityType::Maintainability => self.maintainability_index,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComplexityRating {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ComplexityRating {
    pub fn from_cyclomatic(cyclomatic: u32, thresholds: &ThresholdsConfig) -> Self {
        if cyclomatic <= thresholds.low {
            ComplexityRating::Low
        } else if cyclomatic <= thresholds.moderate {
            ComplexityRating::Moderate
        } else if cyclomatic <= thresholds.high {
            ComplexityRating::High
        } else {
            ComplexityRating::VeryHigh
        }
    }
}

impl std::fmt::Display for ComplexityRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ComplexityRating::Low => "Low",
            ComplexityRating::Moderate => "Moderate",
            ComplexityRating::High => "High",
            ComplexityRating::VeryHigh => "Very High",
        };
        write!(f, "{label}")
    }
}

/// Metric families reported by the complexity analyzer
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityType {
    Cyclomatic,
    Cognitive,
    Halstead,
    Maintainability,
}

impl ComplexityType {
    /// Whether larger values mean worse code
    pub fn higher_is_worse(self) -> bool {
        !matches!(self, ComplexityType::Maintainability)
    }
}
