//! Lightweight structural summary of Python files.
//!
//! Works on raw text rather than a parse tree, so it also produces a
//! summary for files that do not parse.

use super::CodeAnalyzer;
use crate::config::PyauditConfig;
use crate::core::FileSummary;
use crate::errors::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static FUNCTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"def\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*\(").expect("function pattern is valid")
});

static CLASS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"class\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*[\(:]").expect("class pattern is valid")
});

const CONTROL_KEYWORDS: &[&str] = &[
    "if", "elif", "else", "for", "while", "try", "except", "finally",
];

const SUPPORTED_EXTENSIONS: &[&str] = &[".py", ".pyx", ".pyw"];

pub struct PythonAnalyzer {
    extensions: Vec<&'static str>,
}

impl Default for PythonAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PythonAnalyzer {
    pub fn new() -> Self {
        Self {
            extensions: SUPPORTED_EXTENSIONS.to_vec(),
        }
    }

    /// Narrows the handled extensions to the ones listed under `[files]`
    pub fn with_config(config: Option<PyauditConfig>) -> Self {
        let Some(config) = config else {
            return Self::new();
        };
        let extensions = SUPPORTED_EXTENSIONS
            .iter()
            .copied()
            .filter(|supported| {
                config
                    .files
                    .extensions
                    .iter()
                    .any(|ext| ext.trim_start_matches('.') == supported.trim_start_matches('.'))
            })
            .collect();
        Self { extensions }
    }

    pub fn summarize(&self, content: &str, path: &Path) -> FileSummary {
        FileSummary {
            file_path: path.to_path_buf(),
            lines_of_code: count_non_blank_lines(content),
            functions: extract_functions(content),
            classes: extract_classes(content),
            complexity_score: keyword_complexity(content),
        }
    }
}

impl CodeAnalyzer for PythonAnalyzer {
    fn analyze_file(&self, path: &Path) -> Result<FileSummary> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        if !self.supports(path) {
            return Err(Error::UnsupportedFile(path.to_path_buf()));
        }
        let content = crate::io::read_file(path)?;
        Ok(self.summarize(&content, path))
    }

    fn supported_extensions(&self) -> &[&'static str] {
        &self.extensions
    }
}

pub fn count_non_blank_lines(content: &str) -> usize {
    content.lines().filter(|line| !line.trim().is_empty()).count()
}

pub fn extract_functions(content: &str) -> Vec<String> {
    capture_names(&FUNCTION_PATTERN, content)
}

pub fn extract_classes(content: &str) -> Vec<String> {
    capture_names(&CLASS_PATTERN, content)
}

fn capture_names(pattern: &Regex, content: &str) -> Vec<String> {
    pattern
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str().to_string())
        .collect()
}

/// 1.0 plus the occurrences of each control keyword as `" kw "` or `"\nkw "`.
///
/// Text-based, so keywords in strings and comments count too.
pub fn keyword_complexity(content: &str) -> f64 {
    let branches: usize = CONTROL_KEYWORDS
        .iter()
        .map(|keyword| {
            content.matches(&format!(" {keyword} ")).count()
                + content.matches(&format!("\n{keyword} ")).count()
        })
        .sum();
    1.0 + branches as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    const SAMPLE: &str = indoc! {r#"
        import os


        class Base(object):
            def run(self):
                pass


        class Plain:
            pass


        def helper(x):
            return x
    "#};

    #[test]
    fn test_extracts_functions_and_classes_in_order() {
        assert_eq!(extract_functions(SAMPLE), vec!["run", "helper"]);
        assert_eq!(extract_classes(SAMPLE), vec!["Base", "Plain"]);
    }

    #[test]
    fn test_counts_non_blank_lines() {
        assert_eq!(count_non_blank_lines(SAMPLE), 8);
        assert_eq!(count_non_blank_lines("\n   \n\t\n"), 0);
    }

    #[test]
    fn test_keyword_complexity_requires_surrounding_spaces() {
        let source = "x = 1\nif a:\n    pass\nelse:\n    pass\n";
        assert_eq!(keyword_complexity(source), 2.0);
    }

    #[test]
    fn test_keyword_complexity_counts_inline_keywords() {
        // " if " and " else " in the conditional expression, plus " for " and " if "
        // inside the comprehension
        let source = "y = a if b else c\nz = [i for i in xs if i]\n";
        assert_eq!(keyword_complexity(source), 5.0);
    }

    #[test]
    fn test_keyword_complexity_of_empty_source() {
        assert_eq!(keyword_complexity(""), 1.0);
    }

    #[test]
    fn test_summarize_builds_summary() {
        let analyzer = PythonAnalyzer::new();
        let summary = analyzer.summarize(SAMPLE, Path::new("sample.py"));
        assert_eq!(summary.file_path, PathBuf::from("sample.py"));
        assert_eq!(summary.lines_of_code, 8);
        assert_eq!(summary.functions.len(), 2);
        assert_eq!(summary.classes.len(), 2);
        assert_eq!(summary.complexity_score, 1.0);
    }

    #[test]
    fn test_analyze_missing_file() {
        let analyzer = PythonAnalyzer::new();
        let err = analyzer
            .analyze_file(Path::new("/definitely/not/here.py"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_analyze_rejects_other_extensions() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("lib.rs");
        std::fs::write(&path, "fn main() {}\n").unwrap();
        let err = PythonAnalyzer::new().analyze_file(&path).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFile(_)));
    }

    #[test]
    fn test_supported_extensions() {
        let analyzer = PythonAnalyzer::new();
        assert!(analyzer.supports(Path::new("a.py")));
        assert!(analyzer.supports(Path::new("a.pyw")));
        assert!(analyzer.supports(Path::new("a.pyx")));
        assert!(!analyzer.supports(Path::new("a.rs")));
        assert!(!analyzer.supports(Path::new("Makefile")));
    }

    #[test]
    fn test_config_narrows_extensions() {
        let mut config = PyauditConfig::default();
        config.files.extensions = vec!["py".into(), "txt".into()];
        let analyzer = PythonAnalyzer::with_config(Some(config));
        assert_eq!(analyzer.supported_extensions(), &[".py"]);

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("gui.pyw");
        std::fs::write(&path, "def main():\n    pass\n").unwrap();
        let err = analyzer.analyze_file(&path).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFile(_)));
        assert!(PythonAnalyzer::with_config(None).analyze_file(&path).is_ok());
    }
}
