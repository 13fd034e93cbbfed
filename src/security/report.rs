use super::{SecurityIssue, Severity};
use std::collections::BTreeSet;
use std::fmt::Write;

pub const NO_ISSUES_MESSAGE: &str = "No security issues found.";

/// Render issues as a plain-text report grouped by severity, most severe first.
///
/// Issues keep their scan order within a group. When the issues come from
/// more than one file each entry is prefixed with its path instead of `Line`.
pub fn generate_security_report(issues: &[SecurityIssue]) -> String {
    if issues.is_empty() {
        return NO_ISSUES_MESSAGE.to_string();
    }

    let multi_file = issues
        .iter()
        .map(|issue| &issue.file)
        .collect::<BTreeSet<_>>()
        .len()
        > 1;

    let mut report = String::from("Security Analysis Report\n");
    report.push_str(&"=".repeat(25));
    report.push_str("\n\n");

    for severity in Severity::DESCENDING {
        let group: Vec<&SecurityIssue> = issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .collect();
        if group.is_empty() {
            continue;
        }

        let heading = severity_heading(severity);
        let _ = writeln!(report, "\n{heading}");
        report.push_str(&"-".repeat(heading.len()));
        report.push('\n');

        for issue in group {
            let location = if multi_file {
                format!("{}:{}", issue.file.display(), issue.line_number)
            } else {
                format!("Line {}", issue.line_number)
            };
            let _ = writeln!(report, "\n{location}: {}", issue.description);
            let _ = writeln!(report, "  Code: {}", issue.code_snippet);
            let _ = writeln!(report, "  Recommendation: {}", issue.recommendation);
        }
    }

    report.push_str("\n\nSummary:\n");
    let _ = writeln!(report, "Total Issues: {}", issues.len());
    for (severity, count) in count_by_severity(issues) {
        let _ = writeln!(report, "{severity}: {count}");
    }

    report
}

/// `"{Severity} Severity Issues:"`; its length sets the underline width
pub fn severity_heading(severity: Severity) -> String {
    format!("{severity} Severity Issues:")
}

/// Counts for each severity that occurs, most severe first
pub fn count_by_severity(issues: &[SecurityIssue]) -> Vec<(Severity, usize)> {
    Severity::DESCENDING
        .iter()
        .map(|&severity| {
            let count = issues.iter().filter(|i| i.severity == severity).count();
            (severity, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect()
}
