//! Rule table for the Python security scan.

use super::Severity;
use once_cell::sync::Lazy;
use regex::Regex;

/// Static description of one finding kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub id: &'static str,
    pub severity: Severity,
    pub description: &'static str,
    pub recommendation: &'static str,
}

pub const EVAL_USAGE: Rule = Rule {
    id: "eval_usage",
    severity: Severity::Critical,
    description: "Use of eval() can execute arbitrary code",
    recommendation: "Replace eval() with ast.literal_eval() or safer parsing",
};

pub const EXEC_USAGE: Rule = Rule {
    id: "exec_usage",
    severity: Severity::Critical,
    description: "Use of exec() can execute arbitrary code",
    recommendation: "Avoid exec() or use restricted execution environments",
};

pub const INPUT_WITHOUT_PROMPT: Rule = Rule {
    id: "input_without_prompt",
    severity: Severity::Medium,
    description: "input() without prompt can be confusing",
    recommendation: "Always provide a clear prompt for user input",
};

pub const POTENTIAL_SQL_INJECTION: Rule = Rule {
    id: "potential_sql_injection",
    severity: Severity::High,
    description: "Potential SQL injection via string concatenation",
    recommendation: "Use parameterized queries instead of string concatenation",
};

pub const HARDCODED_CREDENTIALS: Rule = Rule {
    id: "hardcoded_credentials",
    severity: Severity::High,
    description: "Potential hardcoded credentials in string literal",
    recommendation: "Use environment variables or secure config files for credentials",
};

pub const SQL_INJECTION_STRING: Rule = Rule {
    id: "sql_injection_string",
    severity: Severity::Medium,
    description: "SQL string with potential injection vulnerability",
    recommendation: "Use parameterized queries for SQL operations",
};

/// Modules whose import alone is worth a review, with the reason
pub const DANGEROUS_IMPORTS: &[(&str, &str)] = &[
    (
        "pickle",
        "Pickle can execute arbitrary code during deserialization",
    ),
    (
        "subprocess",
        "Subprocess can lead to command injection vulnerabilities",
    ),
    ("eval", "Direct eval usage can execute arbitrary code"),
    ("exec", "Direct exec usage can execute arbitrary code"),
];

pub fn dangerous_import_reason(module: &str) -> Option<&'static str> {
    DANGEROUS_IMPORTS
        .iter()
        .find(|(name, _)| *name == module)
        .map(|(_, reason)| *reason)
}

pub const DANGEROUS_IMPORT_SEVERITY: Severity = Severity::High;

pub fn dangerous_import_rule_id(module: &str) -> String {
    format!("dangerous_import_{module}")
}

pub fn dangerous_import_description(reason: &str) -> String {
    format!("Dangerous import: {reason}")
}

pub fn dangerous_import_recommendation(module: &str) -> String {
    format!("Review usage of {module} and consider safer alternatives")
}

/// Methods on a cursor-like receiver that take a SQL string
pub const SQL_EXECUTE_METHODS: &[&str] = &["execute", "executemany"];

pub const SQL_KEYWORDS: &[&str] = &["select ", "insert ", "update ", "delete ", "drop ", "create "];

/// Credential assignments embedded inside a string literal, e.g. a DSN or config blob
static CREDENTIAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r#"(?i)password\s*=\s*["'][^"'\n]{3,}["']"#,
        r#"(?i)api_key\s*=\s*["'][^"'\n]{10,}["']"#,
        r#"(?i)secret\s*=\s*["'][^"'\n]{10,}["']"#,
        r#"(?i)token\s*=\s*["'][^"'\n]{10,}["']"#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("credential pattern is a valid regex"))
    .collect()
});

pub fn contains_credential_assignment(literal: &str) -> bool {
    let lowered = literal.to_lowercase();
    CREDENTIAL_PATTERNS.iter().any(|re| re.is_match(&lowered))
}

/// Minimum literal length for an assignment to a credential-looking name.
///
/// Returns `None` when the name does not look like a credential.
pub fn credential_min_length(variable: &str) -> Option<usize> {
    let lowered = variable.to_lowercase();
    if lowered.contains("password") || lowered.contains("passwd") {
        Some(3)
    } else if ["api_key", "apikey", "secret", "token"]
        .iter()
        .any(|needle| lowered.contains(needle))
    {
        Some(10)
    } else {
        None
    }
}

/// SQL keyword present and the literal is filled by `%s` or `.format(` on the same line
pub fn is_injectable_sql_string(literal: &str, source_line: &str) -> bool {
    let lowered = literal.to_lowercase();
    SQL_KEYWORDS.iter().any(|kw| lowered.contains(kw))
        && (lowered.contains("%s") || source_line.contains(".format("))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dangerous_import_lookup() {
        assert!(dangerous_import_reason("pickle").is_some());
        assert!(dangerous_import_reason("subprocess").is_some());
        assert!(dangerous_import_reason("os").is_none());
        assert!(dangerous_import_reason("pickle.util").is_none());
    }

    #[test]
    fn test_credential_pattern_in_literal() {
        assert!(contains_credential_assignment("password='abc'"));
        assert!(contains_credential_assignment("PASSWORD = \"hunter2\""));
        assert!(contains_credential_assignment("api_key='0123456789'"));
        assert!(!contains_credential_assignment("api_key='short'"));
        assert!(!contains_credential_assignment("password=''"));
        assert!(!contains_credential_assignment("just a sentence"));
    }

    #[test]
    fn test_credential_min_length_by_name() {
        assert_eq!(credential_min_length("DB_PASSWORD"), Some(3));
        assert_eq!(credential_min_length("github_token"), Some(10));
        assert_eq!(credential_min_length("client_secret"), Some(10));
        assert_eq!(credential_min_length("username"), None);
    }

    #[test]
    fn test_injectable_sql_string() {
        assert!(is_injectable_sql_string(
            "SELECT * FROM users WHERE id = %s",
            ""
        ));
        assert!(is_injectable_sql_string(
            "DELETE FROM t WHERE id = {}",
            "q = \"DELETE FROM t WHERE id = {}\".format(x)"
        ));
        assert!(!is_injectable_sql_string("SELECT * FROM users", "q = 'SELECT * FROM users'"));
        assert!(!is_injectable_sql_string("selected items %s", ""));
    }
}
