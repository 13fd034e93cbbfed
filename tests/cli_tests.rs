mod common;

use assert_cmd::Command;
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

struct Run {
    stdout: String,
    stderr: String,
    code: Option<i32>,
}

fn pyaudit(dir: &TempDir, args: &[&str]) -> Run {
    let output = Command::cargo_bin("pyaudit")
        .unwrap()
        .current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap();
    Run {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        code: output.status.code(),
    }
}

#[test]
fn test_analyze_missing_path() {
    let dir = TempDir::new().unwrap();
    let run = pyaudit(&dir, &["analyze", "missing_dir"]);
    assert_eq!(run.code, Some(1));
    assert!(run.stderr.contains("Path 'missing_dir' does not exist."));
}

#[test]
fn test_analyze_prints_report_and_saves_results() {
    let dir = common::project_with(&[("src/app.py", "def main():\n    pass\n")]);
    let run = pyaudit(&dir, &["analyze", "src"]);

    assert_eq!(run.code, Some(0), "stderr: {}", run.stderr);
    assert!(run.stdout.starts_with("\nCode Analysis Report\n===================\n"));
    assert!(run.stdout.contains("Total Functions: 1\n"));
    assert!(run
        .stdout
        .ends_with("  Complexity: 1.00\n\n\nResults saved to analysis_results.json\n"));

    let saved = fs::read_to_string(dir.path().join("analysis_results.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(json.as_object().unwrap().len(), 1);
}

#[test]
fn test_analyze_no_save_with_json_format() {
    let dir = common::project_with(&[("app.py", "class A:\n    pass\n")]);
    let run = pyaudit(&dir, &["analyze", ".", "--no-save", "-f", "json"]);

    assert_eq!(run.code, Some(0), "stderr: {}", run.stderr);
    let json: serde_json::Value = serde_json::from_str(&run.stdout).unwrap();
    let entry = json.as_object().unwrap().values().next().unwrap();
    assert_eq!(entry["classes"][0], "A");
    assert!(!dir.path().join("analysis_results.json").exists());
}

#[test]
fn test_complexity_single_file() {
    let dir = common::project_with(&[(
        "app.py",
        indoc! {"
            def check(x):
                if x:
                    return 1
                return 0
        "},
    )]);
    let run = pyaudit(&dir, &["complexity", "app.py"]);

    assert_eq!(run.code, Some(0), "stderr: {}", run.stderr);
    let lines: Vec<_> = run.stdout.lines().collect();
    assert_eq!(lines[0], "Complexity Analysis for app.py:");
    assert_eq!(lines[1], "  Cyclomatic Complexity: 3 (Low)");
    assert_eq!(lines[2], "  Cognitive Complexity: 1");
    assert_eq!(lines[3], "  Lines of Code: 4");
    assert_eq!(lines[4], "  Functions: 1");
    assert_eq!(lines[5], "  Classes: 0");
    assert!(lines[6].starts_with("  Halstead Volume: "));
    assert_eq!(lines[7], "  Maintainability Index: 154.48");
}

#[test]
fn test_complexity_directory() {
    let dir = common::project_with(&[("pkg/a.py", "x = 1\n"), ("pkg/b.py", "while x:\n    pass\n")]);
    let run = pyaudit(&dir, &["complexity", "pkg"]);

    assert_eq!(run.code, Some(0), "stderr: {}", run.stderr);
    assert_eq!(
        run.stdout,
        "Project Complexity Analysis for pkg:\n\
         \npkg/a.py:\n  Complexity: 1 (Low)\n  Cognitive: 0\n  Lines: 1\n\
         \npkg/b.py:\n  Complexity: 2 (Low)\n  Cognitive: 1\n  Lines: 2\n"
    );
}

#[test]
fn test_complexity_invalid_path() {
    let dir = TempDir::new().unwrap();
    let run = pyaudit(&dir, &["complexity", "nope.py"]);
    assert_eq!(run.code, Some(1));
    assert!(run.stderr.contains("nope.py is not a valid file or directory"));
}

#[test]
fn test_complexity_json_envelope() {
    let dir = common::project_with(&[("app.py", "x = 1\n")]);
    let run = pyaudit(&dir, &["complexity", "app.py", "--format", "json"]);

    assert_eq!(run.code, Some(0), "stderr: {}", run.stderr);
    let json: serde_json::Value = serde_json::from_str(&run.stdout).unwrap();
    assert_eq!(json["metadata"]["tool"], "pyaudit");
    assert_eq!(json["results"]["app.py"]["cyclomatic_complexity"], 1);
}

#[test]
fn test_security_missing_file() {
    let dir = TempDir::new().unwrap();
    let run = pyaudit(&dir, &["security", "ghost.py"]);
    assert_eq!(run.code, Some(1));
    assert!(run.stderr.contains("File ghost.py does not exist"));
}

#[test]
fn test_security_rejects_non_python_file() {
    let dir = common::project_with(&[("script.sh", "eval $X\n")]);
    let run = pyaudit(&dir, &["security", "script.sh"]);
    assert_eq!(run.code, Some(1));
    assert!(run.stderr.contains("Only Python files (.py) are supported"));
}

#[test]
fn test_security_clean_file() {
    let dir = common::project_with(&[("ok.py", "print('hi')\n")]);
    let run = pyaudit(&dir, &["security", "ok.py"]);
    assert_eq!(run.code, Some(0));
    assert_eq!(run.stdout, "No security issues found.\n");
}

#[test]
fn test_security_fail_on() {
    let dir = common::project_with(&[("app.py", "import pickle\n")]);

    let run = pyaudit(&dir, &["security", "app.py", "--fail-on", "high"]);
    assert_eq!(run.code, Some(1));
    assert!(run.stdout.contains("High Severity Issues:"));

    let run = pyaudit(&dir, &["security", "app.py", "--fail-on", "critical"]);
    assert_eq!(run.code, Some(0));
}

#[test]
fn test_security_directory_prefixes_paths() {
    let dir = common::project_with(&[("src/a.py", "eval(x)\n"), ("src/b.py", "exec(y)\n")]);
    let run = pyaudit(&dir, &["security", "src"]);

    assert_eq!(run.code, Some(0), "stderr: {}", run.stderr);
    assert!(run.stdout.contains("\nsrc/a.py:1: Use of eval() can execute arbitrary code\n"));
    assert!(run.stdout.contains("\nsrc/b.py:1: Use of exec() can execute arbitrary code\n"));
    assert!(run.stdout.contains("Total Issues: 2\nCritical: 2\n"));
}

#[test]
fn test_config_file_is_honored() {
    let dir = common::project_with(&[
        (".pyaudit.toml", "[security]\ndisabled_rules = [\"eval_usage\"]\n"),
        ("app.py", "eval(x)\n"),
    ]);
    let run = pyaudit(&dir, &["security", "app.py"]);
    assert_eq!(run.stdout, "No security issues found.\n");
}

#[test]
fn test_explicit_config_must_load() {
    let dir = common::project_with(&[("app.py", "x = 1\n")]);
    let run = pyaudit(&dir, &["--config", "absent.toml", "complexity", "app.py"]);
    assert_eq!(run.code, Some(1));
    assert!(run.stderr.contains("absent.toml"));
}

#[test]
fn test_init_writes_config_once() {
    let dir = TempDir::new().unwrap();

    let run = pyaudit(&dir, &["init"]);
    assert_eq!(run.code, Some(0));
    assert!(dir.path().join(".pyaudit.toml").exists());

    let run = pyaudit(&dir, &["init"]);
    assert_eq!(run.code, Some(1));
    assert!(run.stderr.contains("already exists"));

    let run = pyaudit(&dir, &["init", "--force"]);
    assert_eq!(run.code, Some(0));
}
