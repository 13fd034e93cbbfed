mod common;

use indoc::indoc;
use pretty_assertions::assert_eq;
use pyaudit::config::{PyauditConfig, ThresholdsConfig};
use pyaudit::*;

fn metrics(source: &str) -> ComplexityMetrics {
    analyze_source(source, "test.py").unwrap()
}

#[test]
fn test_empty_module_has_base_complexity() {
    let m = metrics("");
    assert_eq!(m.cyclomatic_complexity, 1);
    assert_eq!(m.cognitive_complexity, 0);
    assert_eq!(m.lines_of_code, 0);
    assert_eq!(m.halstead_volume, 0.0);
    assert_eq!(m.maintainability_index, 171.0 - 5.2);
}

#[test]
fn test_function_with_if() {
    let m = metrics(indoc! {"
        def sign(x):
            if x > 0:
                return 1
            return -1
    "});
    assert_eq!(m.cyclomatic_complexity, 3);
    assert_eq!(m.num_functions, 1);
}

#[test]
fn test_boolean_chain_adds_operands_minus_one() {
    let base = metrics("x = a\n").cyclomatic_complexity;
    let chained = metrics("x = a and b and c\n").cyclomatic_complexity;
    assert_eq!(chained - base, 2);
}

#[test]
fn test_cognitive_nesting() {
    let m = metrics(indoc! {"
        for row in rows:
            if row:
                handle(row)
    "});
    assert_eq!(m.cognitive_complexity, 3);
}

#[test]
fn test_elif_chain_cognitive() {
    let m = metrics(indoc! {"
        if a:
            x = 1
        elif b:
            x = 2
        elif c:
            x = 3
    "});
    assert_eq!(m.cognitive_complexity, 6);
    assert_eq!(m.cyclomatic_complexity, 4);
}

#[test]
fn test_try_with_handlers_else_finally() {
    let m = metrics(indoc! {"
        try:
            run()
        except (IOError, OSError):
            retry()
        except Exception:
            log()
        finally:
            close()
    "});
    assert_eq!(m.cyclomatic_complexity, 1 + 3);
    assert_eq!(m.cognitive_complexity, 1);
}

#[test]
fn test_syntax_error_gives_all_zero_metrics() {
    let m = metrics("class :\n  x = (\n");
    assert_eq!(m, ComplexityMetrics::default());
    assert_eq!(m.cyclomatic_complexity, 0);
    assert_eq!(m.maintainability_index, 0.0);
}

#[test]
fn test_python2_print_statement_gives_all_zero_metrics() {
    let m = metrics(indoc! {r#"
        def greet():
            print "hello"
    "#});
    assert_eq!(m, ComplexityMetrics::default());
    assert_eq!(metrics("print(\"hello\")\n").cyclomatic_complexity, 1);
}

#[test]
fn test_lines_of_code_ignore_comments_and_blanks() {
    let m = metrics(indoc! {"
        # module comment

        x = 1

            # indented comment
        y = 2
    "});
    assert_eq!(m.lines_of_code, 2);
}

#[test]
fn test_rating_boundaries() {
    let thresholds = ThresholdsConfig::default();
    let cases = [
        (10, "Low"),
        (11, "Moderate"),
        (20, "Moderate"),
        (21, "High"),
        (50, "High"),
        (51, "Very High"),
    ];
    for (cc, expected) in cases {
        assert_eq!(
            ComplexityRating::from_cyclomatic(cc, &thresholds).to_string(),
            expected,
            "cc = {cc}"
        );
    }
}

#[test]
fn test_fixture_file_metrics() {
    let path = common::fixture_project().join("app.py");
    let m = analyze_file_complexity(&path).unwrap();
    assert_eq!(m.cyclomatic_complexity, 10);
    assert_eq!(m.cognitive_complexity, 7);
    assert_eq!(m.lines_of_code, 19);
    assert_eq!(m.num_functions, 4);
    assert_eq!(m.num_classes, 1);

    let names: Vec<_> = m.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["__init__", "handle", "read", "load"]);
    let handle = &m.functions[1];
    assert_eq!((handle.cyclomatic, handle.cognitive), (4, 4));
}

#[test]
fn test_project_complexity_skips_non_python_and_ignored() {
    let dir = common::project_with(&[
        ("main.py", "if x:\n    pass\n"),
        ("notes.md", "if x:\n"),
        ("venv/lib/dep.py", "x = 1\n"),
        ("pkg/util.py", "while x:\n    pass\n"),
    ]);
    let results = analyze_project_complexity(dir.path(), &PyauditConfig::default()).unwrap();
    let files: Vec<_> = results
        .keys()
        .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        files,
        vec![
            std::path::PathBuf::from("main.py"),
            std::path::PathBuf::from("pkg/util.py")
        ]
    );
}

#[test]
fn test_project_includes_unparseable_files_with_zero_metrics() {
    let results =
        analyze_project_complexity(&common::fixture_project(), &PyauditConfig::default()).unwrap();
    let broken = &results[&common::fixture_project().join("broken.py")];
    assert_eq!(broken, &ComplexityMetrics::default());
}
