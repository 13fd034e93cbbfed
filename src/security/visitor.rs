use super::rules::{self, Rule};
use super::{SecurityIssue, Severity};
use crate::config::SecurityConfig;
use crate::core::ast::{line_of, node_text, string_content, ParsedModule};
use tree_sitter::Node;

/// Pre-order walk over a module that records findings in source order
pub struct SecurityVisitor<'a> {
    module: &'a ParsedModule,
    lines: Vec<&'a str>,
    config: &'a SecurityConfig,
    issues: Vec<SecurityIssue>,
}

impl<'a> SecurityVisitor<'a> {
    pub fn new(module: &'a ParsedModule, config: &'a SecurityConfig) -> Self {
        Self {
            module,
            lines: module.source_lines(),
            config,
            issues: Vec::new(),
        }
    }

    pub fn run(mut self) -> Vec<SecurityIssue> {
        let module: &'a ParsedModule = self.module;
        self.visit(module.root());
        self.issues
    }

    fn visit(&mut self, node: Node<'a>) {
        match node.kind() {
            "import_statement" => self.check_import(node),
            "import_from_statement" => self.check_from_import(node),
            "call" => self.check_call(node),
            "assignment" => self.check_credential_assignment(node),
            "string" => self.check_string_literal(node),
            "concatenated_string" => {
                self.check_concatenated_string(node);
                return;
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child);
        }
    }

    fn text(&self, node: Node) -> &'a str {
        let module: &'a ParsedModule = self.module;
        node_text(node, &module.source)
    }

    fn add_rule(&mut self, rule: &Rule, line: usize) {
        self.add_issue(
            rule.id.to_string(),
            rule.severity,
            rule.description.to_string(),
            line,
            rule.recommendation.to_string(),
        );
    }

    fn add_issue(
        &mut self,
        rule_id: String,
        severity: Severity,
        description: String,
        line_number: usize,
        recommendation: String,
    ) {
        if !self.config.reports(&rule_id, severity) {
            return;
        }

        let code_snippet = line_number
            .checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(|line| line.trim().to_string())
            .unwrap_or_default();

        self.issues.push(SecurityIssue {
            rule_id,
            severity,
            description,
            line_number,
            code_snippet,
            recommendation,
            file: self.module.path.clone(),
        });
    }

    fn check_import(&mut self, node: Node<'a>) {
        let mut cursor = node.walk();
        let names: Vec<Node<'a>> = node.children_by_field_name("name", &mut cursor).collect();

        for name in names {
            let module = match name.kind() {
                "aliased_import" => name
                    .child_by_field_name("name")
                    .map(|n| self.text(n))
                    .unwrap_or(""),
                _ => self.text(name),
            };
            self.report_dangerous_import(module, line_of(node));
        }
    }

    fn check_from_import(&mut self, node: Node<'a>) {
        if let Some(module) = node.child_by_field_name("module_name") {
            // Relative imports never name a stdlib module
            if module.kind() == "dotted_name" {
                let module = self.text(module);
                self.report_dangerous_import(module, line_of(node));
            }
        }
    }

    fn report_dangerous_import(&mut self, module: &str, line: usize) {
        if let Some(reason) = rules::dangerous_import_reason(module) {
            self.add_issue(
                rules::dangerous_import_rule_id(module),
                rules::DANGEROUS_IMPORT_SEVERITY,
                rules::dangerous_import_description(reason),
                line,
                rules::dangerous_import_recommendation(module),
            );
        }
    }

    fn check_call(&mut self, node: Node<'a>) {
        let Some(function) = node.child_by_field_name("function") else {
            return;
        };
        let arguments = node.child_by_field_name("arguments");
        let line = line_of(node);

        match function.kind() {
            "identifier" => match self.text(function) {
                "eval" => self.add_rule(&rules::EVAL_USAGE, line),
                "exec" => self.add_rule(&rules::EXEC_USAGE, line),
                "input" if positional_arguments(arguments).is_empty() => {
                    self.add_rule(&rules::INPUT_WITHOUT_PROMPT, line)
                }
                _ => {}
            },
            "attribute" => self.check_sql_execute(function, arguments, line),
            _ => {}
        }
    }

    fn check_sql_execute(&mut self, function: Node<'a>, arguments: Option<Node<'a>>, line: usize) {
        let receiver_is_name = function
            .child_by_field_name("object")
            .is_some_and(|object| object.kind() == "identifier");
        let method = function
            .child_by_field_name("attribute")
            .map(|attr| self.text(attr))
            .unwrap_or("");

        if !receiver_is_name || !rules::SQL_EXECUTE_METHODS.contains(&method) {
            return;
        }

        for argument in positional_arguments(arguments) {
            let argument = unwrap_parentheses(argument);
            if argument.kind() != "binary_operator" {
                continue;
            }
            let operator = argument
                .child_by_field_name("operator")
                .map(|op| op.kind())
                .unwrap_or("");
            if operator == "+" || operator == "%" {
                self.add_rule(&rules::POTENTIAL_SQL_INJECTION, line);
            }
        }
    }

    fn check_credential_assignment(&mut self, node: Node<'a>) {
        let (Some(left), Some(right)) = (
            node.child_by_field_name("left"),
            node.child_by_field_name("right"),
        ) else {
            return;
        };

        let variable = match left.kind() {
            "identifier" => self.text(left),
            "attribute" => left
                .child_by_field_name("attribute")
                .map(|attr| self.text(attr))
                .unwrap_or(""),
            _ => return,
        };

        let module: &'a ParsedModule = self.module;
        if right.kind() != "string" || is_interpolated(right) || is_bytes(right, &module.source) {
            return;
        }

        if let Some(min_len) = rules::credential_min_length(variable) {
            let value = string_content(right, &module.source);
            if value.chars().count() >= min_len {
                self.add_rule(&rules::HARDCODED_CREDENTIALS, line_of(node));
            }
        }
    }

    fn check_string_literal(&mut self, node: Node<'a>) {
        let module: &'a ParsedModule = self.module;
        if is_bytes(node, &module.source) {
            return;
        }
        let value = string_content(node, &module.source);
        self.check_literal_value(value, line_of(node));
    }

    /// Adjacent literals form one value, checked once at the first piece's line.
    /// Interpolations inside the pieces are still walked.
    fn check_concatenated_string(&mut self, node: Node<'a>) {
        let module: &'a ParsedModule = self.module;
        let mut cursor = node.walk();
        let pieces: Vec<Node<'a>> = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "string")
            .collect();

        if let Some(first) = pieces.first() {
            if !is_bytes(*first, &module.source) {
                let value: String = pieces
                    .iter()
                    .map(|piece| string_content(*piece, &module.source))
                    .collect();
                self.check_literal_value(&value, line_of(*first));
            }
        }

        for piece in pieces {
            let mut cursor = piece.walk();
            let parts: Vec<Node<'a>> = piece.children(&mut cursor).collect();
            for part in parts {
                self.visit(part);
            }
        }
    }

    fn check_literal_value(&mut self, value: &str, line: usize) {
        if rules::contains_credential_assignment(value) {
            self.add_rule(&rules::HARDCODED_CREDENTIALS, line);
        }

        let source_line = self.lines.get(line - 1).copied().unwrap_or("");
        if rules::is_injectable_sql_string(value, source_line) {
            self.add_rule(&rules::SQL_INJECTION_STRING, line);
        }
    }
}

/// Positional arguments of a call; keyword and `**` arguments are left out
fn positional_arguments(arguments: Option<Node>) -> Vec<Node> {
    let Some(arguments) = arguments else {
        return Vec::new();
    };

    // `f(x for x in xs)` stores the generator directly as the arguments node
    if arguments.kind() == "generator_expression" {
        return vec![arguments];
    }

    let mut cursor = arguments.walk();
    let positional = arguments
        .named_children(&mut cursor)
        .filter(|arg| {
            !matches!(
                arg.kind(),
                "keyword_argument" | "dictionary_splat" | "comment"
            )
        })
        .collect();
    positional
}

fn unwrap_parentheses(mut node: Node) -> Node {
    while node.kind() == "parenthesized_expression" {
        let mut cursor = node.walk();
        let inner = node
            .named_children(&mut cursor)
            .find(|child| child.kind() != "comment");
        match inner {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

/// `b"..."` and `rb"..."` literals hold bytes, not text
fn is_bytes(string: Node, source: &str) -> bool {
    string
        .child(0)
        .filter(|start| start.kind() == "string_start")
        .is_some_and(|start| node_text(start, source).contains(['b', 'B']))
}

fn is_interpolated(string: Node) -> bool {
    let mut cursor = string.walk();
    let interpolated = string
        .children(&mut cursor)
        .any(|child| child.kind() == "interpolation");
    interpolated
}
