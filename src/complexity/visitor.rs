//! Cyclomatic and cognitive complexity over a Python parse tree.
//!
//! Counting rules:
//! - module starts at cyclomatic 1; each `def` contributes its own base of 1
//! - `if`, `elif`, `while`, `for` add 1 cyclomatic
//! - `try` adds one per `except` handler plus one each for `else` and `finally`
//! - every `and`/`or` operator adds 1 to both metrics
//! - control structures add `1 + nesting` cognitive and nest their children
//!
//! An `elif` behaves like an `if` nested in the previous branch's `else`, so a
//! chain of `elif`s grows deeper with every link.

use crate::core::ast::{line_of, node_text};
use crate::core::FunctionComplexity;
use tree_sitter::Node;

#[derive(Debug)]
pub struct ComplexityVisitor<'a> {
    source: &'a str,
    pub cyclomatic: u32,
    pub cognitive: u32,
    nesting: u32,
    pub functions: Vec<FunctionComplexity>,
    pub classes: Vec<String>,
}

impl<'a> ComplexityVisitor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            cyclomatic: 1,
            cognitive: 0,
            nesting: 0,
            functions: Vec::new(),
            classes: Vec::new(),
        }
    }

    pub fn visit(&mut self, node: Node) {
        match node.kind() {
            "function_definition" => self.visit_function(node),
            "class_definition" => self.visit_class(node),
            "if_statement" => self.visit_if(node),
            "while_statement" | "for_statement" => self.visit_loop(node),
            "try_statement" => self.visit_try(node),
            "boolean_operator" => {
                self.cyclomatic += 1;
                self.cognitive += 1;
                self.visit_children(node);
            }
            _ => self.visit_children(node),
        }
    }

    fn visit_children(&mut self, node: Node) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child);
        }
    }

    fn name_of(&self, node: Node) -> String {
        node.child_by_field_name("name")
            .map(|name| node_text(name, self.source).to_string())
            .unwrap_or_else(|| "<anonymous>".to_string())
    }

    fn visit_function(&mut self, node: Node) {
        // Reserve the slot first so functions stay in definition order
        let index = self.functions.len();
        self.functions.push(FunctionComplexity {
            name: self.name_of(node),
            line: line_of(node),
            cyclomatic: 0,
            cognitive: 0,
        });

        let outer_cyclomatic = self.cyclomatic;
        let outer_cognitive = self.cognitive;
        self.cyclomatic = 1;
        self.cognitive = 0;

        self.visit_children(node);

        let function_cyclomatic = self.cyclomatic;
        let function_cognitive = self.cognitive;
        self.functions[index].cyclomatic = function_cyclomatic;
        self.functions[index].cognitive = function_cognitive;

        self.cyclomatic = outer_cyclomatic + function_cyclomatic;
        self.cognitive = outer_cognitive + function_cognitive;
    }

    fn visit_class(&mut self, node: Node) {
        let name = self.name_of(node);
        self.classes.push(name);
        self.visit_children(node);
    }

    fn visit_if(&mut self, node: Node) {
        let outer_nesting = self.nesting;
        self.cyclomatic += 1;
        self.cognitive += 1 + self.nesting;
        self.nesting += 1;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "elif_clause" => {
                    self.cyclomatic += 1;
                    self.cognitive += 1 + self.nesting;
                    self.nesting += 1;
                    self.visit_children(child);
                }
                // `else` belongs to the innermost branch, so it keeps the current depth
                _ => self.visit(child),
            }
        }

        self.nesting = outer_nesting;
    }

    fn visit_loop(&mut self, node: Node) {
        self.cyclomatic += 1;
        self.cognitive += 1 + self.nesting;
        self.nesting += 1;
        self.visit_children(node);
        self.nesting -= 1;
    }

    fn visit_try(&mut self, node: Node) {
        let mut cursor = node.walk();
        let branches = node
            .children(&mut cursor)
            .filter(|child| {
                matches!(
                    child.kind(),
                    "except_clause" | "except_group_clause" | "else_clause" | "finally_clause"
                )
            })
            .count() as u32;

        self.cyclomatic += branches;
        self.cognitive += 1 + self.nesting;
        self.nesting += 1;
        self.visit_children(node);
        self.nesting -= 1;
    }
}
