//! Halstead volume from parse-tree tokens.
//!
//! Operators are the anonymous leaf tokens of the tree: keywords,
//! punctuation and operator symbols. Operands are names and literals,
//! identified by their source text. String literals are taken whole, so
//! interpolations inside f-strings are not counted separately.

use crate::core::ast::node_text;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tree_sitter::Node;

const OPERAND_KINDS: &[&str] = &[
    "identifier",
    "integer",
    "float",
    "string",
    "concatenated_string",
    "true",
    "false",
    "none",
];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HalsteadCounts {
    pub distinct_operators: usize,
    pub distinct_operands: usize,
    pub total_operators: usize,
    pub total_operands: usize,
}

impl HalsteadCounts {
    pub fn vocabulary(&self) -> usize {
        self.distinct_operators + self.distinct_operands
    }

    pub fn length(&self) -> usize {
        self.total_operators + self.total_operands
    }

    /// `N * log2(n)`; zero for a vocabulary below two
    pub fn volume(&self) -> f64 {
        let vocabulary = self.vocabulary();
        if vocabulary < 2 {
            return 0.0;
        }
        self.length() as f64 * (vocabulary as f64).log2()
    }
}

#[derive(Debug, Default)]
struct TokenCollector<'a> {
    operators: HashMap<&'a str, usize>,
    operands: HashMap<&'a str, usize>,
}

impl<'a> TokenCollector<'a> {
    fn visit(&mut self, node: Node, source: &'a str) {
        let kind = node.kind();
        if kind == "comment" {
            return;
        }

        if OPERAND_KINDS.contains(&kind) {
            *self.operands.entry(node_text(node, source)).or_insert(0) += 1;
            return;
        }

        if !node.is_named() && node.child_count() == 0 {
            let text = node_text(node, source);
            if !text.trim().is_empty() {
                *self.operators.entry(text).or_insert(0) += 1;
            }
            return;
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child, source);
        }
    }

    fn counts(&self) -> HalsteadCounts {
        HalsteadCounts {
            distinct_operators: self.operators.len(),
            distinct_operands: self.operands.len(),
            total_operators: self.operators.values().sum(),
            total_operands: self.operands.values().sum(),
        }
    }
}

pub fn collect_counts(root: Node, source: &str) -> HalsteadCounts {
    let mut collector = TokenCollector::default();
    collector.visit(root, source);
    collector.counts()
}

pub fn halstead_volume(root: Node, source: &str) -> f64 {
    collect_counts(root, source).volume()
}
