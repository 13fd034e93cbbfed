//! Python parse trees backed by tree-sitter.

use crate::errors::{Error, Result};
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

/// A parsed Python module together with the source it came from
#[derive(Clone, Debug)]
pub struct ParsedModule {
    pub tree: Tree,
    pub source: String,
    pub path: PathBuf,
}

impl ParsedModule {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// True when the file is not valid Python 3.
    ///
    /// Covers tree-sitter error recovery as well as the Python 2 `print` and
    /// `exec` statements, which the grammar accepts.
    pub fn has_syntax_error(&self) -> bool {
        let root = self.tree.root_node();
        root.has_error() || contains_kind(root, PYTHON2_STATEMENTS)
    }

    pub fn text(&self, node: Node) -> &str {
        node_text(node, &self.source)
    }

    pub fn source_lines(&self) -> Vec<&str> {
        self.source.split('\n').collect()
    }
}

/// Parse Python source into a tree.
///
/// A new parser is built per call; `tree_sitter::Parser` is not `Sync`.
pub fn parse_python(source: &str, path: impl AsRef<Path>) -> Result<ParsedModule> {
    let path = path.as_ref();
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| Error::parse(path, format!("failed to load Python grammar: {e}")))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| Error::parse(path, "parser returned no tree"))?;

    Ok(ParsedModule {
        tree,
        source: source.to_string(),
        path: path.to_path_buf(),
    })
}

const PYTHON2_STATEMENTS: &[&str] = &["print_statement", "exec_statement"];

fn contains_kind(node: Node, kinds: &[&str]) -> bool {
    if kinds.contains(&node.kind()) {
        return true;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().any(|child| contains_kind(child, kinds))
}

pub fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// 1-based line number of the node's first character
pub fn line_of(node: Node) -> usize {
    node.start_position().row + 1
}

/// Content of a `string` node without prefix and quotes
pub fn string_content<'a>(node: Node, source: &'a str) -> &'a str {
    let full = node_text(node, source);
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();

    let start_len = children
        .first()
        .filter(|c| c.kind() == "string_start")
        .map(|c| c.byte_range().len())
        .unwrap_or(0);
    let end_len = children
        .last()
        .filter(|c| c.kind() == "string_end")
        .map(|c| c.byte_range().len())
        .unwrap_or(0);

    if start_len + end_len > full.len() {
        return "";
    }
    &full[start_len..full.len() - end_len]
}
