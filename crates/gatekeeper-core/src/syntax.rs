//! Tree-sitter parsing for syntax rules.
//!
//! A file is parsed at most once per scan, and only when a syntax rule
//! applies to it.

use std::path::Path;
use tree_sitter::{Language, Node, Parser, Tree};

use crate::context::{extension_of, SourceFile};
use crate::error::ScanError;

/// Grammar used for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxLanguage {
    /// `.ts`, `.mts`, `.cts`
    TypeScript,
    /// `.tsx`, and JavaScript files (the TSX grammar accepts JSX).
    Tsx,
}

impl SyntaxLanguage {
    /// Picks a grammar from the file extension.
    #[must_use]
    pub fn for_path(path: &Path) -> Option<Self> {
        match extension_of(path).as_str() {
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" | "jsx" | "js" | "mjs" | "cjs" => Some(Self::Tsx),
            _ => None,
        }
    }

    fn language(self) -> Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// A parsed file.
pub struct SyntaxTree {
    tree: Tree,
    language: SyntaxLanguage,
}

impl std::fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("language", &self.language)
            .field("root", &self.tree.root_node().kind())
            .finish()
    }
}

impl SyntaxTree {
    /// Parses `file` with the grammar matching its extension.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Parse`] if the extension has no grammar or the
    /// source contains syntax errors.
    pub fn parse(file: &SourceFile) -> Result<Self, ScanError> {
        let language = SyntaxLanguage::for_path(&file.relative_path).ok_or_else(|| {
            ScanError::Parse {
                path: file.relative_path.clone(),
                message: format!("no grammar for `.{}` files", file.extension()),
            }
        })?;
        Self::parse_source(language, &file.content, &file.relative_path)
    }

    /// Parses raw source with an explicit grammar.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Parse`] if the parser fails or the tree has errors.
    pub fn parse_source(
        language: SyntaxLanguage,
        source: &str,
        path: &Path,
    ) -> Result<Self, ScanError> {
        let parse_error = |message: String| ScanError::Parse {
            path: path.to_path_buf(),
            message,
        };

        let mut parser = Parser::new();
        parser
            .set_language(&language.language())
            .map_err(|e| parse_error(e.to_string()))?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| parse_error("parser produced no tree".to_string()))?;

        if tree.root_node().has_error() {
            let message = match first_error(tree.root_node()) {
                Some(node) => {
                    let pos = node.start_position();
                    format!("syntax error at {}:{}", pos.row + 1, pos.column + 1)
                }
                None => "syntax error".to_string(),
            };
            return Err(parse_error(message));
        }

        Ok(Self { tree, language })
    }

    /// Root node of the tree.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// All nodes of `kind`, in source order.
    #[must_use]
    pub fn find_all(&self, kind: &str) -> Vec<Node<'_>> {
        let mut found = Vec::new();
        let mut cursor = self.tree.walk();
        loop {
            let node = cursor.node();
            if node.kind() == kind {
                found.push(node);
            }
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return found;
                }
            }
        }
    }
}

/// Text of `node` within `source`.
#[must_use]
pub fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            if let Some(found) = first_error(child) {
                return Some(found);
            }
        }
    }
    None
}
