//! Go import extraction using tree-sitter
//!
//! tree-sitter always produces a tree, even for broken sources: syntax errors
//! become `ERROR`/`MISSING` nodes. Imports recovered before (or around) a
//! syntax error are therefore still reported alongside the error.

use crate::error::{InstablError, Result, ResultExt};
use std::fs;
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Imports declared by one source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileImports {
    /// Import paths in declaration order, unquoted, duplicates kept
    pub imports: Vec<String>,
    /// Description of the first syntax error, if the file did not parse cleanly
    pub syntax_error: Option<String>,
}

impl FileImports {
    pub fn has_errors(&self) -> bool {
        self.syntax_error.is_some()
    }
}

/// Go source parser that only looks at import declarations
pub struct GoImportParser {
    parser: Parser,
}

impl GoImportParser {
    /// Create a parser with the Go grammar loaded
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| InstablError::ParserSetup {
                message: format!("failed to load Go grammar: {}", e),
            })?;
        Ok(Self { parser })
    }

    /// Read and parse `path`.
    ///
    /// Unreadable files are an error. Syntax errors and invalid UTF-8 are
    /// not: they are reported in [`FileImports::syntax_error`] next to
    /// whatever imports could be recovered.
    pub fn parse_file(&mut self, path: &Path) -> Result<FileImports> {
        let source = fs::read(path).with_file_context(path)?;
        self.parse_source(&source)
            .ok_or_else(|| InstablError::parse_error(path, "parser produced no syntax tree"))
    }

    /// Parse Go source bytes. Returns `None` only if tree-sitter gives up entirely.
    pub fn parse_source(&mut self, source: impl AsRef<[u8]>) -> Option<FileImports> {
        let bytes = source.as_ref();
        let tree = self.parser.parse(bytes, None)?;
        let root = tree.root_node();

        let mut imports = Vec::new();
        collect_imports(root, bytes, &mut imports);

        let syntax_error = if root.has_error() {
            Some(describe_first_error(root).unwrap_or_else(|| "syntax error".to_string()))
        } else {
            std::str::from_utf8(bytes)
                .err()
                .map(|e| format!("illegal UTF-8 encoding at byte {}", e.valid_up_to()))
        };

        Some(FileImports {
            imports,
            syntax_error,
        })
    }
}

/// Import specs in source order. Iterative: error recovery can nest `ERROR`
/// nodes arbitrarily deep.
fn collect_imports(root: Node, source: &[u8], out: &mut Vec<String>) {
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.kind() == "import_spec" {
            // a literal that is not valid UTF-8 is dropped on its own
            let path = node
                .child_by_field_name("path")
                .filter(|p| !p.is_missing())
                .and_then(|p| p.utf8_text(source).ok())
                .map(unquote)
                .filter(|p| !p.is_empty());
            if let Some(path) = path {
                out.push(path.to_string());
            }
            continue;
        }

        let mut cursor = node.walk();
        let children: Vec<Node> = node
            .named_children(&mut cursor)
            .filter(|child| {
                matches!(
                    child.kind(),
                    "import_spec" | "import_declaration" | "import_spec_list" | "ERROR"
                )
            })
            .collect();
        stack.extend(children.into_iter().rev());
    }
}

/// Position of the first `ERROR` or `MISSING` node in document order
fn describe_first_error(root: Node) -> Option<String> {
    let mut cursor = root.walk();

    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            let what = if node.is_missing() {
                format!("missing {}", node.kind())
            } else {
                "unexpected input".to_string()
            };
            return Some(format!("{}:{}: {}", pos.row + 1, pos.column + 1, what));
        }

        if !cursor.goto_first_child() {
            return None;
        }
        while !cursor.node().has_error() {
            if !cursor.goto_next_sibling() {
                return None;
            }
        }
    }
}

/// Strip the delimiters of an interpreted (`"..."`) or raw (`` `...` ``) string
fn unquote(literal: &str) -> &str {
    literal.trim_matches(|c| c == '"' || c == '`')
}
