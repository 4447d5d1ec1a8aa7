//! Parsed source units and the modules that group them.
//!
//! A `SourceUnit` is an immutable snapshot: path, text and syntax tree. The
//! engine only ever borrows units for the duration of a query.

use std::path::{Path, PathBuf};

use tree_sitter::{Node, Tree};

use crate::error::{Error, Result};
use crate::languages::{csharp, source_language};
use crate::types::{Position, Span};

/// A single parsed compilation unit.
pub struct SourceUnit {
    path: PathBuf,
    text: String,
    tree: Option<Tree>,
    /// Byte offset of the first character of every line.
    line_starts: Vec<usize>,
}

impl std::fmt::Debug for SourceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceUnit")
            .field("path", &self.path)
            .field("len", &self.text.len())
            .field("parsed", &self.tree.is_some())
            .finish()
    }
}

impl SourceUnit {
    /// Parse `text` into a source unit.
    ///
    /// Fails only if the grammar itself can't be loaded. A parse that yields
    /// no tree leaves the unit without one; queries then treat it as empty.
    pub fn parse(path: impl Into<PathBuf>, text: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let text = text.into();

        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&source_language().tree_sitter_language())
            .map_err(|e| Error::Parser(e.to_string()))?;
        let tree = parser.parse(&text, None);
        if tree.is_none() {
            tracing::warn!(path = %path.display(), "Parser produced no syntax tree");
        }

        Ok(Self::from_parts(path, text, tree))
    }

    /// Assemble a unit from an already-built tree.
    #[must_use]
    pub fn from_parts(path: PathBuf, text: String, tree: Option<Tree>) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            path,
            text,
            tree,
            line_starts,
        }
    }

    /// Path of the unit, relative to the workspace root.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full source text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Root of the syntax tree, if one was produced.
    #[must_use]
    pub fn syntax_root(&self) -> Option<Node<'_>> {
        self.tree.as_ref().map(Tree::root_node)
    }

    /// Map a byte offset to a 1-based line and 1-based character column.
    ///
    /// Offsets past the end clamp to the end of the text; offsets inside a
    /// multi-byte character count that character as started.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // No source file has 4 billion lines
    pub fn position(&self, byte_offset: usize) -> Position {
        let offset = byte_offset.min(self.text.len());
        let line_index = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line_index];
        let column = self.text[line_start..]
            .char_indices()
            .take_while(|(i, _)| line_start + i < offset)
            .count();
        Position::new(line_index as u32 + 1, column as u32 + 1)
    }

    /// The span a node covers, in editor coordinates.
    #[must_use]
    pub fn span_of(&self, node: &Node<'_>) -> Span {
        let start = self.position(node.start_byte());
        let end = self.position(node.end_byte());
        Span::between(start, end).unwrap_or_else(|| {
            tracing::warn!(
                path = %self.path.display(),
                node_kind = %node.kind(),
                "Tree-sitter produced an inverted span, collapsing to start"
            );
            Span {
                start_line: start.line,
                start_column: start.column,
                end_line: start.line,
                end_column: start.column,
            }
        })
    }

    /// Convert a 1-based line and 1-based character column to a 0-based
    /// character offset, `None` if the position lies outside the text.
    #[must_use]
    pub fn char_offset(&self, line: u32, column: u32) -> Option<usize> {
        let line_index = usize::try_from(line.checked_sub(1)?).ok()?;
        let column_index = usize::try_from(column.checked_sub(1)?).ok()?;
        let line_start = *self.line_starts.get(line_index)?;
        let line_end = self
            .line_starts
            .get(line_index + 1)
            .map_or(self.text.len(), |next| next - 1);
        let line_len = self.text[line_start..line_end].chars().count();
        if column_index > line_len {
            return None;
        }
        let preceding = self.text[..line_start].chars().count();
        Some(preceding + column_index)
    }

    /// The node the cursor at `char_offset` logically sits on.
    ///
    /// Finds the smallest node covering the offset, then lifts it to the
    /// construct a reader would name: anonymous tokens (keywords, braces)
    /// lift to their parent, and a declaration's name lifts to the
    /// declaration. Identifier references and literals stand for themselves.
    ///
    /// Returns `None` when the offset is out of range or the unit has no tree.
    #[must_use]
    pub fn node_at(&self, char_offset: usize) -> Option<Node<'_>> {
        let root = self.syntax_root()?;
        let (byte_offset, _) = self.text.char_indices().nth(char_offset)?;
        let leaf = root.descendant_for_byte_range(byte_offset, byte_offset)?;

        if !leaf.is_named() {
            return leaf.parent();
        }
        match leaf.parent() {
            Some(parent) if csharp::owns_name_token(parent, leaf) => Some(parent),
            _ => Some(leaf),
        }
    }
}

/// A named grouping of source units (a project).
#[derive(Debug)]
pub struct Module {
    name: String,
    units: Vec<SourceUnit>,
}

impl Module {
    /// Create a module; units keep the order they are given in.
    #[must_use]
    pub fn new(name: impl Into<String>, units: Vec<SourceUnit>) -> Self {
        Self {
            name: name.into(),
            units,
        }
    }

    /// Module name (e.g. `Sample.Domain`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units in enumeration order.
    #[must_use]
    pub fn units(&self) -> &[SourceUnit] {
        &self.units
    }

    /// Whether the module name ends with `suffix`, ignoring ASCII case.
    #[must_use]
    pub fn name_ends_with(&self, suffix: &str) -> bool {
        self.name.len() >= suffix.len()
            && self.name.as_bytes()[self.name.len() - suffix.len()..]
                .eq_ignore_ascii_case(suffix.as_bytes())
    }
}
