//! Domain types shared across the engine.
//!
//! - **Positions**: `Position`, `Span` (1-indexed, editor conventions)
//! - **Results**: `HandlerLocation`, what the host navigates to
//!
//! Line numbers are 1-based everywhere. Columns are 1-based and count
//! characters, not bytes, so they can be handed to an editor unchanged.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A line/column position in a source unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Line (1-indexed)
    pub line: u32,
    /// Column in characters (1-indexed)
    pub column: u32,
}

impl Position {
    /// Create a position.
    #[must_use]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A start/end position span in a file.
///
/// Positions are 1-indexed (first line is 1, first column is 1) to match
/// editor conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Starting line (1-indexed)
    pub start_line: u32,
    /// Starting column (1-indexed)
    pub start_column: u32,
    /// Ending line (1-indexed, inclusive)
    pub end_line: u32,
    /// Ending column (1-indexed, exclusive)
    pub end_column: u32,
}

impl Span {
    /// Create a new span with validation.
    ///
    /// Returns `None` if the end position is before the start position.
    #[must_use]
    pub fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Option<Self> {
        if end_line < start_line || (end_line == start_line && end_column < start_column) {
            return None;
        }
        Some(Self {
            start_line,
            start_column,
            end_line,
            end_column,
        })
    }

    /// Build a span from two positions, `None` if `end` precedes `start`.
    #[must_use]
    pub fn between(start: Position, end: Position) -> Option<Self> {
        Self::new(start.line, start.column, end.line, end.column)
    }

    /// The starting position.
    #[must_use]
    pub fn start(&self) -> Position {
        Position::new(self.start_line, self.start_column)
    }
}

/// Where a handler lives: the result of a resolution.
///
/// `column` is `None` when the strategy does not compute one; hosts should
/// then place the caret at the start of the line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandlerLocation {
    /// Path of the declaring source unit, relative to the workspace root
    pub path: PathBuf,
    /// Line (1-indexed)
    pub line: u32,
    /// Column (1-indexed), if known
    pub column: Option<u32>,
}

impl HandlerLocation {
    /// Format as `path:line` or `path:line:column`.
    #[must_use]
    pub fn display(&self) -> String {
        match self.column {
            Some(column) => format!("{}:{}:{column}", self.path.display(), self.line),
            None => format!("{}:{}", self.path.display(), self.line),
        }
    }
}
