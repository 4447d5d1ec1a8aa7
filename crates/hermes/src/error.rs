//! Error types for Hermes operations.
//!
//! Errors are split the same way indexing failures are split in practice:
//!
//! - **`Error`**: infrastructure failures that stop an operation (I/O on the
//!   workspace root, a broken grammar, invalid configuration)
//! - **`LoadError`**: per-file problems collected while loading a workspace
//!
//! Nothing the resolver finds (or fails to find) in the sources is an error.
//! Unsupported cursor positions, missing modules, nested generic arguments and
//! empty results all degrade to an empty or absent [`Resolution`](crate::Resolution).

use std::path::PathBuf;
use thiserror::Error;

/// Result type for Hermes operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for Hermes operations.
#[derive(Debug, Error)]
pub enum Error {
    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tree-sitter parsing infrastructure failed
    #[error("parser error: {0}")]
    Parser(String),

    /// Invalid configuration or arguments
    #[error("configuration error: {0}")]
    Config(String),

    /// A file was named that is not part of any loaded module
    #[error("no source unit for {0}")]
    UnknownUnit(PathBuf),
}

/// Error encountered while loading a specific source file.
///
/// These errors are collected while the workspace loads but don't halt it.
#[derive(Debug, Clone)]
pub struct LoadError {
    /// Path to the file that failed
    pub path: PathBuf,
    /// Category of the error
    pub kind: LoadErrorKind,
    /// Human-readable error message
    pub message: String,
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            self.path.display(),
            self.message,
            self.kind
        )
    }
}

impl std::error::Error for LoadError {}

/// Categorization of load errors.
///
/// Input problems are issues with the source files the user can fix; internal
/// problems come from the environment Hermes runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    // === Input Problems ===
    /// Tree-sitter produced no syntax tree for the file
    ParseFailed,

    /// File content is not valid UTF-8
    EncodingError,

    // === Internal Problems ===
    /// Could not read the file or directory from disk
    IoError,
}

impl std::fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParseFailed => write!(f, "parse failed"),
            Self::EncodingError => write!(f, "encoding error"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl LoadErrorKind {
    /// Returns `true` if this is a problem with the source file itself.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::ParseFailed | Self::EncodingError)
    }

    /// Returns `true` if this is a problem with the environment.
    #[must_use]
    pub fn is_internal_error(&self) -> bool {
        matches!(self, Self::IoError)
    }
}

impl LoadError {
    /// Create a new load error.
    #[must_use]
    pub fn new(path: PathBuf, kind: LoadErrorKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
        }
    }

    /// Create a parse error for a file.
    #[must_use]
    pub fn parse_failed(path: PathBuf) -> Self {
        Self::new(path, LoadErrorKind::ParseFailed, "no syntax tree produced")
    }

    /// Create an encoding error for a file.
    #[must_use]
    pub fn encoding_error(path: PathBuf) -> Self {
        Self::new(path, LoadErrorKind::EncodingError, "file is not valid UTF-8")
    }

    /// Create an I/O error for a file.
    #[must_use]
    pub fn io_error(path: PathBuf, error: &std::io::Error) -> Self {
        Self::new(path, LoadErrorKind::IoError, error.to_string())
    }
}
