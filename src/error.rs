//! Error types for the parse/transform/stringify pipeline

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::format::Format;

/// Malformed source text for the declared format
///
/// Positions are 1-based when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub format: Format,
    pub message: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl SyntaxError {
    pub fn new(format: Format, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Attach a position computed from a byte offset into `source`
    pub fn at_offset(self, source: &str, offset: usize) -> Self {
        let (line, column) = line_col_at(source, offset);
        self.at(line, column)
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(
                f,
                "{} syntax error at line {}, column {}: {}",
                self.format, line, column, self.message
            ),
            (Some(line), None) => write!(
                f,
                "{} syntax error at line {}: {}",
                self.format, line, self.message
            ),
            _ => write!(f, "{} syntax error: {}", self.format, self.message),
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Errors raised by the core pipeline and the session manager
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The value cannot be rendered in the target format (e.g. nested data to CSV)
    #[error("cannot render {format}: {reason}")]
    UnsupportedShape { format: Format, reason: String },

    /// The operation has no meaning for the format (e.g. minifying YAML)
    #[error("{operation} is not supported for {format}")]
    UnsupportedOperation {
        operation: &'static str,
        format: Format,
    },

    /// An edit targets a path that does not resolve to a container
    #[error("invalid path {path}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn shape(format: Format, reason: impl Into<String>) -> Self {
        Self::UnsupportedShape {
            format,
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The syntax error, if this is one
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            Self::Syntax(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Convert a byte offset into a 1-based (line, column) pair
///
/// Columns count characters, not bytes. Offsets past the end clamp to the end.
pub fn line_col_at(source: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    let before = &source[..end];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
