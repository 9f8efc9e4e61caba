use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidFormat,
    InvalidDelimiter,
    IndexTooLarge,
    FileNotFound,
    FileRead,
    Encode,
}

/// 1-based position of the offending line (and column, when known).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub location: Option<Location>,
    #[source]
    source: Option<io::Error>,
}

impl Error {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location: None,
            source: None,
        }
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidFormat, message)
    }

    pub fn invalid_delimiter(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidDelimiter, message)
    }

    pub fn index_too_large(index: usize, max: usize) -> Self {
        Self::new(
            ErrorKind::IndexTooLarge,
            format!("list index {index} exceeds the maximum of {max}"),
        )
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Encode, message)
    }

    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let (kind, message) = match err.kind() {
            io::ErrorKind::NotFound => (
                ErrorKind::FileNotFound,
                format!("file not found: {}", path.display()),
            ),
            _ => (
                ErrorKind::FileRead,
                format!("failed to read {}: {err}", path.display()),
            ),
        };
        Self {
            kind,
            message,
            location: None,
            source: Some(err),
        }
    }

    /// Read failure from a source that has no path, such as a reader.
    pub fn read(err: io::Error) -> Self {
        Self {
            kind: ErrorKind::FileRead,
            message: format!("read failed: {err}"),
            location: None,
            source: Some(err),
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.location = Some(Location { line, column: 1 });
        self.message = format!("line {line}: {}", self.message);
        self
    }

    pub fn is_invalid_format(&self) -> bool {
        self.kind == ErrorKind::InvalidFormat
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::FileNotFound
    }
}
