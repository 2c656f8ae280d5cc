//! Error types and handling infrastructure for directory listing and JSON merging

use anyhow::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Fatal error conditions for listing and merge runs
#[derive(Debug, thiserror::Error)]
pub enum MergeErrorKind {
    #[error("Path not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },
}

impl MergeErrorKind {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    pub fn io(message: String, path: Option<PathBuf>) -> Self {
        Self::Io { message, path }
    }

    pub fn configuration(message: String) -> Self {
        Self::Configuration { message }
    }
}

/// Main error type for listing and merge operations
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error(transparent)]
    ParseError(#[from] ParseError),

    #[error("{kind}")]
    Operation {
        kind: MergeErrorKind,
        #[source]
        source: Option<io::Error>,
    },

    #[error(transparent)]
    Other(#[from] Error),
}

impl MergeError {
    pub fn operation(kind: MergeErrorKind) -> Self {
        Self::Operation { kind, source: None }
    }

    pub fn operation_with_source(kind: MergeErrorKind, source: io::Error) -> Self {
        Self::Operation {
            kind,
            source: Some(source),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::operation(MergeErrorKind::configuration(message.into()))
    }

    /// Classify an IO failure on a path we were asked to read.
    pub fn from_io(error: io::Error, path: &Path) -> Self {
        let kind = match error.kind() {
            io::ErrorKind::NotFound => MergeErrorKind::not_found(path),
            io::ErrorKind::PermissionDenied => MergeErrorKind::permission_denied(path),
            _ => MergeErrorKind::io(
                format!("{}: {}", path.display(), error),
                Some(path.to_path_buf()),
            ),
        };
        Self::operation_with_source(kind, error)
    }

    /// Failures while producing output are always reported as IO errors.
    pub fn write_failed(error: io::Error, path: &Path) -> Self {
        let kind = MergeErrorKind::io(
            format!("failed to write {}: {}", path.display(), error),
            Some(path.to_path_buf()),
        );
        Self::operation_with_source(kind, error)
    }

    pub fn kind(&self) -> Option<&MergeErrorKind> {
        match self {
            Self::Operation { kind, .. } => Some(kind),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), Some(MergeErrorKind::NotFound { .. }))
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self.kind(), Some(MergeErrorKind::PermissionDenied { .. }))
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::ParseError(err) => match &err.file {
                Some(file) => format!("{}: JSON parse error: {}", file.display(), err),
                None => format!("JSON parse error: {}", err),
            },
            Self::Operation { kind, .. } => match kind {
                MergeErrorKind::NotFound { path } => {
                    format!("No such file or directory: {}", path.display())
                }
                MergeErrorKind::PermissionDenied { path } => {
                    format!("Permission denied: {}", path.display())
                }
                MergeErrorKind::NotADirectory { path } => {
                    format!("Expected a directory: {}", path.display())
                }
                _ => kind.to_string(),
            },
            Self::Other(err) => format!("Unexpected error: {:#}", err),
        }
    }
}

impl From<walkdir::Error> for MergeError {
    fn from(error: walkdir::Error) -> Self {
        let path = error.path().map(Path::to_path_buf);

        if let Some(ancestor) = error.loop_ancestor() {
            let message = format!(
                "filesystem loop: {} points back to {}",
                path.as_deref().unwrap_or(ancestor).display(),
                ancestor.display()
            );
            return Self::operation(MergeErrorKind::io(message, path));
        }

        match path {
            Some(path) => Self::from_io(error.into(), &path),
            None => {
                let message = error.to_string();
                Self::operation_with_source(MergeErrorKind::io(message, None), error.into())
            }
        }
    }
}

/// JSON parsing errors, scoped to a single source
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub location: Option<(usize, usize)>,
    pub file: Option<PathBuf>,
}

impl ParseError {
    pub fn new(message: String, location: Option<(usize, usize)>) -> Self {
        Self {
            message,
            location,
            file: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some((line, col)) = self.location {
            write!(f, " at line {}, column {}", line, col)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Result type for merge operations
pub type MergeResult<T> = Result<T, MergeError>;

/// Result type for directory listing
pub type ListingResult<T> = Result<T, MergeError>;

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
