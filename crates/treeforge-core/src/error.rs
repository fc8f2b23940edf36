//! Error types for tree materialization and archiving.

use std::io;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `TreeError`.
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors that can occur while materializing or archiving a tree.
///
/// Every variant originates in the filesystem or the zip writer. Nothing is
/// retried; the first failure aborts the operation and leaves whatever was
/// already written on disk.
#[derive(Error, Debug)]
pub enum TreeError {
    /// A directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying filesystem error.
        source: io::Error,
    },

    /// A leaf file could not be created or truncated.
    #[error("failed to create file {path}: {source}")]
    CreateFile {
        /// File that could not be created.
        path: PathBuf,
        /// Underlying filesystem error.
        source: io::Error,
    },

    /// Archive source directory does not exist.
    #[error("source not found: {path}")]
    SourceNotFound {
        /// The missing source path.
        path: PathBuf,
    },

    /// Archive source exists but is not a directory.
    #[error("source is not a directory: {path}")]
    SourceNotDirectory {
        /// The offending source path.
        path: PathBuf,
    },

    /// Directory traversal failed while collecting archive entries.
    #[error("cannot walk {path}: {reason}")]
    Walk {
        /// Path being visited when traversal failed.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// The zip writer rejected an entry or failed to finish the archive.
    #[error("failed to write archive {path}: {reason}")]
    Archive {
        /// Archive being written.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// An archive could not be read back.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Compression level outside the accepted range.
    #[error("invalid compression level {level}, must be 0-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl TreeError {
    /// Returns the filesystem path involved in the failure, if known.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use std::path::PathBuf;
    /// use treeforge_core::TreeError;
    ///
    /// let err = TreeError::SourceNotFound {
    ///     path: PathBuf::from("/missing"),
    /// };
    /// assert_eq!(err.path(), Some(Path::new("/missing")));
    ///
    /// let err = TreeError::InvalidCompressionLevel { level: 12 };
    /// assert_eq!(err.path(), None);
    /// ```
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::CreateDir { path, .. }
            | Self::CreateFile { path, .. }
            | Self::SourceNotFound { path }
            | Self::SourceNotDirectory { path }
            | Self::Walk { path, .. }
            | Self::Archive { path, .. } => Some(path),
            Self::InvalidArchive(_) | Self::InvalidCompressionLevel { .. } | Self::Io(_) => None,
        }
    }

    /// Returns the kind of the underlying I/O error, if there is one.
    ///
    /// A missing archive source reports [`io::ErrorKind::NotFound`] even
    /// though it is detected before any I/O call fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    /// use std::path::PathBuf;
    /// use treeforge_core::TreeError;
    ///
    /// let err = TreeError::CreateDir {
    ///     path: PathBuf::from("/root/locked"),
    ///     source: io::Error::from(io::ErrorKind::PermissionDenied),
    /// };
    /// assert_eq!(err.io_kind(), Some(io::ErrorKind::PermissionDenied));
    /// ```
    #[must_use]
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::CreateDir { source, .. } | Self::CreateFile { source, .. } | Self::Io(source) => {
                Some(source.kind())
            }
            Self::SourceNotFound { .. } => Some(io::ErrorKind::NotFound),
            _ => None,
        }
    }

    /// Returns `true` if the failure came from the filesystem refusing access.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        self.io_kind() == Some(io::ErrorKind::PermissionDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dir_display() {
        let err = TreeError::CreateDir {
            path: PathBuf::from("book/tutorials"),
            source: io::Error::from(io::ErrorKind::AlreadyExists),
        };
        let display = err.to_string();
        assert!(display.contains("failed to create directory"));
        assert!(display.contains("book/tutorials"));
    }

    #[test]
    fn test_create_file_display() {
        let err = TreeError::CreateFile {
            path: PathBuf::from("book/init.md"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("book/init.md"));
        assert!(err.is_permission_denied());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: TreeError = io_err.into();
        assert!(matches!(err, TreeError::Io(_)));
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
        assert_eq!(err.path(), None);
    }

    #[test]
    fn test_source_errors_carry_path() {
        let err = TreeError::SourceNotFound {
            path: PathBuf::from("/nowhere"),
        };
        assert_eq!(err.path(), Some(Path::new("/nowhere")));
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));

        let err = TreeError::SourceNotDirectory {
            path: PathBuf::from("/etc/hosts"),
        };
        assert!(err.to_string().contains("not a directory"));
        assert_eq!(err.io_kind(), None);
    }

    #[test]
    fn test_invalid_compression_level_display() {
        let err = TreeError::InvalidCompressionLevel { level: 42 };
        assert_eq!(
            err.to_string(),
            "invalid compression level 42, must be 0-9"
        );
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let err = TreeError::CreateFile {
            path: PathBuf::from("x.md"),
            source: io::Error::other("disk full"),
        };
        let source = err.source();
        assert!(source.is_some());
        assert!(source.map(ToString::to_string).unwrap_or_default().contains("disk full"));
    }
}
