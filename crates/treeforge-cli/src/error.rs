//! Error conversion utilities for CLI.
//!
//! Converts treeforge-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::io;
use std::path::Path;
use treeforge_core::TreeError;

/// Converts a `TreeError` raised while building under `root`.
pub fn convert_build_error(err: TreeError, root: &Path) -> anyhow::Error {
    if err.is_permission_denied() {
        let target = err.path().unwrap_or(root);
        return anyhow!(
            "{err}\n\
             HINT: Check that you have write access to '{}' or pass --root to build elsewhere.",
            target.display()
        );
    }

    match err {
        TreeError::CreateDir { ref path, ref source }
            if source.kind() == io::ErrorKind::AlreadyExists
                || source.kind() == io::ErrorKind::NotADirectory =>
        {
            anyhow!(
                "Cannot create directory '{}': a file is in the way ({source})\n\
                 HINT: Remove or rename the file at or above this path and run the build again.",
                path.display()
            )
        }
        TreeError::InvalidCompressionLevel { level } => {
            anyhow!(
                "Invalid compression level {level}\n\
                 HINT: Use a level from 0 (stored) to 9 (smallest)."
            )
        }
        _ => anyhow::Error::from(err).context(format!("Build under '{}' failed", root.display())),
    }
}

/// Converts a `TreeError` raised while reading `archive` back.
pub fn convert_archive_error(err: TreeError, archive: &Path) -> anyhow::Error {
    match err {
        TreeError::Io(ref io_err) if io_err.kind() == io::ErrorKind::NotFound => {
            anyhow!(
                "Archive not found: {}\n\
                 HINT: Run `treeforge build` to produce it.",
                archive.display()
            )
        }
        TreeError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {reason}\n\
                 HINT: The archive may be corrupted or not a zip file.",
                archive.display()
            )
        }
        _ => anyhow::Error::from(err).context(format!("Error reading archive '{}'", archive.display())),
    }
}

/// Adds build context to a core result.
pub fn add_build_context<T>(result: Result<T, TreeError>, root: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_build_error(e, root))
}

/// Adds archive context to a core result.
pub fn add_archive_context<T>(result: Result<T, TreeError>, archive: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, archive))
}
