//! Archiving a materialized tree.
//!
//! [`archive`] packs a directory into `<destination>.zip`, mirroring the
//! "base name plus format suffix" convention: the caller names the archive
//! without its extension.

pub mod config;
pub mod report;
pub mod walker;
pub mod zip;

pub use config::ArchiveConfig;
pub use report::ArchiveReport;

use crate::ProgressCallback;
use crate::Result;
use crate::report::NoopProgress;
use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

/// Extension appended to the destination path.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Returns `destination` with `.zip` appended.
///
/// The suffix is appended rather than substituted, so a destination that
/// already contains a dot keeps its full name.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use treeforge_core::archive::archive_output_path;
///
/// assert_eq!(
///     archive_output_path(Path::new("/mnt/data/terraform-book")),
///     Path::new("/mnt/data/terraform-book.zip")
/// );
/// assert_eq!(
///     archive_output_path(Path::new("out/book-v1.2")),
///     Path::new("out/book-v1.2.zip")
/// );
/// ```
#[must_use]
pub fn archive_output_path(destination: &Path) -> PathBuf {
    let mut name = OsString::from(destination.as_os_str());
    name.push(".");
    name.push(ARCHIVE_EXTENSION);
    PathBuf::from(name)
}

/// Archives `source_dir` into `destination + ".zip"`.
///
/// # Examples
///
/// ```no_run
/// use treeforge_core::ArchiveConfig;
/// use treeforge_core::archive;
///
/// let report = archive("/tmp/out", "/tmp/out", &ArchiveConfig::default())?;
/// assert!(report.output_path.ends_with("out.zip"));
/// # Ok::<(), treeforge_core::TreeError>(())
/// ```
///
/// # Errors
///
/// Fails if `source_dir` is missing or not a directory, if the archive
/// cannot be written, or if `config` is invalid.
pub fn archive<P: AsRef<Path>, Q: AsRef<Path>>(
    destination: P,
    source_dir: Q,
    config: &ArchiveConfig,
) -> Result<ArchiveReport> {
    archive_with_progress(destination, source_dir, config, &mut NoopProgress)
}

/// Archives `source_dir` into `destination + ".zip"` with progress reporting.
pub fn archive_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    destination: P,
    source_dir: Q,
    config: &ArchiveConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ArchiveReport> {
    let output = archive_output_path(destination.as_ref());
    zip::create_zip_with_progress(&output, source_dir, config, progress)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_archive_appends_extension() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("out");
        fs::create_dir_all(source.join("a/b")).unwrap();
        fs::write(source.join("a/b/x.md"), "").unwrap();

        let report = archive(&source, &source, &ArchiveConfig::default()).unwrap();

        assert_eq!(report.output_path, temp.path().join("out.zip"));
        assert!(temp.path().join("out.zip").is_file());
        assert_eq!(report.files_added, 1);
        assert_eq!(report.directories_added, 2);
    }

    #[test]
    fn test_archive_output_path_keeps_dots() {
        assert_eq!(
            archive_output_path(Path::new("release.tar")),
            PathBuf::from("release.tar.zip")
        );
    }
}
