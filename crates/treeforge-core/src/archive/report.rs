//! Archive creation reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Report of an archive creation run.
///
/// # Examples
///
/// ```
/// use treeforge_core::ArchiveReport;
///
/// let mut report = ArchiveReport::default();
/// report.bytes_written = 1000;
/// report.bytes_compressed = 250;
///
/// assert_eq!(report.compression_ratio(), 4.0);
/// assert_eq!(report.compression_percentage(), 75.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchiveReport {
    /// Path of the written archive.
    pub output_path: PathBuf,

    /// Number of files added to the archive.
    pub files_added: usize,

    /// Number of directory entries added to the archive.
    pub directories_added: usize,

    /// Number of entries skipped (symlinks).
    pub files_skipped: usize,

    /// Total uncompressed bytes of file data.
    pub bytes_written: u64,

    /// Size of the finished archive file.
    pub bytes_compressed: u64,

    /// Duration of the run.
    pub duration: Duration,

    /// Warnings generated while archiving.
    pub warnings: Vec<String>,
}

impl ArchiveReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the compression ratio (uncompressed / compressed).
    ///
    /// Returns 0.0 if either size is 0. A tree of empty placeholder files
    /// always reports 0.0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 || self.bytes_written == 0 {
            return 0.0;
        }
        self.bytes_written as f64 / self.bytes_compressed as f64
    }

    /// Returns the space saved as a percentage of the uncompressed size.
    ///
    /// Returns 0.0 if `bytes_written` is 0 and never goes below 0.0, since
    /// zip headers can make an archive larger than its contents.
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_written == 0 {
            return 0.0;
        }
        if self.bytes_compressed == 0 {
            return 100.0;
        }
        let saved = 1.0 - self.bytes_compressed as f64 / self.bytes_written as f64;
        (saved * 100.0).max(0.0)
    }

    /// Returns the number of entries written to the archive.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_added + self.directories_added
    }
}
