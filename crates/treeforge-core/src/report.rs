//! Materialization reporting and progress callbacks.

use std::path::Path;
use std::time::Duration;

/// Report of a materialization run.
///
/// # Examples
///
/// ```
/// use treeforge_core::MaterializeReport;
///
/// let mut report = MaterializeReport::new();
/// report.directories_created = 3;
/// report.directories_reused = 1;
/// report.files_created = 5;
/// assert_eq!(report.total_items(), 9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MaterializeReport {
    /// Directories that did not exist before the run.
    pub directories_created: usize,

    /// Directories that already existed and were left in place.
    pub directories_reused: usize,

    /// Leaf files created or truncated to zero length.
    pub files_created: usize,

    /// Leaf files that held content before the run and were truncated.
    pub files_truncated: usize,

    /// Duration of the run.
    pub duration: Duration,
}

impl MaterializeReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of directories and files touched.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.directories_created + self.directories_reused + self.files_created
    }
}

/// Callback trait for progress reporting during materialization and
/// archiving.
///
/// The trait requires `Send` so a callback can be handed to another thread.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use treeforge_core::ProgressCallback;
///
/// struct PrintProgress;
///
/// impl ProgressCallback for PrintProgress {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("[{current}/{total}] {}", path.display());
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _path: &Path) {}
///
///     fn on_complete(&mut self) {
///         println!("done");
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called when starting to process an entry.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the entry being processed
    /// * `total` - Total number of entries
    /// * `current` - Current entry number (1-indexed)
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called when file data is copied into an archive.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called when an entry has been completely processed.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called once when the whole operation is complete.
    fn on_complete(&mut self);
}

/// `ProgressCallback` that ignores every event.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}
