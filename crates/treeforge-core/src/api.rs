//! High-level build pipeline: materialize, then archive.

use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveConfig;
use crate::ArchiveReport;
use crate::MaterializeReport;
use crate::ProgressCallback;
use crate::Result;
use crate::archive::archive_with_progress;
use crate::materialize::materialize_with_progress;
use crate::report::NoopProgress;
use crate::tree::TreeNode;
use crate::tree::book::BOOK_NAME;
use crate::tree::book::terraform_book;
use tracing::info;

/// Outcome of a full build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Directory the tree was materialized into.
    pub base_path: PathBuf,

    /// Materialization statistics.
    pub materialize: MaterializeReport,

    /// Archive statistics, `None` when archiving was skipped.
    pub archive: Option<ArchiveReport>,
}

impl BuildReport {
    /// Path of the written archive, if one was written.
    #[must_use]
    pub fn archive_path(&self) -> Option<&Path> {
        self.archive.as_ref().map(|report| report.output_path.as_path())
    }
}

/// Progress callbacks for the two build phases.
pub struct BuildProgress<'a> {
    /// Receives materialization events.
    pub materialize: &'a mut dyn ProgressCallback,
    /// Receives archiving events.
    pub archive: &'a mut dyn ProgressCallback,
}

/// Options for [`build`].
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Archive settings.
    pub archive: ArchiveConfig,

    /// Stop after materialization.
    pub skip_archive: bool,
}

/// Materializes `tree` at `root/name`, then archives it to `root/name.zip`.
///
/// The two steps run strictly in sequence. A materialization failure
/// prevents archiving; neither step cleans up after a failure.
///
/// # Examples
///
/// ```no_run
/// use treeforge_core::BuildOptions;
/// use treeforge_core::TreeNode;
/// use treeforge_core::build;
///
/// let tree = TreeNode::internal([("a", TreeNode::leaf_group(["x.md"]))]);
/// let report = build("/tmp", "out", &tree, &BuildOptions::default())?;
/// assert!(report.archive_path().is_some());
/// # Ok::<(), treeforge_core::TreeError>(())
/// ```
///
/// # Errors
///
/// Returns the first filesystem or archive error encountered.
pub fn build<P: AsRef<Path>>(
    root: P,
    name: &str,
    tree: &TreeNode,
    options: &BuildOptions,
) -> Result<BuildReport> {
    let mut progress = BuildProgress {
        materialize: &mut NoopProgress,
        archive: &mut NoopProgress,
    };
    build_with_progress(root, name, tree, options, &mut progress)
}

/// Same as [`build`], reporting progress for each phase.
pub fn build_with_progress<P: AsRef<Path>>(
    root: P,
    name: &str,
    tree: &TreeNode,
    options: &BuildOptions,
    progress: &mut BuildProgress<'_>,
) -> Result<BuildReport> {
    options.archive.validate()?;

    let base_path = root.as_ref().join(name);
    info!(base = %base_path.display(), "building tree");

    let materialize = materialize_with_progress(&base_path, tree, progress.materialize)?;

    let archive = if options.skip_archive {
        None
    } else {
        Some(archive_with_progress(
            &base_path,
            &base_path,
            &options.archive,
            progress.archive,
        )?)
    };

    Ok(BuildReport {
        base_path,
        materialize,
        archive,
    })
}

/// Builds the compiled-in terraform book under `root`.
///
/// Produces `root/terraform-book/terraform-book/tutorials/...` and
/// `root/terraform-book.zip`.
pub fn build_book<P: AsRef<Path>>(root: P, options: &BuildOptions) -> Result<BuildReport> {
    build(root, BOOK_NAME, &terraform_book(), options)
}
