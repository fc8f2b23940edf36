//! Tree materialization.
//!
//! Walks a [`TreeNode`] and creates the directories and zero-length files it
//! describes below a base path.
//!
//! Two open modes are part of the contract:
//!
//! - directories are created recursively and an existing directory is
//!   accepted (create if absent, never exclusive);
//! - leaf files are opened for writing with create and truncate, so a
//!   second run leaves them empty again (never append).
//!
//! A failure stops the walk immediately. Entries created before the failure
//! stay on disk.

use crate::MaterializeReport;
use crate::ProgressCallback;
use crate::Result;
use crate::TreeError;
use crate::report::NoopProgress;
use crate::tree::TreeNode;
use std::fs;
use std::fs::DirBuilder;
use std::fs::OpenOptions;
use std::path::Path;
use std::time::Instant;
use tracing::debug;
use tracing::info;

/// Materializes `node` below `base`.
///
/// Every mapping key becomes a directory at `base/<ancestors>/<key>`, every
/// leaf file name a zero-length file in the directory holding its group.
/// A leaf group passed as the root node is written directly into `base`,
/// which must then already exist.
///
/// # Examples
///
/// ```no_run
/// use treeforge_core::TreeNode;
/// use treeforge_core::materialize;
///
/// let tree = TreeNode::internal([("docs", TreeNode::leaf_group(["intro.md"]))]);
/// let report = materialize("/tmp/out", &tree)?;
/// assert_eq!(report.files_created, 1);
/// # Ok::<(), treeforge_core::TreeError>(())
/// ```
///
/// # Errors
///
/// Returns [`TreeError::CreateDir`] or [`TreeError::CreateFile`] naming the
/// first path that could not be created, including a path segment that
/// already exists as a regular file where a directory is expected.
pub fn materialize<P: AsRef<Path>>(base: P, node: &TreeNode) -> Result<MaterializeReport> {
    materialize_with_progress(base, node, &mut NoopProgress)
}

/// Materializes `node` below `base`, reporting each entry to `progress`.
///
/// `progress` sees one `on_entry_start`/`on_entry_complete` pair per
/// directory and per file, then a single `on_complete`.
pub fn materialize_with_progress<P: AsRef<Path>>(
    base: P,
    node: &TreeNode,
    progress: &mut dyn ProgressCallback,
) -> Result<MaterializeReport> {
    let base = base.as_ref();
    let start = Instant::now();

    let mut materializer = Materializer {
        progress,
        report: MaterializeReport::default(),
        total: node.entry_count(),
        current: 0,
    };
    materializer.visit(base, node)?;

    let Materializer {
        progress,
        mut report,
        ..
    } = materializer;
    report.duration = start.elapsed();
    progress.on_complete();

    info!(
        base = %base.display(),
        directories = report.directories_created + report.directories_reused,
        files = report.files_created,
        truncated = report.files_truncated,
        "materialized tree"
    );

    Ok(report)
}

/// Open mode for directories: create missing ancestors, accept an existing
/// directory, reject anything else already at the path.
fn directory_builder() -> DirBuilder {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    builder
}

/// Open mode for leaf files: create or truncate, never append.
fn leaf_file_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    options
}

struct Materializer<'a> {
    progress: &'a mut dyn ProgressCallback,
    report: MaterializeReport,
    total: usize,
    current: usize,
}

impl Materializer<'_> {
    fn visit(&mut self, path: &Path, node: &TreeNode) -> Result<()> {
        match node {
            TreeNode::Internal(children) => {
                for (name, child) in children {
                    let child_path = path.join(name);
                    self.ensure_directory(&child_path)?;
                    self.visit(&child_path, child)?;
                }
            }
            TreeNode::LeafGroup(files) => {
                for file in files {
                    self.create_leaf(&path.join(file))?;
                }
            }
        }
        Ok(())
    }

    fn ensure_directory(&mut self, path: &Path) -> Result<()> {
        self.start_entry(path);

        let existed = path.is_dir();
        directory_builder()
            .create(path)
            .map_err(|source| TreeError::CreateDir {
                path: path.to_path_buf(),
                source,
            })?;

        if existed {
            self.report.directories_reused += 1;
            debug!(path = %path.display(), "directory already present");
        } else {
            self.report.directories_created += 1;
            debug!(path = %path.display(), "created directory");
        }

        self.progress.on_entry_complete(path);
        Ok(())
    }

    fn create_leaf(&mut self, path: &Path) -> Result<()> {
        self.start_entry(path);

        let had_content = fs::symlink_metadata(path).is_ok_and(|m| m.is_file() && m.len() > 0);
        leaf_file_options()
            .open(path)
            .map_err(|source| TreeError::CreateFile {
                path: path.to_path_buf(),
                source,
            })?;

        self.report.files_created += 1;
        if had_content {
            self.report.files_truncated += 1;
            debug!(path = %path.display(), "truncated existing file");
        } else {
            debug!(path = %path.display(), "created file");
        }

        self.progress.on_entry_complete(path);
        Ok(())
    }

    fn start_entry(&mut self, path: &Path) {
        self.current += 1;
        self.progress.on_entry_start(path, self.total, self.current);
    }
}
