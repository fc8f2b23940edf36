//! Declarative directory tree materialization and zip archiving.
//!
//! `treeforge-core` turns a [`TreeNode`] description into real directories
//! and zero-length files, then packs the result into a zip archive next to
//! it.
//!
//! # Examples
//!
//! ```no_run
//! use treeforge_core::ArchiveConfig;
//! use treeforge_core::TreeNode;
//! use treeforge_core::archive;
//! use treeforge_core::materialize;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tree = TreeNode::internal([(
//!     "a",
//!     TreeNode::internal([("b", TreeNode::leaf_group(["x.md", "y.md"]))]),
//! )]);
//!
//! materialize("/tmp/out", &tree)?;
//! let report = archive("/tmp/out", "/tmp/out", &ArchiveConfig::default())?;
//! println!("Archived {} files", report.files_added);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archive;
pub mod error;
pub mod inspection;
pub mod materialize;
pub mod report;
pub mod tree;

// Re-export main API types
pub use api::BuildOptions;
pub use api::BuildProgress;
pub use api::BuildReport;
pub use api::build;
pub use api::build_book;
pub use api::build_with_progress;
pub use archive::ArchiveConfig;
pub use archive::ArchiveReport;
pub use archive::archive;
pub use archive::archive_with_progress;
pub use error::Result;
pub use error::TreeError;
pub use inspection::ArchiveManifest;
pub use inspection::ManifestEntryType;
pub use inspection::list_archive;
pub use materialize::materialize;
pub use materialize::materialize_with_progress;
pub use report::MaterializeReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use tree::TreeNode;
