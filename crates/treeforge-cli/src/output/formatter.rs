//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use treeforge_core::ArchiveManifest;
use treeforge_core::BuildReport;
use treeforge_core::TreeNode;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the result of a build
    fn format_build_result(&self, report: &BuildReport) -> Result<()>;

    /// Format a tree description as an outline
    fn format_tree(&self, tree: &TreeNode) -> Result<()>;

    /// Format the entries of an archive
    fn format_manifest(&self, archive: &Path, manifest: &ArchiveManifest, long: bool)
    -> Result<()>;

    /// Format error message for a failed `operation`
    fn format_error(&self, operation: &str, error: &anyhow::Error);

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
