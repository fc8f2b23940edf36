//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use treeforge_core::ArchiveManifest;
use treeforge_core::ArchiveReport;
use treeforge_core::BuildReport;
use treeforge_core::ManifestEntryType;
use treeforge_core::TreeNode;

pub struct JsonFormatter;

#[derive(Serialize)]
struct ArchiveOutput {
    output_path: String,
    files_added: usize,
    directories_added: usize,
    bytes_written: u64,
    bytes_compressed: u64,
    compression_ratio: f64,
    compression_percentage: f64,
    files_skipped: usize,
    duration_ms: u128,
    warnings: Vec<String>,
}

impl From<&ArchiveReport> for ArchiveOutput {
    fn from(report: &ArchiveReport) -> Self {
        Self {
            output_path: report.output_path.display().to_string(),
            files_added: report.files_added,
            directories_added: report.directories_added,
            bytes_written: report.bytes_written,
            bytes_compressed: report.bytes_compressed,
            compression_ratio: report.compression_ratio(),
            compression_percentage: report.compression_percentage(),
            files_skipped: report.files_skipped,
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }

    /// Mirrors the description shape: mappings become objects, leaf groups
    /// become arrays of file names.
    fn tree_value(node: &TreeNode) -> Value {
        match node {
            TreeNode::Internal(children) => Value::Object(
                children
                    .iter()
                    .map(|(name, child)| (name.clone(), Self::tree_value(child)))
                    .collect(),
            ),
            TreeNode::LeafGroup(files) => {
                Value::Array(files.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_build_result(&self, report: &BuildReport) -> Result<()> {
        #[derive(Serialize)]
        struct BuildOutput {
            base_path: String,
            directories_created: usize,
            directories_reused: usize,
            files_created: usize,
            files_truncated: usize,
            materialize_ms: u128,
            archive: Option<ArchiveOutput>,
        }

        let materialize = &report.materialize;
        let data = BuildOutput {
            base_path: report.base_path.display().to_string(),
            directories_created: materialize.directories_created,
            directories_reused: materialize.directories_reused,
            files_created: materialize.files_created,
            files_truncated: materialize.files_truncated,
            materialize_ms: materialize.duration.as_millis(),
            archive: report.archive.as_ref().map(ArchiveOutput::from),
        };

        Self::output(&JsonOutput::success("build", data))
    }

    fn format_tree(&self, tree: &TreeNode) -> Result<()> {
        #[derive(Serialize)]
        struct TreeOutput {
            directories: usize,
            files: usize,
            depth: usize,
            tree: Value,
        }

        let data = TreeOutput {
            directories: tree.directory_count(),
            files: tree.file_count(),
            depth: tree.depth(),
            tree: Self::tree_value(tree),
        };

        Self::output(&JsonOutput::success("show", data))
    }

    fn format_manifest(&self, archive: &Path, manifest: &ArchiveManifest, _long: bool) -> Result<()> {
        #[derive(Serialize)]
        struct EntryOutput {
            path: String,
            #[serde(rename = "type")]
            entry_type: &'static str,
            size: u64,
            compressed_size: u64,
            mode: Option<u32>,
        }

        #[derive(Serialize)]
        struct ManifestOutput {
            archive: String,
            total_entries: usize,
            total_size: u64,
            directories: usize,
            files: usize,
            entries: Vec<EntryOutput>,
        }

        let entries = manifest
            .entries
            .iter()
            .map(|entry| EntryOutput {
                path: entry.path.display().to_string(),
                entry_type: match entry.entry_type {
                    ManifestEntryType::File => "file",
                    ManifestEntryType::Directory => "directory",
                    ManifestEntryType::Symlink => "symlink",
                },
                size: entry.size,
                compressed_size: entry.compressed_size,
                mode: entry.mode,
            })
            .collect();

        let data = ManifestOutput {
            archive: archive.display().to_string(),
            total_entries: manifest.total_entries,
            total_size: manifest.total_size,
            directories: manifest.directory_count(),
            files: manifest.file_count(),
            entries,
        };

        Self::output(&JsonOutput::success("list", data))
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error(operation, format!("{error:#}"));
        let _ = Self::output(&output);
        let _ = writeln!(io::stderr(), "Error: {error:?}");
    }

    /// Warnings go to stderr so stdout stays a single JSON document.
    fn format_warning(&self, message: &str) {
        let _ = writeln!(io::stderr(), "WARNING: {message}");
    }
}
