//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use treeforge_core::ArchiveManifest;
use treeforge_core::ArchiveReport;
use treeforge_core::BuildReport;
use treeforge_core::ManifestEntryType;
use treeforge_core::MaterializeReport;
use treeforge_core::TreeNode;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn write_header(&self, message: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(message);
        }
    }

    fn write_materialize_summary(&self, base: &Path, report: &MaterializeReport) {
        self.write_header(&format!("Tree materialized: {}", base.display()));
        let _ = self.term.write_line(&format!(
            "  Directories:      {} created, {} reused",
            Self::format_number(report.directories_created),
            Self::format_number(report.directories_reused)
        ));
        let _ = self.term.write_line(&format!(
            "  Files:            {}",
            Self::format_number(report.files_created)
        ));

        if self.verbose {
            let _ = self.term.write_line(&format!(
                "  Files truncated:  {}",
                Self::format_number(report.files_truncated)
            ));
            let _ = self
                .term
                .write_line(&format!("  Duration:         {:?}", report.duration));
        }
    }

    fn write_archive_summary(&self, report: &ArchiveReport) {
        self.write_header(&format!("Archive created: {}", report.output_path.display()));
        let _ = self.term.write_line(&format!(
            "  Files added:      {}",
            Self::format_number(report.files_added)
        ));
        let _ = self.term.write_line(&format!(
            "  Directories:      {}",
            Self::format_number(report.directories_added)
        ));
        let _ = self.term.write_line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_written)
        ));
        let _ = self.term.write_line(&format!(
            "  Archive size:     {}",
            Self::format_size(report.bytes_compressed)
        ));

        if report.bytes_written > 0 {
            let _ = self.term.write_line(&format!(
                "  Compression:      {:.1}%",
                report.compression_percentage()
            ));
        }

        if report.files_skipped > 0 {
            let _ = self
                .term
                .write_line(&format!("  Entries skipped:  {}", report.files_skipped));
        }

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Duration:         {:?}", report.duration));
        }

        if report.has_warnings() {
            let _ = self.term.write_line("");
            if self.use_colors {
                let _ = self
                    .term
                    .write_line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                let _ = self.term.write_line("Warnings:");
            }
            for warning in &report.warnings {
                let _ = self.term.write_line(&format!("  - {warning}"));
            }
        }
    }

    fn write_outline(&self, node: &TreeNode, indent: usize) {
        let pad = "  ".repeat(indent);
        match node {
            TreeNode::Internal(children) => {
                for (name, child) in children {
                    let line = if self.use_colors {
                        format!("{pad}{}/", style(name).blue().bold())
                    } else {
                        format!("{pad}{name}/")
                    };
                    let _ = self.term.write_line(&line);
                    self.write_outline(child, indent + 1);
                }
            }
            TreeNode::LeafGroup(files) => {
                for file in files {
                    let _ = self.term.write_line(&format!("{pad}{file}"));
                }
            }
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_build_result(&self, report: &BuildReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.write_materialize_summary(&report.base_path, &report.materialize);

        if let Some(archive) = &report.archive {
            let _ = self.term.write_line("");
            self.write_archive_summary(archive);
        }

        Ok(())
    }

    fn format_tree(&self, tree: &TreeNode) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.write_outline(tree, 0);

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "{} directories, {} files",
            Self::format_number(tree.directory_count()),
            Self::format_number(tree.file_count())
        ));

        Ok(())
    }

    fn format_manifest(&self, _archive: &Path, manifest: &ArchiveManifest, long: bool) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in &manifest.entries {
            let suffix = if entry.entry_type == ManifestEntryType::Directory {
                "/"
            } else {
                ""
            };

            if long {
                let mode_str = entry
                    .mode
                    .map_or_else(|| "-".to_string(), |m| format!("{:o}", m & 0o7777));

                let type_char = match entry.entry_type {
                    ManifestEntryType::File => "-",
                    ManifestEntryType::Directory => "d",
                    ManifestEntryType::Symlink => "l",
                };

                let _ = self.term.write_line(&format!(
                    "{}{:<6} {:>10}  {}{suffix}",
                    type_char,
                    mode_str,
                    entry.size,
                    entry.path.display()
                ));
            } else {
                let _ = self
                    .term
                    .write_line(&format!("{}{suffix}", entry.path.display()));
            }
        }

        if long {
            let _ = self.term.write_line("");
            let _ = self.term.write_line(&format!(
                "Total: {} directories, {} files, {}",
                Self::format_number(manifest.directory_count()),
                Self::format_number(manifest.file_count()),
                Self::format_size(manifest.total_size)
            ));
        }

        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("Error:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("Error: {error:?}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("WARNING: {message}"));
        }
    }
}
