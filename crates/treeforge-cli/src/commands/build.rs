//! Build command implementation

use crate::cli::BuildArgs;
use crate::error::add_build_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use anyhow::bail;
use std::path::Component;
use std::path::Path;
use tracing::debug;
use treeforge_core::ArchiveConfig;
use treeforge_core::BuildOptions;
use treeforge_core::BuildProgress;
use treeforge_core::build;
use treeforge_core::build_with_progress;
use treeforge_core::tree::book::terraform_book;

pub fn execute(args: &BuildArgs, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    validate_name(&args.name)?;

    let options = BuildOptions {
        archive: ArchiveConfig {
            compression_level: args.compression_level,
            ..ArchiveConfig::default()
        },
        skip_archive: args.no_archive,
    };
    let tree = terraform_book();
    debug!(
        root = %args.root.display(),
        name = %args.name,
        level = ?args.compression_level,
        archive = !args.no_archive,
        "starting build"
    );

    let result = if show_progress && CliProgress::should_show() {
        let mut materialize = CliProgress::new("Materializing");
        let mut archive = CliProgress::new("Archiving");
        let mut progress = BuildProgress {
            materialize: &mut materialize,
            archive: &mut archive,
        };
        build_with_progress(&args.root, &args.name, &tree, &options, &mut progress)
    } else {
        build(&args.root, &args.name, &tree, &options)
    };
    let report = add_build_context(result, &args.root)?;

    if report.materialize.files_truncated > 0 {
        formatter.format_warning(&format!(
            "{} existing files were truncated to zero length",
            report.materialize.files_truncated
        ));
    }

    formatter.format_build_result(&report)
}

/// The name becomes both a directory and an archive stem under the root,
/// so it must be exactly one plain path component.
fn validate_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => bail!(
            "Invalid build name '{name}'\n\
             HINT: The name must be a single directory name without separators."
        ),
    }
}
