//! ZIP archive creation.
//!
//! Every entry gets the DOS epoch as its modification time and entries are
//! written in walk order, so archiving the same tree twice produces
//! identical bytes.

use crate::ProgressCallback;
use crate::Result;
use crate::TreeError;
use crate::archive::config::ArchiveConfig;
use crate::archive::report::ArchiveReport;
use crate::archive::walker::EntryType;
use crate::archive::walker::WalkedEntry;
use crate::archive::walker::collect_entries;
use crate::report::NoopProgress;
use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::debug;
use tracing::info;
use tracing::warn;
use zip::CompressionMethod;
use zip::DateTime;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Creates a ZIP archive at `output` holding everything below `source`.
///
/// Entry paths are relative to `source`; `source` itself is not an entry.
/// Directories get explicit entries so empty ones survive extraction. An
/// existing file at `output` is overwritten.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use treeforge_core::ArchiveConfig;
/// use treeforge_core::archive::zip::create_zip;
///
/// let report = create_zip(
///     Path::new("/tmp/book.zip"),
///     Path::new("/tmp/book"),
///     &ArchiveConfig::default(),
/// )?;
/// println!("Added {} files", report.files_added);
/// # Ok::<(), treeforge_core::TreeError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - `source` does not exist or is not a directory
/// - `output` cannot be created
/// - Walking `source` or writing the archive fails
pub fn create_zip<P: AsRef<Path>, Q: AsRef<Path>>(
    output: P,
    source: Q,
    config: &ArchiveConfig,
) -> Result<ArchiveReport> {
    create_zip_with_progress(output, source, config, &mut NoopProgress)
}

/// Creates a ZIP archive with progress reporting.
///
/// `progress` sees one `on_entry_start`/`on_entry_complete` pair per entry,
/// `on_bytes_written` for each chunk of file data, then `on_complete`.
pub fn create_zip_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    output: P,
    source: Q,
    config: &ArchiveConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ArchiveReport> {
    let output = output.as_ref();
    let source = source.as_ref();
    let start = Instant::now();

    config.validate()?;

    if !source.exists() {
        return Err(TreeError::SourceNotFound {
            path: source.to_path_buf(),
        });
    }
    if !source.is_dir() {
        return Err(TreeError::SourceNotDirectory {
            path: source.to_path_buf(),
        });
    }

    // Walk before creating the output so an archive placed inside the
    // source never lists itself.
    let entries = collect_entries(source)?;

    let file = File::create(output).map_err(|source| TreeError::CreateFile {
        path: output.to_path_buf(),
        source,
    })?;

    let mut report = ArchiveReport {
        output_path: output.to_path_buf(),
        ..ArchiveReport::default()
    };

    let file = write_entries(file, output, &entries, config, &mut report, progress)?;
    report.bytes_compressed = file.metadata()?.len();
    report.duration = start.elapsed();

    progress.on_complete();

    info!(
        output = %output.display(),
        files = report.files_added,
        directories = report.directories_added,
        bytes = report.bytes_compressed,
        "archive written"
    );

    Ok(report)
}

/// Writes `entries` into a new ZIP stream and returns the finished writer.
fn write_entries<W: Write + Seek>(
    writer: W,
    output: &Path,
    entries: &[WalkedEntry],
    config: &ArchiveConfig,
    report: &mut ArchiveReport,
    progress: &mut dyn ProgressCallback,
) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options = entry_options(config);
    let total = entries.len();
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];

    for (idx, entry) in entries.iter().enumerate() {
        progress.on_entry_start(&entry.archive_path, total, idx + 1);

        match &entry.entry_type {
            EntryType::File => {
                add_file(
                    &mut zip,
                    output,
                    entry,
                    config,
                    &options,
                    report,
                    progress,
                    &mut buffer,
                )?;
            }
            EntryType::Directory => {
                let dir_name = format!("{}/", normalize_zip_path(&entry.archive_path)?);
                zip.add_directory(dir_name.as_str(), options)
                    .map_err(|e| archive_error(output, format!("failed to add directory: {e}")))?;
                report.directories_added += 1;
                debug!(entry = %dir_name, "added directory");
            }
            EntryType::Symlink { target } => {
                report.files_skipped += 1;
                report.add_warning(format!("Skipped symlink: {}", entry.path.display()));
                warn!(
                    path = %entry.path.display(),
                    target = %target.display(),
                    "skipping symlink"
                );
            }
        }

        progress.on_entry_complete(&entry.archive_path);
    }

    zip.finish()
        .map_err(|e| archive_error(output, format!("failed to finish ZIP archive: {e}")))
}

/// Adds one regular file, copying its data through the shared buffer.
#[allow(clippy::too_many_arguments)]
fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    output: &Path,
    entry: &WalkedEntry,
    config: &ArchiveConfig,
    options: &SimpleFileOptions,
    report: &mut ArchiveReport,
    progress: &mut dyn ProgressCallback,
    buffer: &mut [u8],
) -> Result<()> {
    let mut file = File::open(&entry.path)?;

    let file_options = if config.preserve_permissions {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = file.metadata()?.permissions().mode();
            options.unix_permissions(mode)
        }
        #[cfg(not(unix))]
        {
            *options
        }
    } else {
        *options
    };

    let name = normalize_zip_path(&entry.archive_path)?;
    zip.start_file(name.as_str(), file_options)
        .map_err(|e| archive_error(output, format!("failed to start file in ZIP: {e}")))?;

    let mut bytes_written = 0u64;
    loop {
        let bytes_read = file.read(buffer)?;
        if bytes_read == 0 {
            break;
        }
        zip.write_all(&buffer[..bytes_read])?;
        bytes_written += bytes_read as u64;
        progress.on_bytes_written(bytes_read as u64);
    }

    report.files_added += 1;
    report.bytes_written += bytes_written;
    debug!(entry = %name, bytes = bytes_written, "added file");

    Ok(())
}

fn entry_options(config: &ArchiveConfig) -> SimpleFileOptions {
    let options = SimpleFileOptions::default().last_modified_time(DateTime::default());
    if config.is_stored() {
        options.compression_method(CompressionMethod::Stored)
    } else {
        options
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(config.effective_level())))
    }
}

fn archive_error(output: &Path, reason: String) -> TreeError {
    TreeError::Archive {
        path: output.to_path_buf(),
        reason,
    }
}

/// Converts a relative path to ZIP form (UTF-8, `/` separators).
fn normalize_zip_path(path: &Path) -> Result<String> {
    let path_str = path.to_str().ok_or_else(|| {
        TreeError::Io(std::io::Error::other(format!(
            "path is not valid UTF-8: {}",
            path.display()
        )))
    })?;

    #[cfg(windows)]
    let normalized = path_str.replace('\\', "/");

    #[cfg(not(windows))]
    let normalized = path_str.to_string();

    Ok(normalized)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn build_source(temp: &TempDir) -> std::path::PathBuf {
        let source = temp.path().join("book");
        fs::create_dir_all(source.join("a/b")).unwrap();
        fs::create_dir_all(source.join("empty")).unwrap();
        fs::write(source.join("a/b/x.md"), "").unwrap();
        fs::write(source.join("a/b/y.md"), "").unwrap();
        source
    }

    fn entry_names(archive: &Path) -> BTreeSet<String> {
        let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
        (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_create_zip_includes_empty_files_and_directories() {
        let temp = TempDir::new().unwrap();
        let source = build_source(&temp);
        let output = temp.path().join("book.zip");

        let report = create_zip(&output, &source, &ArchiveConfig::default()).unwrap();

        assert_eq!(report.files_added, 2);
        assert_eq!(report.directories_added, 3);
        assert_eq!(report.bytes_written, 0);
        assert_eq!(report.output_path, output);
        assert_eq!(report.bytes_compressed, fs::metadata(&output).unwrap().len());

        let names = entry_names(&output);
        let expected: BTreeSet<String> = ["a/", "a/b/", "a/b/x.md", "a/b/y.md", "empty/"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_create_zip_magic_bytes() {
        let temp = TempDir::new().unwrap();
        let source = build_source(&temp);
        let output = temp.path().join("book.zip");

        create_zip(&output, &source, &ArchiveConfig::default()).unwrap();

        let data = fs::read(&output).unwrap();
        assert_eq!(&data[0..4], b"PK\x03\x04");
    }

    #[test]
    fn test_create_zip_is_deterministic() {
        let temp = TempDir::new().unwrap();
        let source = build_source(&temp);
        let first = temp.path().join("first.zip");
        let second = temp.path().join("second.zip");

        create_zip(&first, &source, &ArchiveConfig::default()).unwrap();
        create_zip(&second, &source, &ArchiveConfig::default()).unwrap();

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn test_create_zip_overwrites_existing_archive() {
        let temp = TempDir::new().unwrap();
        let source = build_source(&temp);
        let output = temp.path().join("book.zip");
        fs::write(&output, "stale bytes that are not a zip").unwrap();

        create_zip(&output, &source, &ArchiveConfig::default()).unwrap();

        assert_eq!(entry_names(&output).len(), 5);
    }

    #[test]
    fn test_create_zip_file_content_round_trip() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("src");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("notes.md"), "a".repeat(10_000)).unwrap();
        let output = temp.path().join("out.zip");

        let report =
            create_zip(&output, &source, &ArchiveConfig::default().with_compression_level(9))
                .unwrap();

        assert_eq!(report.bytes_written, 10_000);
        assert!(report.compression_ratio() > 1.0);

        let mut zip = zip::ZipArchive::new(File::open(&output).unwrap()).unwrap();
        let mut content = String::new();
        zip.by_name("notes.md")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content.len(), 10_000);
    }

    #[test]
    fn test_create_zip_stored() {
        let temp = TempDir::new().unwrap();
        let source = build_source(&temp);
        let output = temp.path().join("stored.zip");

        create_zip(&output, &source, &ArchiveConfig::default().with_compression_level(0))
            .unwrap();

        let mut zip = zip::ZipArchive::new(File::open(&output).unwrap()).unwrap();
        let entry = zip.by_name("a/b/x.md").unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Stored);
    }

    #[test]
    fn test_create_zip_missing_source() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("out.zip");

        let err = create_zip(&output, temp.path().join("missing"), &ArchiveConfig::default())
            .unwrap_err();

        assert!(matches!(err, TreeError::SourceNotFound { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_create_zip_source_is_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.md");
        fs::write(&file, "").unwrap();

        let err =
            create_zip(temp.path().join("out.zip"), &file, &ArchiveConfig::default()).unwrap_err();

        assert!(matches!(err, TreeError::SourceNotDirectory { .. }));
    }

    #[test]
    fn test_create_zip_unwritable_destination() {
        let temp = TempDir::new().unwrap();
        let source = build_source(&temp);
        let output = temp.path().join("no/such/dir/out.zip");

        let err = create_zip(&output, &source, &ArchiveConfig::default()).unwrap_err();

        assert!(matches!(err, TreeError::CreateFile { .. }));
    }

    #[test]
    fn test_create_zip_inside_source_excludes_itself() {
        let temp = TempDir::new().unwrap();
        let source = build_source(&temp);
        let output = source.join("self.zip");

        create_zip(&output, &source, &ArchiveConfig::default()).unwrap();

        assert!(!entry_names(&output).contains("self.zip"));
    }

    #[cfg(unix)]
    #[test]
    fn test_create_zip_skips_symlinks() {
        let temp = TempDir::new().unwrap();
        let source = build_source(&temp);
        std::os::unix::fs::symlink("a/b/x.md", source.join("link.md")).unwrap();
        let output = temp.path().join("book.zip");

        let report = create_zip(&output, &source, &ArchiveConfig::default()).unwrap();

        assert_eq!(report.files_skipped, 1);
        assert!(report.has_warnings());
        assert!(!entry_names(&output).contains("link.md"));
    }

    #[cfg(unix)]
    #[test]
    fn test_create_zip_preserves_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let source = build_source(&temp);
        fs::set_permissions(
            source.join("a/b/x.md"),
            fs::Permissions::from_mode(0o640),
        )
        .unwrap();
        let output = temp.path().join("book.zip");

        create_zip(&output, &source, &ArchiveConfig::default()).unwrap();

        let mut zip = zip::ZipArchive::new(File::open(&output).unwrap()).unwrap();
        let mode = zip.by_name("a/b/x.md").unwrap().unix_mode().unwrap();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn test_write_entries_to_memory() {
        let temp = TempDir::new().unwrap();
        let source = build_source(&temp);
        let entries = collect_entries(&source).unwrap();
        let mut report = ArchiveReport::default();

        let cursor = write_entries(
            Cursor::new(Vec::new()),
            Path::new("memory.zip"),
            &entries,
            &ArchiveConfig::default(),
            &mut report,
            &mut NoopProgress,
        )
        .unwrap();

        let zip = zip::ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap();
        assert_eq!(zip.len(), 5);
        assert_eq!(report.total_items(), 5);
    }
}
