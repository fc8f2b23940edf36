//! Archive listing implementation.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::TreeError;
use crate::inspection::manifest::ArchiveEntry;
use crate::inspection::manifest::ArchiveManifest;
use crate::inspection::manifest::ManifestEntryType;

/// Lists the contents of a ZIP archive without extracting it.
///
/// # Examples
///
/// ```no_run
/// use treeforge_core::list_archive;
///
/// let manifest = list_archive("/mnt/data/terraform-book.zip")?;
/// for entry in &manifest.entries {
///     println!("{}", entry.path.display());
/// }
/// # Ok::<(), treeforge_core::TreeError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The archive file cannot be opened
/// - The file is not a readable ZIP archive
/// - An entry name escapes the archive root
pub fn list_archive<P: AsRef<Path>>(archive_path: P) -> Result<ArchiveManifest> {
    let archive_path = archive_path.as_ref();
    let file = File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))
        .map_err(|e| TreeError::InvalidArchive(format!("failed to open ZIP archive: {e}")))?;

    let mut manifest = ArchiveManifest::new();

    for i in 0..archive.len() {
        let entry = archive
            .by_index(i)
            .map_err(|e| TreeError::InvalidArchive(format!("failed to read ZIP entry: {e}")))?;

        let path = entry.enclosed_name().ok_or_else(|| {
            TreeError::InvalidArchive(format!("entry escapes archive root: {}", entry.name()))
        })?;

        manifest.add_entry(ArchiveEntry {
            path: strip_trailing_separator(path),
            entry_type: convert_zip_entry_type(&entry),
            size: entry.size(),
            compressed_size: entry.compressed_size(),
            mode: entry.unix_mode(),
        });
    }

    Ok(manifest)
}

fn strip_trailing_separator(path: PathBuf) -> PathBuf {
    path.components().collect()
}

fn convert_zip_entry_type<R: std::io::Read + std::io::Seek>(
    entry: &zip::read::ZipFile<'_, R>,
) -> ManifestEntryType {
    if entry.is_dir() {
        ManifestEntryType::Directory
    } else if is_zip_symlink(entry.unix_mode()) {
        ManifestEntryType::Symlink
    } else {
        ManifestEntryType::File
    }
}

fn is_zip_symlink(mode: Option<u32>) -> bool {
    const S_IFMT: u32 = 0o170_000;
    const S_IFLNK: u32 = 0o120_000;
    mode.is_some_and(|m| m & S_IFMT == S_IFLNK)
}
