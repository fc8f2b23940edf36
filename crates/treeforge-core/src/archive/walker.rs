//! Directory walking for archive creation.

use crate::Result;
use crate::TreeError;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Type of a walked directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryType {
    /// Regular file.
    File,

    /// Directory.
    Directory,

    /// Symbolic link with its target path.
    Symlink {
        /// Target of the symlink.
        target: PathBuf,
    },
}

/// A directory entry with the path it takes inside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedEntry {
    /// Full filesystem path to the entry.
    pub path: PathBuf,

    /// Path relative to the walked root.
    pub archive_path: PathBuf,

    /// Type of entry.
    pub entry_type: EntryType,

    /// Size in bytes (0 for directories).
    pub size: u64,
}

/// Collects every entry below `root`, excluding `root` itself.
///
/// Siblings are sorted by file name and a directory precedes its contents,
/// so two walks of the same tree yield the same sequence. Symlinks are
/// reported, not followed.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use treeforge_core::archive::walker::collect_entries;
///
/// let entries = collect_entries(Path::new("/mnt/data/terraform-book"))?;
/// println!("{} entries", entries.len());
/// # Ok::<(), treeforge_core::TreeError>(())
/// ```
///
/// # Errors
///
/// Returns [`TreeError::Walk`] if a directory cannot be read or an entry's
/// metadata is unavailable.
pub fn collect_entries(root: &Path) -> Result<Vec<WalkedEntry>> {
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    let mut entries = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| TreeError::Walk {
            path: e.path().unwrap_or(root).to_path_buf(),
            reason: e.to_string(),
        })?;
        entries.push(build_entry(root, &entry)?);
    }

    Ok(entries)
}

fn build_entry(root: &Path, entry: &walkdir::DirEntry) -> Result<WalkedEntry> {
    let path = entry.path().to_path_buf();
    let metadata = entry.metadata().map_err(|e| TreeError::Walk {
        path: path.clone(),
        reason: format!("cannot read metadata: {e}"),
    })?;

    let entry_type = if metadata.is_symlink() {
        let target = std::fs::read_link(&path).map_err(|e| TreeError::Walk {
            path: path.clone(),
            reason: format!("cannot read symlink target: {e}"),
        })?;
        EntryType::Symlink { target }
    } else if metadata.is_dir() {
        EntryType::Directory
    } else {
        EntryType::File
    };

    let size = if entry_type == EntryType::File {
        metadata.len()
    } else {
        0
    };

    let archive_path = path
        .strip_prefix(root)
        .map_err(|_| TreeError::Walk {
            path: path.clone(),
            reason: format!("entry is not under {}", root.display()),
        })?
        .to_path_buf();

    Ok(WalkedEntry {
        path,
        archive_path,
        entry_type,
        size,
    })
}
