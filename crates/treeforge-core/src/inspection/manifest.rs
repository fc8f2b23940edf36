//! Archive manifest types.

use std::path::PathBuf;

/// Kind of an archive entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestEntryType {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link.
    Symlink,
}

/// One entry of an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry path inside the archive, without a trailing separator.
    pub path: PathBuf,

    /// Entry kind.
    pub entry_type: ManifestEntryType,

    /// Uncompressed size in bytes.
    pub size: u64,

    /// Compressed size in bytes.
    pub compressed_size: u64,

    /// Unix mode bits, when recorded.
    pub mode: Option<u32>,
}

/// Contents of an archive, in archive order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveManifest {
    /// All entries.
    pub entries: Vec<ArchiveEntry>,

    /// Number of entries.
    pub total_entries: usize,

    /// Sum of uncompressed entry sizes.
    pub total_size: u64,
}

impl ArchiveManifest {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and updates the totals.
    pub fn add_entry(&mut self, entry: ArchiveEntry) {
        self.total_entries += 1;
        self.total_size = self.total_size.saturating_add(entry.size);
        self.entries.push(entry);
    }

    /// Entry paths in archive order.
    ///
    /// Comparable with [`TreeNode::relative_paths`](crate::TreeNode::relative_paths)
    /// once both sides are collected into a set.
    #[must_use]
    pub fn relative_paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|entry| entry.path.clone()).collect()
    }

    /// Number of file entries.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.count(ManifestEntryType::File)
    }

    /// Number of directory entries.
    #[must_use]
    pub fn directory_count(&self) -> usize {
        self.count(ManifestEntryType::Directory)
    }

    fn count(&self, kind: ManifestEntryType) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.entry_type == kind)
            .count()
    }
}
