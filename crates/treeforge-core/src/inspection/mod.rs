//! Archive inspection without extraction.
//!
//! Reads a written archive back into an [`ArchiveManifest`] so its path set
//! can be compared with the tree description it came from.

pub mod list;
pub mod manifest;

pub use list::list_archive;
pub use manifest::ArchiveEntry;
pub use manifest::ArchiveManifest;
pub use manifest::ManifestEntryType;
