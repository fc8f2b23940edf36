//! Configuration for archiving a materialized tree.

use crate::Result;
use crate::TreeError;

/// Default deflate level.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 6;

/// Configuration for archive creation.
///
/// # Examples
///
/// ```
/// use treeforge_core::ArchiveConfig;
///
/// let config = ArchiveConfig::default();
/// assert_eq!(config.compression_level, Some(6));
///
/// let stored = ArchiveConfig::default().with_compression_level(0);
/// assert!(stored.is_stored());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Deflate level (1-9), or `0` to store entries uncompressed.
    ///
    /// `None` uses the default level.
    ///
    /// Default: `Some(6)`.
    pub compression_level: Option<u8>,

    /// Record unix permission bits of each file in the archive.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            compression_level: Some(DEFAULT_COMPRESSION_LEVEL),
            preserve_permissions: true,
        }
    }
}

impl ArchiveConfig {
    /// Creates a new `ArchiveConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level.
    ///
    /// # Panics
    ///
    /// Panics if the level is greater than 9. Use `validate()` for
    /// non-panicking validation.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        assert!(level <= 9, "compression level must be 0-9");
        self.compression_level = Some(level);
        self
    }

    /// Sets whether to record permissions.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Returns `true` when entries are stored without compression.
    #[must_use]
    pub fn is_stored(&self) -> bool {
        self.compression_level == Some(0)
    }

    /// Returns the effective deflate level.
    #[must_use]
    pub fn effective_level(&self) -> u8 {
        self.compression_level.unwrap_or(DEFAULT_COMPRESSION_LEVEL)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidCompressionLevel`] if the level is set
    /// and greater than 9.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && level > 9
        {
            return Err(TreeError::InvalidCompressionLevel { level });
        }
        Ok(())
    }
}
