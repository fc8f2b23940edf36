//! Declarative tree description.

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

/// One level of a declarative directory tree.
///
/// A node is either a mapping of child names to further nodes, or a group of
/// file names that become empty files in the directory holding the group.
/// Every key of an [`Internal`](TreeNode::Internal) node becomes a directory.
///
/// Children are kept in a `BTreeMap`, so sibling names are unique by
/// construction and every traversal visits them in the same order.
///
/// # Examples
///
/// ```
/// use treeforge_core::TreeNode;
///
/// let tree = TreeNode::internal([(
///     "a",
///     TreeNode::internal([("b", TreeNode::leaf_group(["x.md", "y.md"]))]),
/// )]);
///
/// assert_eq!(tree.directory_count(), 2);
/// assert_eq!(tree.file_count(), 2);
/// assert_eq!(tree.depth(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// Named children, each materialized as a directory.
    Internal(BTreeMap<String, TreeNode>),

    /// File names created as zero-length files in the current directory.
    LeafGroup(Vec<String>),
}

impl TreeNode {
    /// Creates an internal node from `(name, child)` pairs.
    ///
    /// A repeated name keeps the last child given for it.
    pub fn internal<I, K>(children: I) -> Self
    where
        I: IntoIterator<Item = (K, Self)>,
        K: Into<String>,
    {
        Self::Internal(
            children
                .into_iter()
                .map(|(name, child)| (name.into(), child))
                .collect(),
        )
    }

    /// Creates a leaf group from file names.
    pub fn leaf_group<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::LeafGroup(files.into_iter().map(Into::into).collect())
    }

    /// Returns `true` for a leaf group.
    #[must_use]
    pub const fn is_leaf_group(&self) -> bool {
        matches!(self, Self::LeafGroup(_))
    }

    /// Number of directories the tree produces (one per mapping key).
    #[must_use]
    pub fn directory_count(&self) -> usize {
        match self {
            Self::Internal(children) => children
                .values()
                .map(|child| 1 + child.directory_count())
                .sum(),
            Self::LeafGroup(_) => 0,
        }
    }

    /// Number of leaf files the tree produces.
    #[must_use]
    pub fn file_count(&self) -> usize {
        match self {
            Self::Internal(children) => children.values().map(Self::file_count).sum(),
            Self::LeafGroup(files) => files.len(),
        }
    }

    /// Total number of filesystem entries: directories plus files.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.directory_count() + self.file_count()
    }

    /// Number of directory levels below the base path.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Internal(children) => children
                .values()
                .map(|child| 1 + child.depth())
                .max()
                .unwrap_or(0),
            Self::LeafGroup(_) => 0,
        }
    }

    /// Every path the tree produces, relative to the base directory.
    ///
    /// Paths are listed in pre-order: a directory comes before its contents,
    /// siblings in name order, leaf files in declaration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use treeforge_core::TreeNode;
    ///
    /// let tree = TreeNode::internal([("docs", TreeNode::leaf_group(["intro.md"]))]);
    /// assert_eq!(
    ///     tree.relative_paths(),
    ///     vec![PathBuf::from("docs"), PathBuf::from("docs/intro.md")]
    /// );
    /// ```
    #[must_use]
    pub fn relative_paths(&self) -> Vec<PathBuf> {
        let mut paths = Vec::with_capacity(self.entry_count());
        self.collect_paths(Path::new(""), &mut paths);
        paths
    }

    fn collect_paths(&self, prefix: &Path, out: &mut Vec<PathBuf>) {
        match self {
            Self::Internal(children) => {
                for (name, child) in children {
                    let path = prefix.join(name);
                    out.push(path.clone());
                    child.collect_paths(&path, out);
                }
            }
            Self::LeafGroup(files) => {
                out.extend(files.iter().map(|file| prefix.join(file)));
            }
        }
    }
}
