//! Tree descriptions.
//!
//! A [`TreeNode`] describes directories and zero-length files to create.
//! The [`book`] module holds the one description the CLI builds.

pub mod book;
mod node;

pub use node::TreeNode;
