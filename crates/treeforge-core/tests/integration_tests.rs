//! Integration tests for treeforge-core.
//!
//! These tests run materialization and archiving end to end against real
//! temporary directories.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeSet;
use std::fs;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;
use treeforge_core::ArchiveConfig;
use treeforge_core::BuildOptions;
use treeforge_core::TreeError;
use treeforge_core::TreeNode;
use treeforge_core::archive;
use treeforge_core::build_book;
use treeforge_core::list_archive;
use treeforge_core::materialize;
use treeforge_core::tree::book::BOOK_NAME;
use treeforge_core::tree::book::terraform_book;
use walkdir::WalkDir;

fn scenario_tree() -> TreeNode {
    TreeNode::internal([(
        "a",
        TreeNode::internal([("b", TreeNode::leaf_group(["x.md", "y.md"]))]),
    )])
}

/// Relative paths of everything below `root`, excluding `root`.
fn disk_paths(root: &Path) -> BTreeSet<PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|entry| {
            entry
                .expect("walk failed")
                .path()
                .strip_prefix(root)
                .expect("entry outside root")
                .to_path_buf()
        })
        .collect()
}

#[test]
fn test_scenario_materialize_then_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let base = temp.path().join("out");

    materialize(&base, &scenario_tree()).unwrap();

    assert!(base.join("a").is_dir());
    for leaf in ["a/b/x.md", "a/b/y.md"] {
        let metadata = fs::metadata(base.join(leaf)).unwrap();
        assert!(metadata.is_file());
        assert_eq!(metadata.len(), 0);
    }

    let report = archive(&base, &base, &ArchiveConfig::default()).unwrap();
    assert_eq!(report.output_path, temp.path().join("out.zip"));

    let extracted = temp.path().join("extracted");
    let mut zip = zip::ZipArchive::new(File::open(&report.output_path).unwrap()).unwrap();
    zip.extract(&extracted).unwrap();

    assert_eq!(fs::metadata(extracted.join("a/b/x.md")).unwrap().len(), 0);
    assert_eq!(fs::metadata(extracted.join("a/b/y.md")).unwrap().len(), 0);
}

#[test]
fn test_every_tree_path_exists_with_right_kind() {
    let temp = TempDir::new().unwrap();
    let book = terraform_book();

    materialize(temp.path(), &book).unwrap();

    let mut files = 0;
    let mut directories = 0;
    for path in book.relative_paths() {
        let full = temp.path().join(&path);
        let metadata = fs::metadata(&full).unwrap();
        if metadata.is_dir() {
            directories += 1;
        } else {
            assert_eq!(metadata.len(), 0, "{} should be empty", path.display());
            files += 1;
        }
    }

    assert_eq!(directories, book.directory_count());
    assert_eq!(files, book.file_count());
}

#[test]
fn test_materialized_disk_matches_description_exactly() {
    let temp = TempDir::new().unwrap();
    let book = terraform_book();

    materialize(temp.path(), &book).unwrap();

    let expected: BTreeSet<PathBuf> = book.relative_paths().into_iter().collect();
    assert_eq!(disk_paths(temp.path()), expected);
}

#[test]
fn test_rerun_is_idempotent_and_truncates() {
    let temp = TempDir::new().unwrap();
    let book = terraform_book();
    materialize(temp.path(), &book).unwrap();

    let page = temp
        .path()
        .join(BOOK_NAME)
        .join("tutorials/core-workflow/init.md");
    fs::write(&page, "# terraform init\n").unwrap();

    let report = materialize(temp.path(), &book).unwrap();

    assert_eq!(fs::metadata(&page).unwrap().len(), 0);
    assert_eq!(report.directories_created, 0);
    assert_eq!(report.directories_reused, book.directory_count());
    assert_eq!(report.files_truncated, 1);
}

#[test]
fn test_archive_round_trip_path_set() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join(BOOK_NAME);
    let book = terraform_book();

    materialize(&base, &book).unwrap();
    fs::create_dir(base.join("appendix")).unwrap();

    let report = archive(&base, &base, &ArchiveConfig::default()).unwrap();
    let extracted = temp.path().join("extracted");
    zip::ZipArchive::new(File::open(&report.output_path).unwrap())
        .unwrap()
        .extract(&extracted)
        .unwrap();

    assert_eq!(disk_paths(&extracted), disk_paths(&base));
    assert!(extracted.join("appendix").is_dir());
}

#[test]
fn test_manifest_matches_description() {
    let temp = TempDir::new().unwrap();

    let report = build_book(temp.path(), &BuildOptions::default()).unwrap();
    let archive_path = report.archive_path().unwrap();

    let manifest = list_archive(archive_path).unwrap();
    let listed: BTreeSet<PathBuf> = manifest.relative_paths().into_iter().collect();
    let expected: BTreeSet<PathBuf> = terraform_book().relative_paths().into_iter().collect();

    assert_eq!(listed, expected);
    assert_eq!(manifest.total_size, 0);
    assert_eq!(manifest.file_count(), 40);
    assert_eq!(manifest.directory_count(), 11);
}

#[test]
fn test_file_blocking_directory_is_not_overwritten() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("out");
    fs::create_dir_all(base.join("a")).unwrap();
    fs::write(base.join("a/b"), "keep me").unwrap();

    let err = materialize(&base, &scenario_tree()).unwrap_err();

    assert!(matches!(err, TreeError::CreateDir { .. }));
    assert_eq!(err.path(), Some(base.join("a/b").as_path()));
    assert_eq!(fs::read_to_string(base.join("a/b")).unwrap(), "keep me");
}

#[test]
fn test_archive_missing_source() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("never-built");

    let err = archive(&missing, &missing, &ArchiveConfig::default()).unwrap_err();

    assert!(matches!(err, TreeError::SourceNotFound { .. }));
}

#[test]
fn test_rebuild_overwrites_archive() {
    let temp = TempDir::new().unwrap();
    let archive_path = temp.path().join("terraform-book.zip");
    fs::write(&archive_path, "old archive").unwrap();

    build_book(temp.path(), &BuildOptions::default()).unwrap();
    let first = fs::read(&archive_path).unwrap();
    build_book(temp.path(), &BuildOptions::default()).unwrap();
    let second = fs::read(&archive_path).unwrap();

    assert_eq!(&first[0..4], b"PK\x03\x04");
    assert_eq!(first, second);
}
