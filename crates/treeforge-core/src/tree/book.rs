//! The compiled-in terraform book layout.

use super::TreeNode;

/// Name of the book directory and, with `.zip` appended, of its archive.
pub const BOOK_NAME: &str = "terraform-book";

/// Directory the book is built under when no root is given.
pub const DEFAULT_ROOT: &str = "/mnt/data";

/// Chapters under `tutorials`, each with its placeholder pages.
const CHAPTERS: &[(&str, &[&str])] = &[
    ("iac-concepts", &["what-is-terraform.md", "advantages-of-iac.md"]),
    (
        "terraform-purpose",
        &[
            "multi-cloud-deployment.md",
            "state-purpose.md",
            "manage-resources-in-state.md",
        ],
    ),
    (
        "terraform-basics",
        &[
            "providers.md",
            "manage-versions.md",
            "plugin-architecture.md",
            "provider-configuration.md",
            "initialize-configuration.md",
        ],
    ),
    (
        "terraform-core",
        &["import.md", "state-command.md", "verbose-logging.md"],
    ),
    (
        "terraform-modules",
        &[
            "modules-overview.md",
            "input-variables.md",
            "variable-scope.md",
            "module-versions.md",
        ],
    ),
    (
        "core-workflow",
        &[
            "core-terraform-workflow.md",
            "init.md",
            "validate.md",
            "plan.md",
            "apply.md",
            "destroy.md",
            "fmt.md",
        ],
    ),
    (
        "state",
        &[
            "local-backend.md",
            "state-locking.md",
            "authentication-methods.md",
            "remote-backends.md",
            "resource-drift.md",
            "backend-configuration.md",
            "secret-management.md",
        ],
    ),
    (
        "configuration",
        &[
            "variables-and-outputs.md",
            "secure-secrets.md",
            "collection-and-structural-types.md",
            "resource-and-data-config.md",
            "resource-addressing.md",
            "functions.md",
            "dependency-management.md",
        ],
    ),
    (
        "hcp-terraform",
        &["overview.md", "collaboration-and-governance.md"],
    ),
];

/// Returns the terraform book tree description.
///
/// The description has a single top-level `terraform-book` directory, so
/// materializing it at `<root>/terraform-book` nests the book one level
/// below the base path, as the published layout expects.
///
/// # Examples
///
/// ```
/// use treeforge_core::tree::book::terraform_book;
///
/// let book = terraform_book();
/// assert_eq!(book.directory_count(), 11);
/// assert_eq!(book.file_count(), 40);
/// ```
#[must_use]
pub fn terraform_book() -> TreeNode {
    let chapters = CHAPTERS
        .iter()
        .map(|(chapter, pages)| (*chapter, TreeNode::leaf_group(pages.iter().copied())));

    TreeNode::internal([(
        BOOK_NAME,
        TreeNode::internal([("tutorials", TreeNode::internal(chapters))]),
    )])
}
