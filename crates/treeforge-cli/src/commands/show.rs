//! Show command implementation

use crate::output::OutputFormatter;
use anyhow::Result;
use treeforge_core::tree::book::terraform_book;

pub fn execute(formatter: &dyn OutputFormatter) -> Result<()> {
    formatter.format_tree(&terraform_book())
}
