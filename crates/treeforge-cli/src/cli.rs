//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;
use treeforge_core::tree::book::BOOK_NAME;
use treeforge_core::tree::book::DEFAULT_ROOT;

#[derive(Parser)]
#[command(name = "treeforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Defaults to `build` with its default arguments
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Materialize the book skeleton and archive it (default)
    Build(BuildArgs),
    /// Print the compiled-in book layout
    Show,
    /// List archive contents without extraction
    List(ListArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

impl Commands {
    /// Name used in JSON output envelopes.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Build(_) => "build",
            Self::Show => "show",
            Self::List(_) => "list",
            Self::Completion(_) => "completion",
        }
    }
}

#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct BuildArgs {
    /// Directory that receives the tree and the archive
    #[arg(long, value_name = "DIR", default_value = DEFAULT_ROOT)]
    pub root: PathBuf,

    /// Name of the tree directory and the archive stem
    #[arg(long, default_value = BOOK_NAME)]
    pub name: String,

    /// Compression level (0 stores entries uncompressed)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub compression_level: Option<u8>,

    /// Skip writing the archive
    #[arg(long)]
    pub no_archive: bool,
}

impl Default for BuildArgs {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            name: BOOK_NAME.to_string(),
            compression_level: None,
            no_archive: false,
        }
    }
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Show detailed entry information
    #[arg(short, long)]
    pub long: bool,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["treeforge"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_build_defaults_match_default_impl() {
        let cli = Cli::try_parse_from(["treeforge", "build"]).unwrap();
        let Some(Commands::Build(args)) = cli.command else {
            panic!("expected build command");
        };
        assert_eq!(args, BuildArgs::default());
        assert_eq!(args.root, PathBuf::from("/mnt/data"));
        assert_eq!(args.name, "terraform-book");
    }

    #[test]
    fn test_build_flags() {
        let cli = Cli::try_parse_from([
            "treeforge",
            "build",
            "--root",
            "/tmp/out",
            "--name",
            "notes",
            "-l",
            "0",
            "--no-archive",
        ])
        .unwrap();
        let Some(Commands::Build(args)) = cli.command else {
            panic!("expected build command");
        };
        assert_eq!(args.root, PathBuf::from("/tmp/out"));
        assert_eq!(args.name, "notes");
        assert_eq!(args.compression_level, Some(0));
        assert!(args.no_archive);
    }

    #[test]
    fn test_compression_level_out_of_range() {
        assert!(Cli::try_parse_from(["treeforge", "build", "-l", "10"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["treeforge", "show", "--json"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.command.unwrap().name(), "show");
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["treeforge", "-v", "-q"]).is_err());
    }
}
