//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Parse, inspect and reformat Paradox game files: mod descriptors, opinion modifiers, localisation
#[derive(Parser, Debug)]
#[command(name = "pdxtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (repeat for more: -d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Reject blocks left open at end of file and stray closing braces
    #[arg(long, global = true)]
    pub strict: bool,

    /// Directory with a local .pdxtree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the node hierarchy of a file
    Tree {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Re-emit a file in canonical form
    Fmt {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Rewrite the file in place instead of printing
        #[arg(short, long)]
        write: bool,
    },

    /// Show a mod descriptor and the opinion modifier files of the mod
    Mod {
        /// Descriptor path, or name inside the mod directory (list all if omitted)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// List the opinion modifiers of a file
    Opinions {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List the rows of a localisation file
    Loc {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Only show rows whose key starts with this prefix
        #[arg(short, long)]
        prefix: Option<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,

    /// Print a template config file
    Template,

    /// Show config paths
    Path,
}
