//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Discover Docker build contexts and show their image hierarchy
#[derive(Parser, Debug)]
#[command(name = "docktree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory to search for build contexts (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the image hierarchy as a tree (roots marked with *)
    Tree,

    /// List contexts with their image tags
    #[command(alias = "config")]
    Tags,

    /// Show how images distribute over base images
    Info,

    /// Print the Dockerfile of a context
    Print {
        /// Context name (directory basename)
        context: String,
    },

    /// Print the shell script embedded in a context's Dockerfile (#@ lines)
    Script {
        /// Context name (directory basename)
        context: String,
    },

    /// List base images (tree roots)
    Roots,

    /// List images nothing else is built on
    Leaves,

    /// Show effective settings as TOML
    Settings,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
