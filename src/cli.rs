use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::shell::ShellKind;

#[derive(Parser)]
#[command(
    name = "fm-jump",
    about = "Frecency jumps and fuzzy picks for terminal file managers"
)]
pub struct Cli {
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Jump to the most frecent directory matching the terms
    Z {
        /// Fragments of the target path
        terms: Vec<String>,
    },
    /// Complete a partially typed `z` command line
    Complete {
        /// The line typed so far, e.g. "z pro"
        line: String,
    },
    /// Pick a frecent directory interactively
    ZDir,
    /// Find a file or directory with the fuzzy picker
    Fzf {
        /// Only offer frecent directories
        #[arg(long)]
        dirs: bool,
    },
    /// Print the shell wrapper function
    Init {
        #[arg(value_enum)]
        shell: ShellKind,
    },
    /// Print the default config path
    ConfigPath,
}
