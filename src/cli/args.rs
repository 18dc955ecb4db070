//! Command line argument parsing for the cairn CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// cairn - A command-line dictionary with typo correction and etymologies
#[derive(Parser, Debug, Clone)]
#[command(name = "cairn")]
#[command(about = "A command-line dictionary with typo correction and reconciled etymologies")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct CairnArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (defaults to ~/.cairn.toml)
    #[arg(short, long, value_name = "FILE", env = "CAIRN_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl CairnArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Look a word up: definitions, etymology and examples
    Dict(DictArgs),

    /// Suggest the closest spelling of a word
    Suggest(SuggestArgs),

    /// Show the reconciled etymology of a word
    Etymology(EtymologyArgs),

    /// List recently looked-up words
    History(HistoryArgs),
}

/// Arguments for a dictionary lookup
#[derive(Parser, Debug, Clone)]
pub struct DictArgs {
    /// Word to look up
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Don't suggest a spelling when the word is not found
    #[arg(long)]
    pub no_suggest: bool,
}

/// Arguments for spelling suggestions
#[derive(Parser, Debug, Clone)]
pub struct SuggestArgs {
    /// Possibly misspelled word
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Largest edit distance of a suggestion (defaults to the configured bound)
    #[arg(short = 'd', long)]
    pub max_distance: Option<usize>,
}

/// Arguments for an etymology lookup
#[derive(Parser, Debug, Clone)]
pub struct EtymologyArgs {
    /// Word whose etymology to show
    #[arg(value_name = "WORD")]
    pub word: String,
}

/// Arguments for listing history
#[derive(Parser, Debug, Clone)]
pub struct HistoryArgs {
    /// Number of words to list
    #[arg(short = 'n', long, default_value = "10")]
    pub limit: usize,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

impl DictArgs {
    /// Check if spelling suggestions are allowed
    pub fn suggestions_enabled(&self) -> bool {
        !self.no_suggest
    }
}
