//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use wordforge_domain::{AcquisitionMode, DifficultyLevel};

#[derive(Debug, Parser)]
#[command(name = "wordforge")]
#[command(about = "Acquire, cache and inspect anagram puzzles")]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML or JSON); probed when omitted
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Acquire anagrams for a difficulty level
    Acquire {
        /// Difficulty level, 1 to 5
        #[arg(short, long)]
        level: DifficultyLevel,

        /// curated, hybrid or unlimited (default from configuration)
        #[arg(short, long)]
        mode: Option<AcquisitionMode>,

        /// Number of anagrams to acquire
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },

    /// Show cache statistics
    Stats,

    /// Clear the cache, or one difficulty level of it
    Clear {
        /// Only clear this difficulty level
        #[arg(short, long)]
        level: Option<DifficultyLevel>,
    },

    /// Load anagram records from a JSON array file into the cache
    Preload {
        /// File containing a JSON array of anagram records
        file: PathBuf,
    },
}
