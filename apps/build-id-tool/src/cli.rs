use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Registry snapshot, overrides the configured path
    #[arg(short, long, global = true)]
    pub registry: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode an identifier or /b/ URL and print the named loadout
    Decode {
        /// Identifier or URL
        id: String,

        /// Print registry indices instead of names
        #[arg(long)]
        raw: bool,
    },

    /// Encode a named loadout from a JSON file ("-" for stdin)
    Encode {
        /// JSON file
        file: PathBuf,
    },

    /// Upgrade an identifier to the current schema
    Upgrade {
        /// Identifier or URL
        id: String,

        /// Print migration details as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check identifiers for a valid layout; exits non-zero if any is invalid
    Validate {
        /// Identifiers or URLs
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Show backend, raw values and planned migrations
    Inspect {
        /// Identifier or URL
        id: String,
    },

    /// Upgrade one identifier per line
    Batch {
        /// Input file ("-" for stdin)
        file: PathBuf,

        /// Process sequentially
        #[arg(long)]
        sequential: bool,
    },
}
