//! CLI argument definitions using clap
//!
//! Commands:
//! - aerorsql translate --relation <path> [--config <path>]
//! - aerorsql operators [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// aerorsql - translate filter trees into SQL conditions
#[derive(Parser, Debug)]
#[command(name = "aerorsql")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate a filter tree read from stdin
    Translate {
        /// Path to the relation description
        #[arg(long)]
        relation: PathBuf,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List registered operator symbols
    Operators {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
