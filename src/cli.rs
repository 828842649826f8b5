//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;
use crate::parser::ListFormat;

#[derive(Parser)]
#[command(name = "hostmerge")]
#[command(author, version, about = "Merge domain blocklists into one Pi-hole hosts file")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path (YAML or JSON)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch all lists and write the merged blocklist and summary
    Update {
        /// Fetch and parse but don't write any file
        #[arg(long)]
        dry_run: bool,

        /// Override the blocklist output path
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Override the summary output path
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Extract domains from a local list file
    Parse {
        /// List file to parse
        file: PathBuf,

        /// List format (hosts, adblock, plain, auto)
        #[arg(long, short, default_value = "auto", value_parser = parse_format)]
        format: ListFormat,
    },

    /// Check whether a token would be accepted as a blockable domain
    Check {
        /// Token to validate
        token: String,
    },

    /// Show configured source lists
    Sources,

    /// Show version
    Version,
}

fn parse_format(s: &str) -> Result<ListFormat, String> {
    s.parse()
}
