//! Command-line argument definitions for the topolayer CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Flags given here override the configuration file.

use clap::Parser;

use topolayer::orientation::Orientation;

/// Command-line arguments for the topolayer layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the containerlab topology file
    #[arg(help = "Path to the input topology file")]
    pub input: String,

    /// Path to the output JSON file [default: <input>.layout.json]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Direction in which ranks stack (vertical, horizontal)
    #[arg(long)]
    pub orientation: Option<Orientation>,

    /// Expand links into connector ports and midpoints
    #[arg(long)]
    pub connectors: bool,

    /// Keep nodes that take part in no link
    #[arg(long)]
    pub include_unlinked_nodes: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
