//! CLI definitions for Latte.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Latte CLI.
#[derive(Parser)]
#[command(name = "latte")]
#[command(about = "Accessibility tree visibility and occlusion analysis")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/latte.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Classify one captured screen and write the report
    Analyze {
        /// UI hierarchy dump (XML)
        #[arg(short, long)]
        dump: PathBuf,

        /// Package of the app under test
        #[arg(short, long)]
        package: String,

        /// Screenshot taken with the dump; overlays are written next to it
        #[arg(short, long)]
        screenshot: Option<PathBuf>,

        /// Output directory (default: output.dir from the config)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Skip screenshot overlays
        #[arg(long)]
        no_overlays: bool,

        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Print the annotated node list as JSON lines
    Nodes {
        /// UI hierarchy dump (XML)
        #[arg(short, long)]
        dump: PathBuf,

        /// Only nodes that are potentially actionable
        #[arg(long)]
        actionable: bool,

        /// Only nodes that potentially carry data
        #[arg(long)]
        data: bool,
    },

    /// Validate the configuration file
    Check,
}
