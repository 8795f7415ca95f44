//! Command-line interface implementation for tacklebox.
//! Provides argument parsing using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for tacklebox.
#[derive(Parser, Debug)]
#[command(author, version, about = "tacklebox: manage your universal assets per-project", long_about = None)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the configuration file (defaults to ~/.tacklebox)
    #[arg(short, long, value_name = "DIR", env = "TACKLEBOX_CONFIG_DIR", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Sync files declared in configurations
    #[command(alias = "s")]
    Sync,

    /// Add all directories in given directory to config Projects for configuration
    #[command(alias = "r")]
    Readdir {
        /// Directory to scan, relative to the current directory
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,
    },

    /// Render a single template file to stdout
    Render {
        /// Path to the template file
        #[arg(value_name = "TEMPLATE_FILE")]
        template: PathBuf,

        /// Settings as a JSON object
        #[arg(short, long, value_name = "JSON", default_value = "{}")]
        settings: String,
    },
}

/// Parses command line arguments and returns the Args structure.
pub fn get_args() -> Args {
    Args::parse()
}
