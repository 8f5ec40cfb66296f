//! Command-line argument definitions and dispatch.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::CliResult;

/// satchel - Inspect and edit backpack settings and item blobs
#[derive(Parser, Debug)]
#[command(name = "satchel")]
#[command(version)]
#[command(about = "Inspect and edit backpack settings and item blobs", long_about = None)]
pub struct Args {
    /// Data directory holding config.yml and logs (default: $SATCHEL_DATA_DIR or ~/.local/share/satchel)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Action to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create or heal the config document and print its path
    Init,
    /// Print the YAML value at a dot-separated key path
    Get {
        /// Key path, e.g. defaults.color
        path: String,
    },
    /// Write a YAML value at a dot-separated key path
    Set {
        /// Key path, e.g. permissions.rename
        path: String,
        /// YAML value, e.g. false or "red"
        value: String,
    },
    /// Read a JSON item list from stdin and print its blob
    Encode,
    /// Print the JSON item list stored in a blob
    Decode {
        /// Base64 blob
        blob: String,
    },
    /// Print the crafting recipe
    Recipe,
}

/// What: Run the selected subcommand.
///
/// Inputs:
/// - `args`: Parsed command-line arguments
///
/// Output:
/// - `Ok(())` when the command succeeded
///
/// # Errors
/// - Any handler error (bad key path, unreadable stdin, malformed blob)
///
/// Details:
/// - Config persistence failures terminate the process inside the handlers.
pub fn process_args(args: &Args) -> CliResult {
    let data_dir = satchel::paths::data_dir(args.data_dir.as_deref());
    tracing::debug!(command = ?args.command, data_dir = %data_dir.display(), "[Cli] Running command");
    match &args.command {
        Command::Init => super::config::handle_init(&data_dir),
        Command::Get { path } => super::config::handle_get(&data_dir, path),
        Command::Set { path, value } => super::config::handle_set(&data_dir, path, value),
        Command::Recipe => super::config::handle_recipe(&data_dir),
        Command::Encode => super::codec::handle_encode(std::io::stdin().lock()),
        Command::Decode { blob } => super::codec::handle_decode(blob),
    }
}
