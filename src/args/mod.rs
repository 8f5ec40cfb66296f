//! Command-line argument parsing and handling.

pub mod codec;
pub mod config;
pub mod definition;
pub mod utils;

// Re-export commonly used items
pub use definition::{Args, Command, process_args};
pub use utils::determine_log_level;

/// Result type of every command handler.
pub type CliResult = std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;
