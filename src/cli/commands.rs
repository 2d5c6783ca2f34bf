//! CLI command definitions using clap
//!
//! Defines the command structure for the `devfolio` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// devfolio - a developer portfolio presented as a terminal IDE
///
/// Run without arguments to browse the portfolio interactively.
#[derive(Parser, Debug)]
#[command(name = "devfolio", version, about, long_about = None)]
pub struct Cli {
    /// Portfolio catalog (TOML) to show instead of the built-in one
    #[arg(long, global = true, env = "DEVFOLIO_CONTENT", value_name = "FILE")]
    pub content: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the explorer tree
    Tree {
        /// Expand every folder instead of using the catalog defaults
        #[arg(long)]
        all: bool,
    },

    /// Print a document, e.g. `devfolio show projects/Zyptra.kt`
    Show {
        /// Path relative to the portfolio root
        path: String,
    },

    /// Print the search-indexing metadata block (schema.org JSON-LD)
    Meta {
        /// Single-line output
        #[arg(long)]
        compact: bool,
    },

    /// Manage configuration
    Config(ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// Configuration key
        key: ConfigKey,
        /// Value to set
        value: String,
    },
    /// Get a configuration value
    Get {
        /// Configuration key
        key: ConfigKey,
    },
    /// Reset a configuration value to its default
    Reset {
        /// Configuration key
        key: ConfigKey,
    },
    /// Print the configuration file location
    Path,
}

/// Configuration keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    /// Terminal width below which the compact layout is used
    CompactBreakpoint,
    /// Explorer panel width in the wide layout
    ExplorerWidth,
    /// Event loop tick interval in milliseconds
    TickRate,
    /// Document opened at startup
    StartupDocument,
    /// Catalog file used instead of the built-in portfolio
    ContentPath,
}
