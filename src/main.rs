//! devfolio - a developer portfolio presented as a terminal IDE
//!
//! Run without arguments to launch the TUI, or use subcommands for CLI mode.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use devfolio::cli::{browse, config, Cli, Commands};
use devfolio::core::catalog;
use devfolio::core::config::Config;
use devfolio::core::session::Session;
use devfolio::error::Result;
use devfolio::tui::App;

#[tokio::main]
async fn main() {
    // Initialize logging; stdout belongs to the TUI and to command output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Config commands manage the file themselves
    let command = match cli.command {
        Some(Commands::Config(args)) => return config::handle_config(args.command),
        other => other,
    };

    let config = load_config();
    let content_path: Option<PathBuf> = cli.content.or_else(|| config.content_path.clone());
    let source = catalog::source_for(content_path.as_deref());

    match command {
        // No subcommand - launch TUI mode
        None => {
            let mut session = Session::load(source.as_ref())?;
            session.open_startup_document(&config.startup_document);

            let mut app = App::new(session, config);
            app.run().await
        }
        Some(Commands::Tree { all }) => browse::handle_tree(source.as_ref(), all),
        Some(Commands::Show { path }) => browse::handle_show(source.as_ref(), &path),
        Some(Commands::Meta { compact }) => browse::handle_meta(source.as_ref(), compact),
        Some(Commands::Config(_)) => unreachable!(),
    }
}

/// A broken or unreachable config file falls back to defaults
fn load_config() -> Config {
    Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "using default configuration");
        Config::default()
    })
}
