//! CLI adapter for folk
//!
//! Provides a command-line interface over the document store and its
//! keyword index. Depends on `core/`; nothing in `core/` depends on it.
//!
//! # Architecture
//!
//! ```text
//!              +------------------+
//!              |     core/        |
//!              |  (domain logic)  |
//!              +--------+---------+
//!                       |
//!                       v
//!              +------------------+
//!              |      cli/        |
//!              | (clap adapter)   |
//!              +------------------+
//! ```
//!
//! Every invocation loads the snapshot, runs one command and, for
//! commands that change documents, writes the snapshot back.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// folk - document store with keyword search
///
/// Stores JSON documents under integer ids in a snapshot file and
/// finds them by the words in their searchable fields.
#[derive(Parser, Debug)]
#[command(name = "folk")]
#[command(version)]
#[command(about = "Document store with keyword search", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store a new document and print its id
    Add(commands::AddArgs),

    /// Print one document
    Get(commands::GetArgs),

    /// Insert or overwrite the document with a given id
    Set(commands::SetArgs),

    /// Delete a document
    Delete(commands::DeleteArgs),

    /// List documents, newest first
    List(commands::ListArgs),

    /// Find documents containing every given word
    Search(commands::SearchArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  folk completions bash > ~/.local/share/bash-completion/completions/folk
    ///   zsh:   folk completions zsh > ~/.zfunc/_folk
    ///   fish:  folk completions fish > ~/.config/fish/completions/folk.fish
    Completions(commands::CompletionsArgs),
}

impl Commands {
    /// Whether the command changes documents
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Commands::Add(_) | Commands::Set(_) | Commands::Delete(_)
        )
    }
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    // Initialize XDG directories
    let xdg = XdgDirs::new();
    xdg.ensure_dirs_exist()?;
    xdg.log_paths();

    // Load configuration
    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();

    // Create services
    let services = Arc::new(Services::open(config).await?);
    let mutation = cli.command.is_mutation();

    // Execute command
    let result = match cli.command {
        Commands::Add(args) => commands::document::execute_add(args, &services, cli.format).await,
        Commands::Get(args) => commands::document::execute_get(args, &services, cli.format).await,
        Commands::Set(args) => commands::document::execute_set(args, &services, cli.format).await,
        Commands::Delete(args) => {
            commands::document::execute_delete(args, &services, cli.format).await
        }
        Commands::List(args) => commands::search::execute_list(args, &services, cli.format).await,
        Commands::Search(args) => commands::search::execute(args, &services, cli.format).await,
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format).await,
        Commands::Completions(_) => unreachable!(), // Handled above
    };

    if mutation {
        services.shutdown().await?;
    } else {
        services.synchronizer.shutdown().await;
    }

    result
}
