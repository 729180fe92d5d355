//! folk CLI - command-line interface for the folk document store
//!
//! # Examples
//!
//! ```bash
//! # Store a document
//! folk add '{"Author":"Knut Hamsun","Title":"Sult","Issued":1890}'
//!
//! # Find it again
//! folk search "hamsun sult"
//!
//! # Newest documents first, as JSON
//! folk list --format json
//!
//! # Show configuration
//! folk show-config
//! ```
//!
//! Logs go to stderr. Set `RUST_LOG` to change the level and
//! `FOLK_LOG_FORMAT=json` for structured logs.

use clap::Parser;
use folk::cli::output::print_error;
use folk::cli::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "folk=warn".into());
    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("FOLK_LOG_FORMAT").is_ok_and(|f| f == "json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr) // stdout carries command output
                    .compact(),
            )
            .init();
    }
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
