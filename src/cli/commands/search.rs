//! Search and list commands - show several documents at once

use crate::cli::output::print_listing;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::sync::Arc;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Words that must all appear in a document
    pub query: String,
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page number, starting at 0 (newest documents first)
    #[arg(long, short = 'p', default_value = "0")]
    pub page: usize,
}

/// Execute the search command
pub async fn execute(
    args: SearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    // The index is rebuilt from the snapshot on startup
    services.flush_index().await?;

    let listing = services.search(&args.query)?;
    print_listing(&format!("Matches for '{}':", args.query), &listing, format)?;
    Ok(())
}

/// Execute the list command
pub async fn execute_list(
    args: ListArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let listing = services.page(args.page)?;
    print_listing(&format!("Page {}:", args.page), &listing, format)?;
    Ok(())
}
