//! Config command - show current configuration

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Also show runtime state (document and token counts)
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub config_file: String,
    pub store: StoreSection,
    pub index: IndexSection,
    pub search: SearchSection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<StateSection>,
}

#[derive(Debug, Serialize)]
pub struct StoreSection {
    pub snapshot_path: String,
    pub checkpoint_every: usize,
}

#[derive(Debug, Serialize)]
pub struct IndexSection {
    pub analyzer: String,
    pub min_gram: usize,
    pub max_gram: usize,
    pub queue_capacity: usize,
    pub searchable_fields: Vec<String>,
    pub lookups: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct SearchSection {
    pub page_size: usize,
    pub max_query_length: usize,
}

#[derive(Debug, Serialize)]
pub struct StateSection {
    pub documents: usize,
    pub last_id: i64,
    pub tokens: usize,
}

/// Build the response shown by the config command
pub async fn build_response(
    args: &ConfigArgs,
    services: &Arc<Services>,
) -> Result<ConfigResponse, Box<dyn std::error::Error>> {
    let config = &services.config;
    let xdg = crate::core::xdg::XdgDirs::new();

    let state = if args.all {
        services.flush_index().await?;
        Some(StateSection {
            documents: services.store.size(),
            last_id: services.store.last_id(),
            tokens: services.index.token_count(),
        })
    } else {
        None
    };

    Ok(ConfigResponse {
        config_file: xdg.config_file().to_string_lossy().into_owned(),
        store: StoreSection {
            snapshot_path: config.store.snapshot_path.to_string_lossy().into_owned(),
            checkpoint_every: config.store.checkpoint_every,
        },
        index: IndexSection {
            analyzer: config.index.analyzer.to_string(),
            min_gram: config.index.min_gram,
            max_gram: config.index.max_gram,
            queue_capacity: config.index.queue_capacity,
            searchable_fields: config.index.searchable_fields.clone(),
            lookups: config
                .index
                .lookups
                .iter()
                .map(|(field, lookup)| {
                    (
                        field.clone(),
                        format!(
                            "{} ({})",
                            lookup.snapshot_path.display(),
                            lookup.label_field
                        ),
                    )
                })
                .collect(),
        },
        search: SearchSection {
            page_size: config.search.page_size,
            max_query_length: config.search.max_query_length,
        },
        state,
    })
}

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = build_response(&args, services).await?;

    match format {
        OutputFormat::Human => {
            println!("{}", colors::label("Configuration:"));
            println!("  config_file: {}", colors::file_path(&response.config_file));
            println!("  store:");
            println!(
                "    snapshot_path: {}",
                colors::file_path(&response.store.snapshot_path)
            );
            println!("    checkpoint_every: {}", response.store.checkpoint_every);
            println!("  index:");
            println!("    analyzer: {}", response.index.analyzer);
            println!("    min_gram: {}", response.index.min_gram);
            println!("    max_gram: {}", response.index.max_gram);
            println!("    queue_capacity: {}", response.index.queue_capacity);
            println!(
                "    searchable_fields: {:?}",
                response.index.searchable_fields
            );
            for (field, source) in &response.index.lookups {
                println!("    lookup {field}: {source}");
            }
            println!("  search:");
            println!("    page_size: {}", response.search.page_size);
            println!("    max_query_length: {}", response.search.max_query_length);
            if let Some(state) = &response.state {
                println!("  state:");
                println!(
                    "    documents: {}",
                    colors::number(&state.documents.to_string())
                );
                println!("    last_id: {}", colors::number(&state.last_id.to_string()));
                println!("    tokens: {}", colors::number(&state.tokens.to_string()));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
