//! CLI test helpers
//!
//! Provides Arc<Services> wrappers matching CLI execute() signatures.

use crate::common::{payload, test_config};
use folk::cli::commands::document::PayloadArgs;
use folk::core::services::Services;
use std::sync::Arc;
use tempfile::TempDir;

/// Create test services wrapped in Arc (matching CLI execute() signatures)
pub async fn create_cli_test_services() -> (Arc<Services>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let services = Services::open(test_config(&temp_dir))
        .await
        .expect("Failed to open services");
    (Arc::new(services), temp_dir)
}

/// Services with the given documents already stored and indexed
pub async fn services_with(docs: &[&str]) -> (Arc<Services>, TempDir) {
    let (services, temp_dir) = create_cli_test_services().await;
    for json in docs {
        services.create(payload(json)).await.expect("Failed to create");
    }
    services.flush_index().await.expect("Failed to flush index");
    (services, temp_dir)
}

/// Payload arguments carrying inline JSON
pub fn inline(json: &str) -> PayloadArgs {
    PayloadArgs {
        json: Some(json.to_string()),
        file: None,
    }
}
