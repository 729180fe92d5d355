//! Tests for the show-config command

use super::test_helpers::{create_cli_test_services, services_with};
use crate::common::hamsun_books;
use folk::cli::commands::config::{build_response, execute};
use folk::cli::commands::ConfigArgs;
use folk::cli::OutputFormat;

#[tokio::test]
async fn test_config_response_reflects_services() {
    let (services, temp_dir) = create_cli_test_services().await;

    let response = build_response(&ConfigArgs { all: false }, &services)
        .await
        .unwrap();

    assert_eq!(
        response.store.snapshot_path,
        temp_dir.path().join("folk.db").to_string_lossy()
    );
    assert_eq!(response.index.analyzer, "standard");
    assert_eq!(response.search.page_size, 150);
    assert!(response.state.is_none());
}

#[tokio::test]
async fn test_config_all_includes_state() {
    let (services, _temp_dir) = services_with(&hamsun_books()).await;

    let response = build_response(&ConfigArgs { all: true }, &services)
        .await
        .unwrap();

    let state = response.state.unwrap();
    assert_eq!(state.documents, 2);
    assert_eq!(state.last_id, 2);
    assert!(state.tokens > 0);
}

#[tokio::test]
async fn test_config_execute_both_formats() {
    let (services, _temp_dir) = create_cli_test_services().await;

    for format in [OutputFormat::Human, OutputFormat::Json] {
        execute(ConfigArgs { all: true }, &services, format)
            .await
            .unwrap();
    }
}
