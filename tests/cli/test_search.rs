//! Tests for the search and list commands

use super::test_helpers::{create_cli_test_services, services_with};
use crate::common::hamsun_books;
use folk::cli::commands::search::{execute, execute_list};
use folk::cli::commands::{ListArgs, SearchArgs};
use folk::cli::OutputFormat;

#[tokio::test]
async fn test_search_human_and_json() {
    let (services, _temp_dir) = services_with(&hamsun_books()).await;

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let args = SearchArgs {
            query: "hamsun".to_string(),
        };
        execute(args, &services, format).await.unwrap();
    }
}

#[tokio::test]
async fn test_search_empty_query_fails() {
    let (services, _temp_dir) = create_cli_test_services().await;

    let args = SearchArgs {
        query: "   ".to_string(),
    };
    let err = execute(args, &services, OutputFormat::Human)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "search query missing");
}

#[tokio::test]
async fn test_search_no_matches_succeeds() {
    let (services, _temp_dir) = services_with(&hamsun_books()).await;

    let args = SearchArgs {
        query: "ibsen".to_string(),
    };
    execute(args, &services, OutputFormat::Human).await.unwrap();
}

#[tokio::test]
async fn test_list_pages() {
    let (services, _temp_dir) = services_with(&hamsun_books()).await;

    for page in 0..3 {
        execute_list(ListArgs { page }, &services, OutputFormat::Human)
            .await
            .unwrap();
    }
    execute_list(ListArgs { page: 0 }, &services, OutputFormat::Json)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_empty_store() {
    let (services, _temp_dir) = create_cli_test_services().await;

    execute_list(ListArgs { page: 0 }, &services, OutputFormat::Human)
        .await
        .unwrap();
}
