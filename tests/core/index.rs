//! Index integration tests
//!
//! Exercises the synchronizer against the in-memory index and the
//! projection with lookup tables loaded from snapshot files.

use crate::common::{payload, people, test_config, DEPARTMENTS_SNAPSHOT};
use folk::core::config::LookupConfig;
use folk::core::index::{
    Analyzer, AnalyzerKind, IndexSynchronizer, MemoryIndex, Projection, SearchIndex,
};
use folk::core::services::Services;
use folk::core::types::DocId;
use std::sync::Arc;
use tempfile::TempDir;

fn ids(index: &MemoryIndex, tokens: &[&str]) -> Vec<DocId> {
    let tokens: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    index.query(&tokens).unwrap().into_iter().collect()
}

#[test]
fn test_index_unindex_same_text() {
    let index = MemoryIndex::default();
    index.index("Knut Hamsun Sult", 1).unwrap();
    assert_eq!(ids(&index, &["hamsun"]), vec![1]);

    index.unindex("Knut Hamsun Sult", 1).unwrap();
    assert!(ids(&index, &["hamsun"]).is_empty());
}

#[tokio::test]
async fn test_many_updates_to_one_document_converge() {
    let index = Arc::new(MemoryIndex::default());
    let sync = IndexSynchronizer::spawn(
        index.clone(),
        Projection::new(vec!["Title".to_string()]),
        2,
    );

    let mut previous = payload(r#"{"Title":"draft0"}"#);
    sync.on_create(1, &previous).await;
    for n in 1..=50 {
        let next = payload(&format!(r#"{{"Title":"draft{n}"}}"#));
        sync.on_update(1, &previous, &next).await;
        previous = next;
    }
    sync.flush().await.unwrap();

    assert_eq!(ids(&index, &["draft50"]), vec![1]);
    assert!(ids(&index, &["draft49"]).is_empty());
    assert_eq!(index.token_count(), 1);
}

#[tokio::test]
async fn test_concurrent_writers_all_indexed() {
    let index = Arc::new(MemoryIndex::default());
    let sync = Arc::new(IndexSynchronizer::spawn(
        index.clone(),
        Projection::new(vec!["Name".to_string()]),
        8,
    ));

    let tasks: Vec<_> = (1..=20)
        .map(|id| {
            let sync = sync.clone();
            tokio::spawn(async move {
                sync.on_create(id, &payload(r#"{"Name":"shared"}"#)).await;
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }
    sync.flush().await.unwrap();

    assert_eq!(ids(&index, &["shared"]).len(), 20);
}

#[tokio::test]
async fn test_lookup_labels_are_searchable() {
    let temp_dir = TempDir::new().unwrap();
    let departments = temp_dir.path().join("avd.db");
    std::fs::write(&departments, DEPARTMENTS_SNAPSHOT).unwrap();

    let mut config = test_config(&temp_dir);
    config.index.lookups.insert(
        "Department".to_string(),
        LookupConfig {
            snapshot_path: departments,
            label_field: "Name".to_string(),
        },
    );
    let services = Services::open(config).await.unwrap();

    for json in people() {
        services.create(payload(json)).await.unwrap();
    }
    services.flush_index().await.unwrap();

    // "xyz" is the label of department 2, never present in the payloads
    let listing = services.search("mr xyz").unwrap();
    assert_eq!(listing.count, 1);
    assert!(listing.hits.get().contains("Mr. c"));

    assert_eq!(services.search("main").unwrap().count, 1);
    assert_eq!(services.search("2").unwrap().count, 0);
}

#[tokio::test]
async fn test_missing_lookup_snapshot_still_opens() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = test_config(&temp_dir);
    config.index.lookups.insert(
        "Department".to_string(),
        LookupConfig {
            snapshot_path: temp_dir.path().join("absent.db"),
            label_field: "Name".to_string(),
        },
    );

    let services = Services::open(config).await.unwrap();
    services.create(payload(people()[0])).await.unwrap();
    services.flush_index().await.unwrap();

    assert_eq!(services.search("boss").unwrap().count, 1);
}

#[tokio::test]
async fn test_prefix_analyzer_matches_partial_words() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = test_config(&temp_dir);
    config.index.analyzer = AnalyzerKind::Prefix;
    config.index.min_gram = 2;

    let services = Services::open(config).await.unwrap();
    services
        .create(payload(r#"{"Author":"Knut Hamsun","Title":"Sult"}"#))
        .await
        .unwrap();
    services.flush_index().await.unwrap();

    assert_eq!(services.search("ham").unwrap().count, 1);
    assert_eq!(services.search("kn su").unwrap().count, 1);
    // Below min_gram
    assert_eq!(services.search("k").unwrap().count, 0);
}

#[test]
fn test_analyzer_is_deterministic_for_unindex() {
    let analyzer = Analyzer::prefix(1, 5);
    let text = "Mr. Q main boss ÆØÅ";
    assert_eq!(analyzer.tokens(text), analyzer.tokens(text));
}
