//! Turns id lists into listings of documents.

use crate::core::error::Result;
use crate::core::storage::DocumentStore;
use crate::core::types::{DocId, Listing};
use serde_json::value::RawValue;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

/// Fetches payloads for listings and search hits
///
/// Ids that are no longer live are dropped without error; search hits
/// can name documents deleted after the index last caught up.
pub struct ResultAssembler {
    store: Arc<DocumentStore>,
    page_size: usize,
}

impl ResultAssembler {
    pub fn new(store: Arc<DocumentStore>, page_size: usize) -> Self {
        Self { store, page_size }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// One page of documents, most recently created first
    pub fn page(&self, page: usize) -> Result<Listing> {
        let start = Instant::now();

        let ids: Vec<DocId> = self
            .store
            .ids()
            .into_iter()
            .rev()
            .skip(page.saturating_mul(self.page_size))
            .take(self.page_size)
            .collect();

        self.assemble(&ids, start)
    }

    /// The documents behind a set of search hits, in ascending id order
    pub fn hits(&self, hits: &BTreeSet<DocId>) -> Result<Listing> {
        let start = Instant::now();
        let ids: Vec<DocId> = hits.iter().copied().collect();
        self.assemble(&ids, start)
    }

    fn assemble(&self, ids: &[DocId], start: Instant) -> Result<Listing> {
        let (json, count) = self.store.collect_several(ids)?;
        if count < ids.len() {
            tracing::debug!("Dropped {} stale ids", ids.len() - count);
        }

        Ok(Listing {
            count,
            time_ms: start.elapsed().as_secs_f64() * 1000.0,
            hits: RawValue::from_string(json)?,
        })
    }
}
