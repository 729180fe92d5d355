//! Boolean-AND query execution against the search index.

use crate::core::error::Result;
use crate::core::index::{Analyzer, SearchIndex};
use crate::core::search::query::{parse_query, validate_query_length};
use crate::core::types::DocId;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Runs free-text queries against a [`SearchIndex`]
pub struct QueryExecutor {
    index: Arc<dyn SearchIndex>,
    analyzer: Analyzer,
    max_query_length: usize,
}

impl QueryExecutor {
    /// `analyzer` must be the one the index tokenizes documents with
    pub fn new(index: Arc<dyn SearchIndex>, analyzer: Analyzer, max_query_length: usize) -> Self {
        Self {
            index,
            analyzer,
            max_query_length,
        }
    }

    /// Ids of the documents containing every word of `query`
    ///
    /// The index trails the store, so the result may name documents
    /// that no longer exist.
    pub fn execute(&self, query: &str) -> Result<BTreeSet<DocId>> {
        validate_query_length(query, self.max_query_length)?;
        let required = parse_query(query, &self.analyzer)?;

        let hits = self.index.query(&required)?;
        tracing::debug!(
            "Query {:?} matched {} documents",
            required,
            hits.len()
        );

        Ok(hits)
    }
}
