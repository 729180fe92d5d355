//! Inverted index from token to the documents containing it.

use crate::core::error::{FolkError, Result};
use crate::core::index::analyzer::Analyzer;
use crate::core::types::DocId;
use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

/// Keyword index consumed by the synchronizer and the query executor
///
/// Implementations must be safe for concurrent use: queries run while
/// the synchronizer applies index mutations.
pub trait SearchIndex: Send + Sync {
    /// Analyze `text` and add `id` to the posting list of every token
    fn index(&self, text: &str, id: DocId) -> Result<()>;

    /// Analyze `text` and remove `id` from the posting list of every token
    ///
    /// Removal is token-based: it only undoes an earlier `index` call if
    /// `text` is the same text that was indexed.
    fn unindex(&self, text: &str, id: DocId) -> Result<()>;

    /// Documents present in the posting lists of all `required` tokens
    fn query(&self, required: &[String]) -> Result<BTreeSet<DocId>>;
}

/// In-memory posting lists guarded by a readers-writer lock
#[derive(Debug, Default)]
pub struct MemoryIndex {
    analyzer: Analyzer,
    postings: RwLock<HashMap<String, BTreeSet<DocId>>>,
}

impl MemoryIndex {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            postings: RwLock::new(HashMap::new()),
        }
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Number of distinct tokens with at least one posting
    pub fn token_count(&self) -> usize {
        self.postings.read().map(|p| p.len()).unwrap_or(0)
    }

    /// Posting list for a single token (empty when unknown)
    pub fn postings_for(&self, token: &str) -> Result<BTreeSet<DocId>> {
        let postings = self.postings.read().map_err(poisoned)?;
        Ok(postings.get(token).cloned().unwrap_or_default())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> FolkError {
    FolkError::IndexingFailed("posting lists lock poisoned".to_string())
}

impl SearchIndex for MemoryIndex {
    fn index(&self, text: &str, id: DocId) -> Result<()> {
        let tokens = self.analyzer.tokens(text);
        let mut postings = self.postings.write().map_err(poisoned)?;
        for token in tokens {
            postings.entry(token).or_default().insert(id);
        }
        Ok(())
    }

    fn unindex(&self, text: &str, id: DocId) -> Result<()> {
        let tokens = self.analyzer.tokens(text);
        let mut postings = self.postings.write().map_err(poisoned)?;
        for token in tokens {
            if let Some(ids) = postings.get_mut(&token) {
                ids.remove(&id);
                if ids.is_empty() {
                    postings.remove(&token);
                }
            }
        }
        Ok(())
    }

    fn query(&self, required: &[String]) -> Result<BTreeSet<DocId>> {
        if required.is_empty() {
            return Ok(BTreeSet::new());
        }

        let postings = self.postings.read().map_err(poisoned)?;

        let mut lists = Vec::with_capacity(required.len());
        for token in required {
            match postings.get(token) {
                Some(ids) => lists.push(ids),
                // One missing token empties the intersection
                None => return Ok(BTreeSet::new()),
            }
        }

        // Intersect starting from the shortest list
        lists.sort_by_key(|ids| ids.len());
        let Some((first, rest)) = lists.split_first() else {
            return Ok(BTreeSet::new());
        };
        let hits = first
            .iter()
            .filter(|id| rest.iter().all(|ids| ids.contains(*id)))
            .copied()
            .collect();

        Ok(hits)
    }
}
