//! Unified service container for folk
//!
//! Owns the store, the index and everything that keeps them in step.
//! Built once at startup and shared by reference.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::index::{
    Analyzer, IndexSynchronizer, LookupTable, MemoryIndex, Projection, SearchIndex,
};
use crate::core::search::{QueryExecutor, ResultAssembler};
use crate::core::storage::{Checkpointer, DocumentStore};
use crate::core::types::{DocId, Listing, Payload};
use std::sync::Arc;

/// Unified services container
///
/// Every write goes through here so that the store, the index queue
/// and the checkpoint counter see the same sequence of mutations.
#[derive(Clone)]
pub struct Services {
    /// Authoritative document store
    pub store: Arc<DocumentStore>,

    /// Keyword index fed by the synchronizer
    pub index: Arc<MemoryIndex>,

    /// Queue from store mutations to index updates
    pub synchronizer: Arc<IndexSynchronizer>,

    /// Query -> id set
    pub executor: Arc<QueryExecutor>,

    /// Id set -> listing
    pub assembler: Arc<ResultAssembler>,

    /// Periodic snapshot dumps
    pub checkpointer: Arc<Checkpointer>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Load the configured snapshot (if any) and start indexing it
    ///
    /// Must be called from within a tokio runtime.
    pub async fn open(config: Config) -> Result<Self> {
        let path = &config.store.snapshot_path;
        let store = if path.exists() {
            let store = DocumentStore::from_file(path)?;
            tracing::info!("Loaded {} documents from {:?}", store.size(), path);
            store
        } else {
            tracing::info!("No snapshot at {:?}, starting empty", path);
            DocumentStore::new()
        };

        let services = Self::with_store(config, store)?;
        services.synchronizer.reindex_all(&services.store).await;
        Ok(services)
    }

    /// Wire up services around an existing store
    ///
    /// Nothing is indexed yet; call
    /// [`IndexSynchronizer::reindex_all`] for documents already in
    /// `store`. Must be called from within a tokio runtime.
    pub fn with_store(config: Config, store: DocumentStore) -> Result<Self> {
        let store = Arc::new(store);

        let analyzer = Analyzer::from_kind(
            config.index.analyzer,
            config.index.min_gram,
            config.index.max_gram,
        );
        let index = Arc::new(MemoryIndex::new(analyzer.clone()));

        let mut projection = Projection::new(config.index.searchable_fields.clone());
        for (field, lookup) in &config.index.lookups {
            let table = if lookup.snapshot_path.exists() {
                let source = DocumentStore::from_file(&lookup.snapshot_path)?;
                LookupTable::from_store(&source, &lookup.label_field)
            } else {
                tracing::warn!(
                    "Lookup snapshot {:?} for '{}' not found, values will not resolve",
                    lookup.snapshot_path,
                    field
                );
                LookupTable::default()
            };
            tracing::debug!("Lookup '{}' has {} labels", field, table.len());
            projection = projection.with_lookup(field.clone(), table);
        }

        let search_index: Arc<dyn SearchIndex> = index.clone();
        let synchronizer = Arc::new(IndexSynchronizer::spawn(
            Arc::clone(&search_index),
            projection,
            config.index.queue_capacity,
        ));
        let executor = Arc::new(QueryExecutor::new(
            search_index,
            analyzer,
            config.search.max_query_length,
        ));
        let assembler = Arc::new(ResultAssembler::new(
            Arc::clone(&store),
            config.search.page_size,
        ));
        let checkpointer = Arc::new(Checkpointer::new(
            Arc::clone(&store),
            config.store.snapshot_path.clone(),
            config.store.checkpoint_every,
        ));

        Ok(Self {
            store,
            index,
            synchronizer,
            executor,
            assembler,
            checkpointer,
            config: Arc::new(config),
        })
    }

    /// Store a new document and queue it for indexing
    pub async fn create(&self, payload: Payload) -> Result<DocId> {
        let slot = self.synchronizer.reserve().await;
        let id = self
            .store
            .create_with(payload, |id, payload| slot.created(id, payload))?;
        self.checkpointer.record_mutation();
        Ok(id)
    }

    pub fn get(&self, id: DocId) -> Result<Payload> {
        self.store.get(id)
    }

    /// Insert or overwrite the document at `id`, reindexing it
    pub async fn set(&self, id: DocId, payload: Payload) -> Result<()> {
        let slot = self.synchronizer.reserve().await;
        self.store
            .set_with(id, payload, |previous, payload| {
                slot.updated(id, previous, payload)
            });
        self.checkpointer.record_mutation();
        Ok(())
    }

    /// Delete a document; `false` when it did not exist
    pub async fn delete(&self, id: DocId) -> bool {
        let slot = self.synchronizer.reserve().await;
        if self
            .store
            .remove_with(id, |previous| slot.deleted(id, previous))
            .is_none()
        {
            return false;
        }
        self.checkpointer.record_mutation();
        true
    }

    /// One page of documents, newest first
    pub fn page(&self, page: usize) -> Result<Listing> {
        self.assembler.page(page)
    }

    /// Documents matching every word of `query`
    pub fn search(&self, query: &str) -> Result<Listing> {
        let hits = self.executor.execute(query)?;
        self.assembler.hits(&hits)
    }

    /// Wait for queued index updates to land
    pub async fn flush_index(&self) -> Result<()> {
        self.synchronizer.flush().await
    }

    /// Dump the store to the snapshot path now
    pub fn checkpoint(&self) -> Result<()> {
        self.checkpointer.flush()
    }

    /// Drain the index queue and write a final snapshot
    pub async fn shutdown(&self) -> Result<()> {
        self.synchronizer.shutdown().await;
        self.checkpoint()?;
        tracing::info!(
            "Shut down with {} documents in {:?}",
            self.store.size(),
            self.checkpointer.path()
        );
        Ok(())
    }
}
