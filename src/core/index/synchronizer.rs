//! Keeps the search index aligned with the document store.
//!
//! Store writes hand the synchronizer a command and return. A single
//! worker task drains a bounded queue and is the only writer of the
//! index, so commands for one document are applied in the order they
//! were enqueued. A full queue makes the writer wait instead of piling
//! up work.

use crate::core::error::{FolkError, Result};
use crate::core::index::postings::SearchIndex;
use crate::core::index::projection::Projection;
use crate::core::storage::DocumentStore;
use crate::core::types::DocId;
use serde_json::value::RawValue;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Work item for the index worker
pub enum IndexCommand {
    Index { text: String, id: DocId },
    Unindex { text: String, id: DocId },
    /// Remove `old` then add `new`, as one step
    Reindex { old: String, new: String, id: DocId },
    /// Acknowledged once everything queued before it is applied
    Flush(oneshot::Sender<()>),
}

impl fmt::Debug for IndexCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexCommand::Index { id, .. } => write!(f, "Index({id})"),
            IndexCommand::Unindex { id, .. } => write!(f, "Unindex({id})"),
            IndexCommand::Reindex { id, .. } => write!(f, "Reindex({id})"),
            IndexCommand::Flush(_) => write!(f, "Flush"),
        }
    }
}

/// Feeds store mutations to a [`SearchIndex`] off the write path
pub struct IndexSynchronizer {
    projection: Projection,
    sender: Mutex<Option<mpsc::Sender<IndexCommand>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl IndexSynchronizer {
    /// Spawn the worker on the current tokio runtime
    pub fn spawn(index: Arc<dyn SearchIndex>, projection: Projection, capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let worker = tokio::spawn(run_worker(index, receiver));

        Self {
            projection,
            sender: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
        }
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Whether the worker still accepts commands
    pub fn is_running(&self) -> bool {
        self.sender().is_some_and(|s| !s.is_closed())
    }

    fn sender(&self) -> Option<mpsc::Sender<IndexCommand>> {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reserve room in the queue for one command
    ///
    /// Waits while the queue is full. Reserving before taking the store's
    /// write lock and filling the slot under it makes index commands for
    /// an id follow the order of that id's store writes.
    pub async fn reserve(&self) -> IndexSlot<'_> {
        let permit = match self.sender() {
            Some(sender) => sender.reserve_owned().await.ok(),
            None => None,
        };
        IndexSlot {
            synchronizer: self,
            permit,
        }
    }

    /// Queue indexing of a newly created document
    pub async fn on_create(&self, id: DocId, payload: &RawValue) {
        self.reserve().await.created(id, payload);
    }

    /// Queue replacement of `old`'s tokens with `new`'s
    pub async fn on_update(&self, id: DocId, old: &RawValue, new: &RawValue) {
        self.reserve().await.updated(id, Some(old), new);
    }

    /// Queue removal of a deleted document's tokens
    pub async fn on_delete(&self, id: DocId, payload: &RawValue) {
        self.reserve().await.deleted(id, payload);
    }

    /// Queue indexing of every live document in `store`
    pub async fn reindex_all(&self, store: &DocumentStore) -> usize {
        let entries = store.entries();
        let count = entries.len();
        for (id, payload) in entries {
            self.on_create(id, &payload).await;
        }
        tracing::info!("Queued {} documents for indexing", count);
        count
    }

    /// Wait until every command queued so far has been applied
    pub async fn flush(&self) -> Result<()> {
        let sender = self.sender().ok_or(FolkError::SynchronizerClosed)?;
        let (ack, done) = oneshot::channel();
        sender
            .send(IndexCommand::Flush(ack))
            .await
            .map_err(|_| FolkError::SynchronizerClosed)?;
        done.await.map_err(|_| FolkError::SynchronizerClosed)
    }

    /// Stop accepting commands and wait for the queue to drain
    pub async fn shutdown(&self) {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let worker = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(worker) = worker {
            if let Err(e) = worker.await {
                tracing::warn!("Index worker ended abnormally: {}", e);
            }
        }
        tracing::debug!("Index synchronizer stopped");
    }

    fn project(&self, id: DocId, payload: &RawValue) -> Option<String> {
        match self.projection.project(payload) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!("Skipping index update for document {}: {}", id, e);
                None
            }
        }
    }
}

/// A reserved place in the index queue
///
/// Filling the slot never blocks, so it can be done while holding the
/// store's write lock. Dropping an unfilled slot frees the place.
pub struct IndexSlot<'a> {
    synchronizer: &'a IndexSynchronizer,
    permit: Option<mpsc::OwnedPermit<IndexCommand>>,
}

impl IndexSlot<'_> {
    /// Fill with the indexing of a newly created document
    pub fn created(self, id: DocId, payload: &RawValue) {
        let command = self
            .synchronizer
            .project(id, payload)
            .map(|text| IndexCommand::Index { text, id });
        self.send(command);
    }

    /// Fill with the replacement of `old`'s tokens by `new`'s
    ///
    /// Without an `old` payload this is a plain index.
    pub fn updated(self, id: DocId, old: Option<&RawValue>, new: &RawValue) {
        let old = old.and_then(|old| self.synchronizer.project(id, old));
        let command = match (old, self.synchronizer.project(id, new)) {
            (Some(old), Some(new)) => Some(IndexCommand::Reindex { old, new, id }),
            (None, Some(text)) => Some(IndexCommand::Index { text, id }),
            (Some(text), None) => Some(IndexCommand::Unindex { text, id }),
            (None, None) => None,
        };
        self.send(command);
    }

    /// Fill with the removal of a deleted document's tokens
    pub fn deleted(self, id: DocId, payload: &RawValue) {
        let command = self
            .synchronizer
            .project(id, payload)
            .map(|text| IndexCommand::Unindex { text, id });
        self.send(command);
    }

    fn send(self, command: Option<IndexCommand>) {
        match (self.permit, command) {
            (Some(permit), Some(command)) => {
                permit.send(command);
            }
            (None, Some(command)) => {
                tracing::warn!("Index synchronizer stopped, dropping {:?}", command);
            }
            (_, None) => {}
        }
    }
}

async fn run_worker(index: Arc<dyn SearchIndex>, mut receiver: mpsc::Receiver<IndexCommand>) {
    while let Some(command) = receiver.recv().await {
        tracing::debug!("Applying {:?}", command);
        let result = match command {
            IndexCommand::Index { text, id } => index.index(&text, id),
            IndexCommand::Unindex { text, id } => index.unindex(&text, id),
            IndexCommand::Reindex { old, new, id } => {
                index.unindex(&old, id).and_then(|()| index.index(&new, id))
            }
            IndexCommand::Flush(ack) => {
                // The flusher may have given up waiting
                let _ = ack.send(());
                Ok(())
            }
        };
        if let Err(e) = result {
            tracing::warn!("Index update failed: {}", e);
        }
    }
}
