//! Periodic snapshot dumps.

use crate::core::error::Result;
use crate::core::storage::DocumentStore;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Dumps the store to its snapshot file every `every` mutations
#[derive(Debug)]
pub struct Checkpointer {
    store: Arc<DocumentStore>,
    path: PathBuf,
    every: usize,
    pending: Mutex<usize>,
}

impl Checkpointer {
    /// `every == 0` disables periodic dumps; [`flush`](Self::flush)
    /// still works.
    pub fn new(store: Arc<DocumentStore>, path: impl Into<PathBuf>, every: usize) -> Self {
        Self {
            store,
            path: path.into(),
            every,
            pending: Mutex::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mutations recorded since the last dump
    pub fn pending(&self) -> usize {
        *self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count one mutation, dumping when the threshold is reached
    ///
    /// A failed dump is logged and the counter keeps running, so the
    /// next mutation retries.
    pub fn record_mutation(&self) {
        if self.every == 0 {
            return;
        }

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        *pending += 1;
        if *pending < self.every {
            return;
        }

        match self.store.dump(&self.path) {
            Ok(()) => {
                tracing::info!(
                    "Checkpointed {} documents to {:?}",
                    self.store.size(),
                    self.path
                );
                *pending = 0;
            }
            Err(e) => tracing::warn!("Checkpoint to {:?} failed: {}", self.path, e),
        }
    }

    /// Dump now, regardless of the mutation count
    pub fn flush(&self) -> Result<()> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        self.store.dump(&self.path)?;
        *pending = 0;
        tracing::debug!("Flushed snapshot to {:?}", self.path);
        Ok(())
    }
}
