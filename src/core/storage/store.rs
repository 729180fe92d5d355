//! In-memory document store.
//!
//! The payload map, the liveset and the id counter live behind one
//! readers-writer lock and change together on every write. The map is
//! ordered by id, so its key set *is* the liveset and the two can never
//! disagree.

use crate::core::error::{FolkError, Result};
use crate::core::storage::snapshot;
use crate::core::types::{DocId, Payload};
use serde_json::value::RawValue;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct StoreState {
    /// Live documents; the key set is the liveset
    docs: BTreeMap<DocId, Payload>,

    /// Highest id ever allocated or set
    id_max: DocId,
}

impl StoreState {
    fn upsert(&mut self, id: DocId, payload: Payload) -> Option<Payload> {
        if id > self.id_max {
            self.id_max = id;
        }
        self.docs.insert(id, payload)
    }
}

/// Concurrent map from document id to JSON payload
#[derive(Debug, Default)]
pub struct DocumentStore {
    state: RwLock<StoreState>,
}

impl DocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a snapshot file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let store = Self::new();
        store.load(path)?;
        Ok(store)
    }

    // Writers never panic between reading and updating the state, so a
    // poisoned lock still guards a consistent map and counter.
    fn read_state(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a new document and return its freshly allocated id
    pub fn create(&self, payload: Payload) -> Result<DocId> {
        self.create_with(payload, |_, _| {})
    }

    /// [`create`](Self::create), calling `then` with the new id while
    /// the write lock is still held
    ///
    /// Work done in `then` is ordered exactly like the store writes, so
    /// no other writer can touch the new id before it runs. `then` is
    /// not called when the create fails.
    pub fn create_with<F>(&self, payload: Payload, then: F) -> Result<DocId>
    where
        F: FnOnce(DocId, &RawValue),
    {
        let mut state = self.write_state();
        let id = state
            .id_max
            .checked_add(1)
            .ok_or(FolkError::IdSpaceExhausted)?;
        then(id, &*payload);
        state.upsert(id, payload);
        Ok(id)
    }

    /// Current payload of a live document
    pub fn get(&self, id: DocId) -> Result<Payload> {
        self.read_state()
            .docs
            .get(&id)
            .cloned()
            .ok_or(FolkError::NotFound(id))
    }

    /// Whether `id` is live
    pub fn contains(&self, id: DocId) -> bool {
        self.read_state().docs.contains_key(&id)
    }

    /// Insert or overwrite the document at `id`
    ///
    /// `id` does not need to be live. The id counter is advanced to at
    /// least `id`, so later creates never collide with it. Returns the
    /// payload that was replaced, if any.
    pub fn set(&self, id: DocId, payload: Payload) -> Option<Payload> {
        self.set_with(id, payload, |_, _| {})
    }

    /// [`set`](Self::set), calling `then` with the replaced and the new
    /// payload while the write lock is still held
    pub fn set_with<F>(&self, id: DocId, payload: Payload, then: F) -> Option<Payload>
    where
        F: FnOnce(Option<&RawValue>, &RawValue),
    {
        let mut state = self.write_state();
        then(state.docs.get(&id).map(|previous| &**previous), &*payload);
        state.upsert(id, payload)
    }

    /// Remove a document, returning its last payload
    pub fn remove(&self, id: DocId) -> Option<Payload> {
        self.remove_with(id, |_| {})
    }

    /// [`remove`](Self::remove), calling `then` with the removed payload
    /// while the write lock is still held
    ///
    /// `then` is not called when `id` was not live.
    pub fn remove_with<F>(&self, id: DocId, then: F) -> Option<Payload>
    where
        F: FnOnce(&RawValue),
    {
        let mut state = self.write_state();
        let removed = state.docs.remove(&id)?;
        then(&*removed);
        Some(removed)
    }

    /// Remove a document; `false` when it was already absent
    pub fn del(&self, id: DocId) -> bool {
        self.remove(id).is_some()
    }

    /// Number of live documents
    pub fn size(&self) -> usize {
        self.read_state().docs.len()
    }

    /// Highest id allocated or set so far
    pub fn last_id(&self) -> DocId {
        self.read_state().id_max
    }

    /// Live ids in ascending order
    pub fn ids(&self) -> Vec<DocId> {
        self.read_state().docs.keys().copied().collect()
    }

    /// Copies of every live document in ascending id order
    pub fn entries(&self) -> Vec<(DocId, Payload)> {
        self.read_state()
            .docs
            .iter()
            .map(|(id, payload)| (*id, payload.clone()))
            .collect()
    }

    /// Every live document as a snapshot array, in ascending id order
    pub fn all(&self) -> Result<String> {
        let state = self.read_state();
        snapshot::encode(state.docs.iter().map(|(id, payload)| (*id, payload.as_ref())))
    }

    /// The named documents as a snapshot array, in the given order
    ///
    /// Ids that are not live are skipped. An empty `ids` yields the
    /// literal `null`, which existing consumers expect.
    pub fn get_several(&self, ids: &[DocId]) -> Result<String> {
        self.collect_several(ids).map(|(json, _)| json)
    }

    /// Like [`get_several`](Self::get_several), also reporting how many
    /// documents made it into the output
    pub fn collect_several(&self, ids: &[DocId]) -> Result<(String, usize)> {
        if ids.is_empty() {
            return Ok((snapshot::EMPTY_SELECTION.to_string(), 0));
        }

        let state = self.read_state();
        let found: Vec<_> = ids
            .iter()
            .filter_map(|id| state.docs.get(id).map(|payload| (*id, payload.as_ref())))
            .collect();
        let count = found.len();

        Ok((snapshot::encode(found)?, count))
    }

    /// Write a full snapshot to `path`
    pub fn dump(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.all()?;
        snapshot::write_atomic(path.as_ref(), json.as_bytes())
    }

    /// Replay a snapshot file into this store
    ///
    /// The whole file is parsed before anything is applied, so a
    /// malformed snapshot leaves the store untouched. Records are applied
    /// with `set` semantics under a single write lock. Returns the number
    /// of records applied.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<usize> {
        let bytes = std::fs::read(path.as_ref())?;
        self.restore(&bytes)
    }

    /// Replay snapshot bytes into this store; see [`load`](Self::load)
    pub fn restore(&self, bytes: &[u8]) -> Result<usize> {
        let records = snapshot::decode(bytes)?;
        let count = records.len();

        let mut state = self.write_state();
        for record in records {
            state.upsert(record.id, record.data);
        }

        Ok(count)
    }
}
