//! Storage layer for the in-memory document store.
//!
//! # Architecture
//!
//! - **DocumentStore**: id -> JSON payload map behind one readers-writer lock
//! - **snapshot**: `{ID, Data}` array encoding and atomic file writes
//! - **Checkpointer**: periodic dumps after a number of mutations
//!
//! # Snapshot Format
//!
//! ```text
//! [{"ID":1,"Data":{"Author":"Knut Hamsun","Title":"Sult","Issued":1890}},
//!  {"ID":2,"Data":{"Author":"Knut Hamsun","Title":"Pan","Issued":1894}}]
//! ```
//!
//! Written compact on one line, in ascending id order.

mod checkpoint;
pub mod snapshot;
mod store;

pub use checkpoint::Checkpointer;
pub use store::DocumentStore;
