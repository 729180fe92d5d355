//! Keyword index over document projections.
//!
//! - **Analyzer**: text -> token set (tantivy tokenizer pipeline)
//! - **SearchIndex** / **MemoryIndex**: token -> posting list
//! - **Projection**: payload -> searchable text, with id lookups
//! - **IndexSynchronizer**: applies store mutations to the index
//!   through a bounded queue and a single worker task
//!
//! The index trails the store: a search may briefly return ids that
//! were just deleted, and result assembly drops them.

pub mod analyzer;
pub mod postings;
pub mod projection;
pub mod synchronizer;

pub use analyzer::{Analyzer, AnalyzerKind};
pub use postings::{MemoryIndex, SearchIndex};
pub use projection::{LookupTable, Projection};
pub use synchronizer::{IndexCommand, IndexSlot, IndexSynchronizer};
