//! Keyword search over the document store.
//!
//! The executor resolves a query to a set of ids through the index and
//! the assembler fetches the matching documents from the store.

mod executor;
mod query;
mod results;

pub use executor::QueryExecutor;
pub use query::{parse_query, validate_query_length};
pub use results::ResultAssembler;
