// Common test utilities and fixtures

pub mod fixtures;

// Re-export commonly used items
// Note: These may appear unused in unit tests but are used in integration tests
#[allow(unused_imports)]
pub use fixtures::{hamsun_books, people, BOOKS_SNAPSHOT, DEPARTMENTS_SNAPSHOT};
#[allow(unused_imports)]
pub use helpers::{create_test_services, payload, test_config};
