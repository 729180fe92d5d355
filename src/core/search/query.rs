//! Query parsing.
//!
//! Queries have no operators: every whitespace-separated word is
//! required. Each word is run through the index's analyzer, so a query
//! splits words exactly where indexing did: `Anne-Lise` requires both
//! `anne` and `lise`, and `Mr.` requires `mr`.

use crate::core::error::{FolkError, Result};
use crate::core::index::Analyzer;

/// Split a query into its required tokens
///
/// Words keep their first-seen order and tokens are deduplicated. A
/// query that yields no token at all fails with
/// [`FolkError::EmptyQuery`].
///
/// # Examples
///
/// ```
/// use folk::core::index::Analyzer;
/// use folk::core::search::parse_query;
///
/// let analyzer = Analyzer::standard();
/// assert_eq!(
///     parse_query("Knut  HAMSUN knut", &analyzer).unwrap(),
///     vec!["knut", "hamsun"]
/// );
/// assert!(parse_query("   ", &analyzer).is_err());
/// ```
pub fn parse_query(query: &str, analyzer: &Analyzer) -> Result<Vec<String>> {
    let mut tokens: Vec<String> = Vec::new();

    for word in query.to_lowercase().split_whitespace() {
        for token in analyzer.tokens(word) {
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }
    }

    if tokens.is_empty() {
        return Err(FolkError::EmptyQuery);
    }

    Ok(tokens)
}

/// Reject queries longer than `max_length` characters
pub fn validate_query_length(query: &str, max_length: usize) -> Result<()> {
    let length = query.chars().count();
    if length > max_length {
        return Err(FolkError::InvalidQuery(format!(
            "query is {length} characters, maximum is {max_length}"
        )));
    }
    Ok(())
}
