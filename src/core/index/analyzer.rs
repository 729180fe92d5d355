//! Text analysis for the keyword index.
//!
//! Tokenization is delegated to tantivy's tokenizer pipeline
//! (`SimpleTokenizer` -> `RemoveLongFilter` -> `LowerCaser`). The
//! prefix analyzer additionally emits the leading n-grams of each
//! token so that partially typed names still match.

use crate::core::error::{FolkError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tantivy::tokenizer::{
    LowerCaser, RemoveLongFilter, SimpleTokenizer, TextAnalyzer, TokenStream,
};

/// Tokens longer than this (in bytes) are dropped
const MAX_TOKEN_LENGTH: usize = 40;

/// Which token set an analyzer produces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerKind {
    /// Lowercased alphanumeric words
    #[default]
    Standard,
    /// Words plus their leading n-grams
    Prefix,
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzerKind::Standard => write!(f, "standard"),
            AnalyzerKind::Prefix => write!(f, "prefix"),
        }
    }
}

impl FromStr for AnalyzerKind {
    type Err = FolkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(AnalyzerKind::Standard),
            "prefix" => Ok(AnalyzerKind::Prefix),
            other => Err(FolkError::ConfigError(format!(
                "Unknown analyzer '{other}' (expected 'standard' or 'prefix')"
            ))),
        }
    }
}

/// Turns a piece of text into the set of tokens it is indexed under
#[derive(Clone)]
pub struct Analyzer {
    kind: AnalyzerKind,
    min_gram: usize,
    max_gram: usize,
    text_analyzer: TextAnalyzer,
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("kind", &self.kind)
            .field("min_gram", &self.min_gram)
            .field("max_gram", &self.max_gram)
            .finish()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::standard()
    }
}

impl Analyzer {
    /// Word analyzer: lowercased alphanumeric runs
    pub fn standard() -> Self {
        Self::build(AnalyzerKind::Standard, 1, 1)
    }

    /// Prefix analyzer: every word plus its prefixes of
    /// `min_gram..=max_gram` characters
    pub fn prefix(min_gram: usize, max_gram: usize) -> Self {
        Self::build(AnalyzerKind::Prefix, min_gram.max(1), max_gram.max(min_gram))
    }

    /// Build the analyzer described by `kind`
    pub fn from_kind(kind: AnalyzerKind, min_gram: usize, max_gram: usize) -> Self {
        match kind {
            AnalyzerKind::Standard => Self::standard(),
            AnalyzerKind::Prefix => Self::prefix(min_gram, max_gram),
        }
    }

    fn build(kind: AnalyzerKind, min_gram: usize, max_gram: usize) -> Self {
        let text_analyzer = TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
            .filter(LowerCaser)
            .build();

        Self {
            kind,
            min_gram,
            max_gram,
            text_analyzer,
        }
    }

    pub fn kind(&self) -> AnalyzerKind {
        self.kind
    }

    /// Analyze `text` into a deduplicated token set
    ///
    /// Indexing and unindexing the same text always yields the same set.
    pub fn tokens(&self, text: &str) -> BTreeSet<String> {
        // token_stream needs &mut; clones share the pipeline definition
        let mut text_analyzer = self.text_analyzer.clone();
        let mut stream = text_analyzer.token_stream(text);

        let mut tokens = BTreeSet::new();
        while stream.advance() {
            let word = &stream.token().text;
            if self.kind == AnalyzerKind::Prefix {
                self.push_prefixes(word, &mut tokens);
            }
            tokens.insert(word.clone());
        }
        tokens
    }

    fn push_prefixes(&self, word: &str, tokens: &mut BTreeSet<String>) {
        // Character boundaries, so multi-byte letters are never split
        let ends = word
            .char_indices()
            .map(|(i, c)| i + c.len_utf8())
            .enumerate();

        for (n, end) in ends {
            let grams = n + 1;
            if grams > self.max_gram {
                break;
            }
            if grams >= self.min_gram {
                tokens.insert(word[..end].to_string());
            }
        }
    }
}
