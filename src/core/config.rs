//! Configuration management for the folk document store.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{FolkError, Result};
use crate::core::index::AnalyzerKind;
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Document store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Snapshot file the store is loaded from and checkpointed to
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,

    /// Dump the store after this many mutations (0 disables)
    #[serde(default = "default_checkpoint_every")]
    pub checkpoint_every: usize,
}

/// Search index configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexConfig {
    /// Analyzer used to turn projections into tokens
    #[serde(default)]
    pub analyzer: AnalyzerKind,

    /// Shortest prefix emitted by the prefix analyzer
    #[serde(default = "default_min_gram")]
    pub min_gram: usize,

    /// Longest prefix emitted by the prefix analyzer
    #[serde(default = "default_max_gram")]
    pub max_gram: usize,

    /// Capacity of the synchronizer command queue
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Payload fields concatenated into the searchable text
    #[serde(default = "default_searchable_fields")]
    pub searchable_fields: Vec<String>,

    /// Per-field id -> label resolution tables
    #[serde(default)]
    pub lookups: BTreeMap<String, LookupConfig>,
}

/// A lookup table loaded from another snapshot
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupConfig {
    /// Snapshot holding the referenced documents
    pub snapshot_path: PathBuf,

    /// Field of the referenced documents used as the label
    #[serde(default = "default_label_field")]
    pub label_field: String,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Number of documents in one listing page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Maximum query string length
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,
}

// Default value functions
fn default_snapshot_path() -> PathBuf {
    PathBuf::from("./data/folk.db")
}

fn default_checkpoint_every() -> usize {
    15
}

fn default_min_gram() -> usize {
    1
}

fn default_max_gram() -> usize {
    20
}

fn default_queue_capacity() -> usize {
    1024
}

fn default_searchable_fields() -> Vec<String> {
    vec![
        "Name".to_string(),
        "Department".to_string(),
        "Role".to_string(),
        "Info".to_string(),
    ]
}

fn default_label_field() -> String {
    "Name".to_string()
}

fn default_page_size() -> usize {
    150
}

fn default_max_query_length() -> usize {
    500
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            checkpoint_every: default_checkpoint_every(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerKind::default(),
            min_gram: default_min_gram(),
            max_gram: default_max_gram(),
            queue_capacity: default_queue_capacity(),
            searchable_fields: default_searchable_fields(),
            lookups: BTreeMap::new(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_query_length: default_max_query_length(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| FolkError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. FOLK_CONFIG env var
    /// 2. XDG config file (~/.config/folk/config.toml)
    /// 3. ./folk.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("FOLK_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("folk.toml").exists() {
                Self::from_file("folk.toml")?
            } else {
                Self::default()
            }
        };

        // Keep snapshots under the XDG data directory unless told otherwise
        if env::var("FOLK_SNAPSHOT_PATH").is_err()
            && config.store.snapshot_path == default_snapshot_path()
        {
            config.store.snapshot_path = xdg.snapshot_file();
        }

        config.merge_env()?;
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) -> Result<()> {
        if let Ok(path) = env::var("FOLK_SNAPSHOT_PATH") {
            self.store.snapshot_path = PathBuf::from(path);
        }
        if let Ok(every) = env::var("FOLK_CHECKPOINT_EVERY") {
            if let Ok(n) = every.parse() {
                self.store.checkpoint_every = n;
            }
        }

        if let Ok(analyzer) = env::var("FOLK_ANALYZER") {
            self.index.analyzer = analyzer.parse()?;
        }
        if let Ok(capacity) = env::var("FOLK_QUEUE_CAPACITY") {
            if let Ok(c) = capacity.parse() {
                self.index.queue_capacity = c;
            }
        }

        if let Ok(page_size) = env::var("FOLK_PAGE_SIZE") {
            if let Ok(size) = page_size.parse() {
                self.search.page_size = size;
            }
        }
        if let Ok(max_query_len) = env::var("FOLK_MAX_QUERY_LENGTH") {
            if let Ok(len) = max_query_len.parse() {
                self.search.max_query_length = len;
            }
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.index.searchable_fields.is_empty() {
            return Err(FolkError::ConfigError(
                "At least one searchable field is required".to_string(),
            ));
        }

        if self.index.queue_capacity == 0 {
            return Err(FolkError::ConfigError(
                "Queue capacity must be non-zero".to_string(),
            ));
        }

        if self.index.min_gram == 0 {
            return Err(FolkError::ConfigError(
                "Minimum gram size must be non-zero".to_string(),
            ));
        }

        if self.index.min_gram > self.index.max_gram {
            return Err(FolkError::ConfigError(
                "Minimum gram size cannot exceed maximum gram size".to_string(),
            ));
        }

        for (field, lookup) in &self.index.lookups {
            if lookup.label_field.is_empty() {
                return Err(FolkError::ConfigError(format!(
                    "Lookup for '{field}' needs a label field"
                )));
            }
        }

        if self.search.page_size == 0 {
            return Err(FolkError::ConfigError(
                "Page size must be non-zero".to_string(),
            ));
        }

        if self.search.max_query_length == 0 {
            return Err(FolkError::ConfigError(
                "Max query length must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Snapshot: {:?}", self.store.snapshot_path);
        tracing::info!("  Checkpoint every: {} edits", self.store.checkpoint_every);
        tracing::info!("  Analyzer: {}", self.index.analyzer);
        if self.index.analyzer == AnalyzerKind::Prefix {
            tracing::info!(
                "  Gram sizes: {}..={}",
                self.index.min_gram,
                self.index.max_gram
            );
        }
        tracing::info!("  Queue capacity: {}", self.index.queue_capacity);
        tracing::info!(
            "  Searchable fields: {}",
            self.index.searchable_fields.join(", ")
        );
        for (field, lookup) in &self.index.lookups {
            tracing::info!(
                "  Lookup {}: {:?} ({})",
                field,
                lookup.snapshot_path,
                lookup.label_field
            );
        }
        tracing::info!("  Page size: {}", self.search.page_size);
        tracing::info!("  Max query length: {}", self.search.max_query_length);
    }
}
