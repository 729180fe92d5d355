//! Denormalized text projection of a document.
//!
//! The searchable text of a document is the space-joined rendering of
//! a fixed list of payload fields. Numeric fields that reference other
//! documents (a department id, say) can be resolved to a label through
//! a [`LookupTable`] so that the label, not the number, gets indexed.

use crate::core::error::{FolkError, Result};
use crate::core::storage::DocumentStore;
use crate::core::types::DocId;
use serde_json::Value;
use serde_json::value::RawValue;
use std::collections::HashMap;

/// Id -> label map built from a store of referenced documents
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    labels: HashMap<DocId, String>,
}

impl LookupTable {
    pub fn new(labels: HashMap<DocId, String>) -> Self {
        Self { labels }
    }

    /// Build a table from every document in `store` that has a string
    /// `label_field`; documents without one are skipped.
    pub fn from_store(store: &DocumentStore, label_field: &str) -> Self {
        let mut labels = HashMap::new();
        for (id, payload) in store.entries() {
            let label = serde_json::from_str::<Value>(payload.get())
                .ok()
                .and_then(|v| v.get(label_field).and_then(Value::as_str).map(str::to_string));
            match label {
                Some(label) => {
                    labels.insert(id, label);
                }
                None => tracing::debug!("Lookup document {} has no '{}' label", id, label_field),
            }
        }
        Self { labels }
    }

    pub fn get(&self, id: DocId) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Renders a payload into the text the index sees
#[derive(Debug, Clone)]
pub struct Projection {
    fields: Vec<String>,
    lookups: HashMap<String, LookupTable>,
}

impl Projection {
    pub fn new(fields: Vec<String>) -> Self {
        Self {
            fields,
            lookups: HashMap::new(),
        }
    }

    /// Resolve numeric values of `field` through `table`
    pub fn with_lookup(mut self, field: impl Into<String>, table: LookupTable) -> Self {
        self.lookups.insert(field.into(), table);
        self
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Project `payload` into searchable text
    ///
    /// Fields render in configured order, joined by one space. Missing,
    /// null and unresolvable fields render as empty strings so the
    /// output for a given payload never depends on anything but the
    /// payload and the lookup tables.
    pub fn project(&self, payload: &RawValue) -> Result<String> {
        let value: Value = serde_json::from_str(payload.get())
            .map_err(|e| FolkError::InvalidPayload(e.to_string()))?;
        let object = value.as_object().ok_or_else(|| {
            FolkError::InvalidPayload("searchable documents must be JSON objects".to_string())
        })?;

        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|field| self.render(field, object.get(field)))
            .collect();

        Ok(parts.join(" "))
    }

    fn render(&self, field: &str, value: Option<&Value>) -> String {
        match value {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => match self.lookups.get(field) {
                Some(table) => n
                    .as_i64()
                    .and_then(|id| table.get(id))
                    .unwrap_or_default()
                    .to_string(),
                None => n.to_string(),
            },
            Some(Value::Bool(b)) => b.to_string(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(" "),
            Some(Value::Null) | Some(Value::Object(_)) | None => String::new(),
        }
    }
}
