//! Rows and row identity

use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// A backend record: an open mapping from field name to JSON value
pub type Row = Map<String, Value>;

/// Why a row could not be given a stable key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowKeyError {
    #[error("row at position {index} has no usable key")]
    Missing { index: usize },

    #[error("row at position {index} repeats key '{key}'")]
    Duplicate { index: usize, key: String },
}

type KeyFn = Arc<dyn Fn(&Row) -> Option<String> + Send + Sync>;

/// Deterministic row key derivation.
///
/// Keys are a pure function of row content. A row that yields no key is
/// rejected rather than given a generated one.
#[derive(Clone)]
pub struct RowKey {
    description: String,
    key_fn: KeyFn,
}

impl RowKey {
    /// Key rows by the value of a single field (strings and numbers only)
    pub fn field(name: impl Into<String>) -> Self {
        let name = name.into();
        let field = name.clone();
        Self {
            description: format!("field '{name}'"),
            key_fn: Arc::new(move |row: &Row| match row.get(&field) {
                Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            }),
        }
    }

    /// Key rows with a custom function
    pub fn custom<F>(description: impl Into<String>, key_fn: F) -> Self
    where
        F: Fn(&Row) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            key_fn: Arc::new(key_fn),
        }
    }

    /// Derive the key for one row
    pub fn key_of(&self, row: &Row) -> Option<String> {
        (self.key_fn)(row)
    }

    /// Human-readable description of where keys come from
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Split a fetched row set into keyed rows and the rows that were rejected.
    ///
    /// Order of the accepted rows is preserved.
    pub fn partition(&self, rows: Vec<Row>) -> KeyedRows {
        let mut seen = HashSet::new();
        let mut keyed = KeyedRows::default();

        for (index, row) in rows.into_iter().enumerate() {
            match self.key_of(&row) {
                Some(key) if seen.insert(key.clone()) => {
                    keyed.keys.push(key);
                    keyed.rows.push(row);
                }
                Some(key) => keyed.rejected.push(RowKeyError::Duplicate { index, key }),
                None => keyed.rejected.push(RowKeyError::Missing { index }),
            }
        }

        keyed
    }
}

impl fmt::Debug for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowKey").field("description", &self.description).finish()
    }
}

/// Result of [`RowKey::partition`]
#[derive(Debug, Clone, Default)]
pub struct KeyedRows {
    /// Accepted rows, in input order
    pub rows: Vec<Row>,
    /// Key of each accepted row, parallel to `rows`
    pub keys: Vec<String>,
    /// Rows that had no key or a repeated key
    pub rejected: Vec<RowKeyError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn field_key_accepts_strings_and_numbers() {
        let key = RowKey::field("id");
        assert_eq!(key.key_of(&row(json!({"id": "TX-1"}))), Some("TX-1".to_string()));
        assert_eq!(key.key_of(&row(json!({"id": 42}))), Some("42".to_string()));
        assert_eq!(key.key_of(&row(json!({"id": null}))), None);
        assert_eq!(key.key_of(&row(json!({"other": 1}))), None);
    }

    #[test]
    fn partition_rejects_missing_and_duplicate_keys() {
        let key = RowKey::field("id");
        let keyed = key.partition(vec![
            row(json!({"id": 1})),
            row(json!({"name": "no id"})),
            row(json!({"id": 2})),
            row(json!({"id": 1})),
        ]);

        assert_eq!(keyed.keys, vec!["1", "2"]);
        assert_eq!(keyed.rows.len(), 2);
        assert_eq!(
            keyed.rejected,
            vec![
                RowKeyError::Missing { index: 1 },
                RowKeyError::Duplicate {
                    index: 3,
                    key: "1".to_string()
                },
            ]
        );
    }
}
