//! Columns of the active dataset and the identifiers derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One data column as supplied by the dataset collaborator.
///
/// `name` is the stable identifier used for record lookup; `label` is what the
/// form shows in the field header.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    /// Identifier in the dataset; also the field id.
    pub name: String,
    /// Header text shown above the field.
    pub label: String,
}

impl Column {
    /// Column with a distinct display label.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }

    /// Column whose label is its name (spreadsheet headers usually are both).
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
        }
    }

    /// Identifier of the field descriptor that lays out this column.
    pub fn field_id(&self) -> FieldId {
        FieldId(self.name.clone())
    }
}

/// Identifier of a field descriptor. Equal to its column's name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    /// Wrap a raw field identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// Key binding a dataset to its saved layout in the layout collection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentKey(String);

impl DocumentKey {
    /// Key used when no dataset is loaded.
    pub const DEFAULT: &'static str = "default-layout";

    /// Key for a dataset loaded from `file_name`.
    pub fn for_file(file_name: &str) -> Self {
        if file_name.is_empty() {
            return Self::default();
        }
        Self(format!("{file_name}-layout"))
    }

    /// Wrap an already-derived key (e.g. one read back from the store).
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw key, as stored in the layout collection.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DocumentKey {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
