//! Binding between form fields and the currently selected record.
//!
//! The record itself is owned by the dataset collaborator; the form only
//! reads values by column name and reports edits through a [`ValueSink`].

use crate::model::FieldDescriptor;
use std::collections::HashMap;
use std::fmt;

/// Scalar cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Missing or empty value.
    #[default]
    Blank,
}

impl CellValue {
    /// Whether this is [`CellValue::Blank`].
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Blank)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(text) => f.write_str(text),
            CellValue::Number(number) => write!(f, "{number}"),
            CellValue::Blank => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        CellValue::Text(text.to_string())
    }
}

impl From<String> for CellValue {
    fn from(text: String) -> Self {
        CellValue::Text(text)
    }
}

impl From<f64> for CellValue {
    fn from(number: f64) -> Self {
        CellValue::Number(number)
    }
}

/// The selected record: column name → value.
pub type Record = HashMap<String, CellValue>;

/// Receives edited values. Called once per edit; the owner is expected to
/// reflect the change back into the record it hands to the form.
pub trait ValueSink {
    /// Receive `value` for the column `field_name`.
    fn commit(&mut self, field_name: &str, value: CellValue);
}

impl<F> ValueSink for F
where
    F: FnMut(&str, CellValue),
{
    fn commit(&mut self, field_name: &str, value: CellValue) {
        self(field_name, value)
    }
}

/// Text shown in a field's editor: the record's value for the field's column,
/// or an empty string when the value is missing or blank.
pub fn display_value(record: &Record, field: &FieldDescriptor) -> String {
    record
        .get(&field.column.name)
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Report an edit of `field` to `sink`.
///
/// The editor text is committed as-is, so clearing a field commits an empty
/// text value rather than a blank.
pub fn commit_edit<S: ValueSink + ?Sized>(sink: &mut S, field: &FieldDescriptor, input: &str) {
    tracing::debug!(field = %field.column.name, empty = input.is_empty(), "value committed");
    sink.commit(&field.column.name, CellValue::Text(input.to_string()));
}
