//! Layouts and the rows derived from them.

use super::column::{Column, FieldId};
use super::field::{FieldDescriptor, RowId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete set of field descriptors for one document.
///
/// The flat descriptor sequence is canonical; rows are always rebuilt from it.
/// Serializes as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    fields: Vec<FieldDescriptor>,
}

impl Layout {
    /// Layout over `fields`, kept in the given order.
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    /// All descriptors, in storage order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the layout has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Descriptor with the given id.
    pub fn get(&self, id: &FieldId) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| &f.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &FieldId) -> Option<&mut FieldDescriptor> {
        self.fields.iter_mut().find(|f| &f.id == id)
    }

    pub(crate) fn fields_mut(&mut self) -> &mut [FieldDescriptor] {
        &mut self.fields
    }

    /// Whether this layout covers exactly `columns`: same identifiers, same
    /// multiplicities, order ignored.
    pub fn matches_columns(&self, columns: &[Column]) -> bool {
        if self.fields.len() != columns.len() {
            return false;
        }
        let mut counts: HashMap<&str, i64> = HashMap::with_capacity(columns.len());
        for column in columns {
            *counts.entry(column.name.as_str()).or_default() += 1;
        }
        for field in &self.fields {
            match counts.get_mut(field.id.as_str()) {
                Some(count) if *count > 0 => *count -= 1,
                _ => return false,
            }
        }
        true
    }
}

impl FromIterator<FieldDescriptor> for Layout {
    fn from_iter<I: IntoIterator<Item = FieldDescriptor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Fields sharing a row id, sorted by order key. Derived; never edited directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    /// Row id shared by every member.
    pub id: RowId,
    /// Members, by ascending order key.
    pub fields: Vec<&'a FieldDescriptor>,
}

impl Row<'_> {
    /// Smallest order key among the members; ranks this row among the others.
    pub fn min_order(&self) -> f64 {
        self.fields
            .iter()
            .map(|f| f.order)
            .min_by(f64::total_cmp)
            .unwrap_or(f64::INFINITY)
    }

    /// Member ids, left to right.
    pub fn field_ids(&self) -> Vec<&FieldId> {
        self.fields.iter().map(|f| &f.id).collect()
    }

    /// Index of `id` among the members.
    pub fn position_of(&self, id: &FieldId) -> Option<usize> {
        self.fields.iter().position(|f| &f.id == id)
    }
}
