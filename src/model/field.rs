//! Per-field layout metadata.

use super::column::{Column, FieldId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grouping key shared by all fields placed in the same row.
///
/// The integer carries no meaning beyond grouping: row position is derived
/// from the member fields' order keys, and row reordering renumbers ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(i64);

impl RowId {
    /// Wrap a raw row id.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw row id.
    pub const fn get(self) -> i64 {
        self.0
    }

    /// The id after this one.
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Horizontal share of a row, in twelfths. Always within `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Width(u8);

impl Width {
    /// Narrowest width: one twelfth.
    pub const MIN: u8 = 1;
    /// Widest width: the whole row.
    pub const MAX: u8 = 12;
    /// Whole-row width given to new fields.
    pub const FULL: Width = Width(Self::MAX);

    /// Clamping constructor; never fails.
    pub fn clamped(raw: i64) -> Self {
        Self(raw.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Width in twelfths.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Width after adding `delta`, saturating at the bounds.
    pub fn offset(self, delta: i32) -> Self {
        Self::clamped(self.0 as i64 + delta as i64)
    }

    /// Whether a decrease would change anything.
    pub const fn can_shrink(self) -> bool {
        self.0 > Self::MIN
    }

    /// Whether an increase would change anything.
    pub const fn can_grow(self) -> bool {
        self.0 < Self::MAX
    }
}

impl Default for Width {
    fn default() -> Self {
        Self::FULL
    }
}

impl From<i64> for Width {
    fn from(raw: i64) -> Self {
        Self::clamped(raw)
    }
}

impl From<Width> for u8 {
    fn from(width: Width) -> Self {
        width.0
    }
}

/// Editor height preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSize {
    /// Compact editor.
    Small,
    /// Regular editor.
    #[default]
    Medium,
    /// Tall editor.
    Large,
}

impl FieldSize {
    /// Lowercase name, as persisted.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldSize::Small => "small",
            FieldSize::Medium => "medium",
            FieldSize::Large => "large",
        }
    }
}

/// Layout metadata for one field of the form.
///
/// Serialized with the camelCase keys of the persisted layout document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Unique within a layout; equals the column name.
    pub id: FieldId,
    /// Column this field edits.
    pub column: Column,
    /// Order key. Ranks the field within its row and ranks rows by their minimum.
    pub order: f64,
    /// Row the field belongs to.
    pub row_id: RowId,
    /// Share of the row, in twelfths.
    pub width: Width,
    /// `false` collapses the field to its header.
    pub expanded: bool,
    /// Editor height preset.
    pub size: FieldSize,
    /// Hidden fields only render in show-hidden mode.
    pub hidden: bool,
}

impl FieldDescriptor {
    /// Descriptor for the `index`-th column of a freshly generated layout:
    /// alone in its own row, full width, expanded, medium, visible.
    pub fn for_column(column: &Column, index: usize) -> Self {
        Self {
            id: column.field_id(),
            column: column.clone(),
            order: index as f64,
            row_id: RowId::new(index as i64),
            width: Width::FULL,
            expanded: true,
            size: FieldSize::Medium,
            hidden: false,
        }
    }
}
