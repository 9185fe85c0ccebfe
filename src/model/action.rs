//! Layout edit intents dispatched by a rendering layer.

use super::column::FieldId;
use super::field::{FieldSize, RowId};

/// One user intent against the current layout.
///
/// The rendering layer never mutates a layout; it sends one of these to
/// [`handle_layout_action`](crate::state::handle_layout_action).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutAction {
    /// Collapse to header only, or expand back.
    ToggleExpansion(FieldId),
    /// Hide from normal rendering, or unhide.
    ToggleVisibility(FieldId),
    /// Pick an editor height preset.
    ChangeSize(FieldId, FieldSize),
    /// Grow (positive) or shrink (negative) by twelfths.
    ChangeWidth(FieldId, i32),
    /// Move a field to `index` within row `row`.
    MoveField {
        /// Field being moved.
        field: FieldId,
        /// Destination row.
        row: RowId,
        /// Final position within the destination row.
        index: usize,
    },
    /// Move the row at sequence position `from` to position `to`.
    MoveRow {
        /// Current sequence position.
        from: usize,
        /// Target sequence position.
        to: usize,
    },
    /// Re-sequence every order key to consecutive integers.
    Renormalize,
}
