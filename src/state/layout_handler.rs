//! Layout action reducer.
//!
//! Routes a [`LayoutAction`] to the order engine or the field edits. This is
//! the only way a rendering layer changes a layout.

use crate::model::{Layout, LayoutAction};
use crate::order;
use crate::state::field_handler;

/// Apply one layout action, returning the new layout.
pub fn handle_layout_action(layout: Layout, action: LayoutAction) -> Layout {
    match action {
        LayoutAction::ToggleExpansion(id) => field_handler::toggle_expansion(layout, &id),
        LayoutAction::ToggleVisibility(id) => field_handler::toggle_visibility(layout, &id),
        LayoutAction::ChangeSize(id, size) => field_handler::change_size(layout, &id, size),
        LayoutAction::ChangeWidth(id, delta) => field_handler::change_width(layout, &id, delta),
        LayoutAction::MoveField { field, row, index } => {
            order::reorder_field(layout, &field, row, index)
        }
        LayoutAction::MoveRow { from, to } => order::reorder_row(layout, from, to),
        LayoutAction::Renormalize => order::renormalize(layout),
    }
}
