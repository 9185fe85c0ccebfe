//! Per-field attribute edits.
//!
//! Pure functions that transform a Layout by changing exactly one field
//! descriptor, matched by id. An id that is not in the layout is a caller
//! bug; the layout comes back unchanged and a warning is logged.

use crate::model::{FieldDescriptor, FieldId, FieldSize, Layout};
use tracing::{debug, warn};

/// Flip a field between expanded and collapsed-to-header.
pub fn toggle_expansion(layout: Layout, id: &FieldId) -> Layout {
    update_field(layout, id, "toggle_expansion", |field| {
        field.expanded = !field.expanded;
    })
}

/// Flip a field between hidden and visible.
pub fn toggle_visibility(layout: Layout, id: &FieldId) -> Layout {
    update_field(layout, id, "toggle_visibility", |field| {
        field.hidden = !field.hidden;
    })
}

/// Set a field's editor height preset.
pub fn change_size(layout: Layout, id: &FieldId, size: FieldSize) -> Layout {
    update_field(layout, id, "change_size", |field| field.size = size)
}

/// Grow or shrink a field by `delta` twelfths, clamped to `1..=12`.
///
/// Out-of-range requests are not errors; the width just stops at the bound.
pub fn change_width(layout: Layout, id: &FieldId, delta: i32) -> Layout {
    update_field(layout, id, "change_width", |field| {
        field.width = field.width.offset(delta);
    })
}

fn update_field(
    mut layout: Layout,
    id: &FieldId,
    operation: &'static str,
    edit: impl FnOnce(&mut FieldDescriptor),
) -> Layout {
    match layout.get_mut(id) {
        Some(field) => {
            edit(field);
            debug!(
                field = %id,
                operation,
                expanded = field.expanded,
                hidden = field.hidden,
                width = field.width.get(),
                size = field.size.as_str(),
                "field updated"
            );
        }
        None => warn!(field = %id, operation, "unknown field id, layout unchanged"),
    }
    layout
}

// ===== Tests =====

#[cfg(test)]
#[path = "field_handler_tests.rs"]
mod tests;
