//! Order engine (pure).
//!
//! Default layout generation, row derivation, and order-key recomputation for
//! drag reordering. Every function takes a layout by value or reference and
//! returns the new layout; nothing here touches persistence.
//!
//! # Order keys
//!
//! A field's `order` ranks it inside its row, and a row is ranked by the
//! smallest order among its members. Moving a field only rewrites the moved
//! field's key (head: `min - 1`, tail: `max + 1`, middle: midpoint of the
//! neighbours), so unrelated fields keep their keys.
//!
//! Repeated midpoint insertion into the same slot halves the gap each time.
//! Once the neighbours are closer than [`MIN_ORDER_GAP`], or the keys are so
//! large that the new key would round onto a neighbour, the whole layout is
//! re-sequenced to consecutive integers (see [`renormalize`]) before the key
//! is taken, which keeps keys finite and strictly separated.

use crate::model::{Column, FieldDescriptor, FieldId, Layout, Row, RowId};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Smallest neighbour gap at which midpoint insertion is still taken as-is.
pub const MIN_ORDER_GAP: f64 = 1e-6;

/// Build the default layout: one field per row, in column order.
pub fn generate_default(columns: &[Column]) -> Layout {
    columns
        .iter()
        .enumerate()
        .map(|(index, column)| FieldDescriptor::for_column(column, index))
        .collect()
}

/// Group fields into rows.
///
/// Members are sorted by ascending order key; rows by ascending minimum
/// member order, ties broken by row id. Rows without members do not exist.
pub fn derive_rows(layout: &Layout) -> Vec<Row<'_>> {
    let mut groups: BTreeMap<RowId, Vec<&FieldDescriptor>> = BTreeMap::new();
    for field in layout.fields() {
        groups.entry(field.row_id).or_default().push(field);
    }

    let mut rows: Vec<Row<'_>> = groups
        .into_iter()
        .map(|(id, mut fields)| {
            fields.sort_by(|a, b| a.order.total_cmp(&b.order));
            Row { id, fields }
        })
        .collect();

    rows.sort_by(|a, b| {
        a.min_order()
            .total_cmp(&b.min_order())
            .then_with(|| a.id.cmp(&b.id))
    });
    rows
}

/// Id for a new, empty row: one past the highest id in use.
pub fn next_row_id(layout: &Layout) -> RowId {
    layout
        .fields()
        .iter()
        .map(|f| f.row_id)
        .max()
        .map_or(RowId::new(0), RowId::next)
}

/// Move `field_id` so it ends up at `dest_index` within row `dest_row`.
///
/// `dest_index` counts the destination row's members without the moved field,
/// i.e. it is the field's final position. Unknown ids leave the layout
/// unchanged.
pub fn reorder_field(
    layout: Layout,
    field_id: &FieldId,
    dest_row: RowId,
    dest_index: usize,
) -> Layout {
    let Some(moved) = layout.get(field_id) else {
        warn!(field = %field_id, "reorder_field: unknown field id, layout unchanged");
        return layout;
    };
    let source_row = moved.row_id;
    let current_order = moved.order;

    if source_row == dest_row {
        let source_index = derive_rows(&layout)
            .iter()
            .find(|row| row.id == source_row)
            .and_then(|row| row.position_of(field_id));
        if source_index == Some(dest_index) {
            debug!(field = %field_id, row = %dest_row, index = dest_index, "reorder_field: no movement");
            return layout;
        }
    }

    let mut layout = layout;
    let slot = slot_for(&destination_orders(&layout, field_id, dest_row), dest_index);
    let new_order = match candidate_order(slot, current_order) {
        Some(order) => order,
        None => {
            debug!(
                field = %field_id,
                ?slot,
                "reorder_field: order keys exhausted, renormalizing"
            );
            layout = renormalize(layout);
            let slot = slot_for(&destination_orders(&layout, field_id, dest_row), dest_index);
            candidate_order(slot, current_order).unwrap_or(current_order)
        }
    };

    debug!(
        field = %field_id,
        from_row = %source_row,
        to_row = %dest_row,
        index = dest_index,
        order = new_order,
        "reorder_field"
    );
    place(layout, field_id, dest_row, new_order)
}

/// Move the row at sequence position `source_index` to `dest_index`, then
/// renumber every row id to its row's new sequence position.
///
/// Order keys are untouched, so rows keep their members and their members
/// keep their relative order. Out-of-range positions leave the layout
/// unchanged.
pub fn reorder_row(mut layout: Layout, source_index: usize, dest_index: usize) -> Layout {
    let mut sequence: Vec<RowId> = derive_rows(&layout).iter().map(|row| row.id).collect();

    if source_index >= sequence.len() || dest_index >= sequence.len() {
        warn!(
            source_index,
            dest_index,
            rows = sequence.len(),
            "reorder_row: position out of range, layout unchanged"
        );
        return layout;
    }
    if source_index == dest_index {
        return layout;
    }

    let moved = sequence.remove(source_index);
    sequence.insert(dest_index, moved);

    let renumbered: HashMap<RowId, RowId> = sequence
        .iter()
        .enumerate()
        .map(|(position, old)| (*old, RowId::new(position as i64)))
        .collect();

    for field in layout.fields_mut() {
        if let Some(new_id) = renumbered.get(&field.row_id) {
            field.row_id = *new_id;
        }
    }
    debug!(source_index, dest_index, "reorder_row");
    layout
}

/// Re-sequence all order keys to `0, 1, 2, ...` following the derived rows,
/// row by row and left to right. Row sequence, row membership and
/// within-row order are preserved.
pub fn renormalize(mut layout: Layout) -> Layout {
    let sequence: Vec<FieldId> = derive_rows(&layout)
        .iter()
        .flat_map(|row| row.fields.iter().map(|f| f.id.clone()))
        .collect();
    let ranks: HashMap<FieldId, f64> = sequence
        .into_iter()
        .enumerate()
        .map(|(rank, id)| (id, rank as f64))
        .collect();

    for field in layout.fields_mut() {
        if let Some(rank) = ranks.get(&field.id) {
            field.order = *rank;
        }
    }
    layout
}

/// Where a field lands relative to the destination row's existing keys.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Slot {
    EmptyRow,
    Head(f64),
    Tail(f64),
    Between(f64, f64),
}

/// Order key for `slot`, or `None` when it would not land strictly inside its
/// bounds: neighbours closer than [`MIN_ORDER_GAP`], or keys so large that
/// `± 1` or the midpoint rounds onto a neighbour.
fn candidate_order(slot: Slot, current: f64) -> Option<f64> {
    match slot {
        Slot::EmptyRow => Some(current),
        Slot::Head(first) => Some(first - 1.0).filter(|order| *order < first),
        Slot::Tail(last) => Some(last + 1.0).filter(|order| *order > last),
        Slot::Between(before, after) => {
            let mid = (before + after) / 2.0;
            (after - before >= MIN_ORDER_GAP && before < mid && mid < after).then_some(mid)
        }
    }
}

fn slot_for(orders: &[f64], index: usize) -> Slot {
    match orders {
        [] => Slot::EmptyRow,
        [first, ..] if index == 0 => Slot::Head(*first),
        [.., last] if index >= orders.len() => Slot::Tail(*last),
        _ => Slot::Between(orders[index - 1], orders[index]),
    }
}

/// Sorted order keys of `row`'s members, excluding `moving`.
fn destination_orders(layout: &Layout, moving: &FieldId, row: RowId) -> Vec<f64> {
    let mut orders: Vec<f64> = layout
        .fields()
        .iter()
        .filter(|f| f.row_id == row && &f.id != moving)
        .map(|f| f.order)
        .collect();
    orders.sort_by(f64::total_cmp);
    orders
}

fn place(mut layout: Layout, id: &FieldId, row: RowId, order: f64) -> Layout {
    if let Some(field) = layout.get_mut(id) {
        field.row_id = row;
        field.order = order;
    }
    layout
}

#[cfg(test)]
#[path = "order_tests.rs"]
mod tests;
