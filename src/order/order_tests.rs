//! Tests for the order engine.
//!
//! Covers default generation, row derivation, field moves (empty row, head,
//! tail, middle, no-op), row moves, and renormalization under repeated
//! midpoint insertion.

use super::*;
use crate::model::{FieldSize, Width};

fn columns(names: &[&str]) -> Vec<Column> {
    names.iter().map(|n| Column::named(*n)).collect()
}

fn id(raw: &str) -> FieldId {
    FieldId::new(raw)
}

/// Row contents as field-id strings, in derived order.
fn row_ids(layout: &Layout) -> Vec<Vec<String>> {
    derive_rows(layout)
        .iter()
        .map(|row| row.fields.iter().map(|f| f.id.to_string()).collect())
        .collect()
}

fn order_of(layout: &Layout, raw: &str) -> f64 {
    layout.get(&id(raw)).expect("field exists").order
}

/// Layout with all of `names` in row 0, orders 0..n.
fn single_row(names: &[&str]) -> Layout {
    let mut layout = generate_default(&columns(names));
    for field in layout.fields_mut() {
        field.row_id = RowId::new(0);
    }
    layout
}

// ===== generate_default =====

#[test]
fn default_layout_has_one_field_per_row_in_column_order() {
    let layout = generate_default(&columns(&["Name", "Description", "Qty"]));

    assert_eq!(layout.len(), 3);
    for (i, field) in layout.fields().iter().enumerate() {
        assert_eq!(field.order, i as f64);
        assert_eq!(field.row_id, RowId::new(i as i64));
        assert_eq!(field.width, Width::FULL);
        assert!(field.expanded);
        assert!(!field.hidden);
        assert_eq!(field.size, FieldSize::Medium);
    }
    assert_eq!(
        row_ids(&layout),
        vec![vec!["Name"], vec!["Description"], vec!["Qty"]]
    );
}

#[test]
fn default_layout_of_no_columns_is_empty() {
    let layout = generate_default(&[]);
    assert!(layout.is_empty());
    assert!(derive_rows(&layout).is_empty());
}

// ===== derive_rows =====

#[test]
fn rows_are_ranked_by_minimum_member_order() {
    let mut layout = generate_default(&columns(&["a", "b", "c"]));
    // Push row 0 to the end by giving its only member the largest key.
    layout.fields_mut()[0].order = 10.0;

    assert_eq!(row_ids(&layout), vec![vec!["b"], vec!["c"], vec!["a"]]);
}

#[test]
fn row_members_are_sorted_by_order_not_insertion() {
    let mut layout = single_row(&["a", "b", "c"]);
    layout.fields_mut()[0].order = 5.0;

    assert_eq!(row_ids(&layout), vec![vec!["b", "c", "a"]]);
}

#[test]
fn next_row_id_is_past_highest_id() {
    let layout = generate_default(&columns(&["a", "b"]));
    assert_eq!(next_row_id(&layout), RowId::new(2));
    assert_eq!(next_row_id(&Layout::default()), RowId::new(0));
}

// ===== reorder_field =====

#[test]
fn name_description_scenario() {
    let layout = generate_default(&columns(&["Name", "Description"]));

    let layout = reorder_field(layout, &id("Description"), RowId::new(0), 1);

    assert_eq!(order_of(&layout, "Name"), 0.0);
    assert_eq!(order_of(&layout, "Description"), 1.0);
    let rows = derive_rows(&layout);
    assert_eq!(rows.len(), 1, "row 1 is empty and not materialized");
    assert_eq!(rows[0].id, RowId::new(0));
    assert_eq!(row_ids(&layout), vec![vec!["Name", "Description"]]);
}

#[test]
fn move_into_empty_row_keeps_order() {
    let mut layout = generate_default(&columns(&["a", "b", "c"]));
    layout.fields_mut()[1].order = 1.375;
    let fresh = next_row_id(&layout);

    let layout = reorder_field(layout, &id("b"), fresh, 0);

    let moved = layout.get(&id("b")).unwrap();
    assert_eq!(moved.order, 1.375);
    assert_eq!(moved.row_id, fresh);
}

#[test]
fn move_to_head_goes_below_minimum() {
    let mut layout = single_row(&["a", "b", "c"]);
    // "x" sits alone in row 7 with order 7.
    layout = layout
        .fields()
        .iter()
        .cloned()
        .chain([FieldDescriptor::for_column(&Column::named("x"), 7)])
        .collect();

    let layout = reorder_field(layout, &id("x"), RowId::new(0), 0);

    assert_eq!(order_of(&layout, "x"), -1.0);
    assert_eq!(row_ids(&layout), vec![vec!["x", "a", "b", "c"]]);
}

#[test]
fn move_past_end_goes_above_maximum() {
    let layout = generate_default(&columns(&["a", "b", "c"]));

    let layout = reorder_field(layout, &id("a"), RowId::new(2), 5);

    assert_eq!(order_of(&layout, "a"), 3.0);
    assert_eq!(row_ids(&layout), vec![vec!["b"], vec!["c", "a"]]);
}

#[test]
fn move_into_middle_takes_midpoint() {
    let mut layout = single_row(&["a", "b"]);
    let extra = FieldDescriptor::for_column(&Column::named("c"), 5);
    layout = layout.fields().iter().cloned().chain([extra]).collect();

    let layout = reorder_field(layout, &id("c"), RowId::new(0), 1);

    assert_eq!(order_of(&layout, "c"), 0.5);
    assert_eq!(row_ids(&layout), vec![vec!["a", "c", "b"]]);
}

#[test]
fn move_within_row_uses_final_position() {
    let layout = single_row(&["a", "b", "c"]);

    let layout = reorder_field(layout, &id("a"), RowId::new(0), 2);

    assert_eq!(row_ids(&layout), vec![vec!["b", "c", "a"]]);
    assert!(order_of(&layout, "a") > order_of(&layout, "c"));
}

#[test]
fn move_within_row_to_middle() {
    let layout = single_row(&["a", "b", "c", "d"]);

    let layout = reorder_field(layout, &id("d"), RowId::new(0), 1);

    assert_eq!(order_of(&layout, "d"), 0.5);
    assert_eq!(row_ids(&layout), vec![vec!["a", "d", "b", "c"]]);
}

#[test]
fn move_to_same_position_is_noop() {
    let layout = single_row(&["a", "b", "c"]);
    let before = layout.clone();

    let after = reorder_field(layout, &id("b"), RowId::new(0), 1);

    assert_eq!(after, before);
}

#[test]
fn move_unknown_field_is_noop() {
    let layout = generate_default(&columns(&["a"]));
    let before = layout.clone();

    let after = reorder_field(layout, &id("missing"), RowId::new(0), 0);

    assert_eq!(after, before);
}

#[test]
fn move_only_rewrites_moved_field() {
    let layout = generate_default(&columns(&["a", "b", "c", "d"]));
    let before = layout.clone();

    let after = reorder_field(layout, &id("d"), RowId::new(1), 0);

    for (old, new) in before.fields().iter().zip(after.fields()) {
        if old.id.as_str() != "d" {
            assert_eq!(old, new);
        }
    }
}

// ===== renormalization =====

#[test]
fn repeated_midpoint_insertion_renormalizes() {
    // Alternate two fields into the slot right after "a"; each move halves
    // the gap until the renormalization threshold is crossed.
    let mut layout = single_row(&["a", "b", "p", "q"]);
    for step in 0..200 {
        let mover = if step % 2 == 0 { "p" } else { "q" };
        layout = reorder_field(layout, &id(mover), RowId::new(0), 1);

        let rows = derive_rows(&layout);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].fields[0].id.as_str(), "a", "step {step}");
        assert_eq!(rows[0].fields[1].id.as_str(), mover, "step {step}");
        let orders: Vec<f64> = rows[0].fields.iter().map(|f| f.order).collect();
        assert!(orders.iter().all(|o| o.is_finite()));
        assert!(
            orders.windows(2).all(|w| w[0] < w[1]),
            "orders must stay strictly increasing at step {step}: {orders:?}"
        );
    }
}

/// Layout from `(name, row, order)` triples.
fn placed(specs: &[(&str, i64, f64)]) -> Layout {
    specs
        .iter()
        .enumerate()
        .map(|(i, (name, row, order))| {
            let mut field = FieldDescriptor::for_column(&Column::named(*name), i);
            field.row_id = RowId::new(*row);
            field.order = *order;
            field
        })
        .collect()
}

#[test]
fn midpoint_that_rounds_onto_neighbour_renormalizes() {
    // 1e16 + 1 is not representable; the midpoint would collapse onto "a".
    let layout = placed(&[("a", 0, 1e16), ("b", 0, 1e16 + 2.0), ("x", 1, 5.0)]);

    let layout = reorder_field(layout, &id("x"), RowId::new(0), 1);

    assert_eq!(row_ids(&layout), vec![vec!["a", "x", "b"]]);
    assert!(order_of(&layout, "a") < order_of(&layout, "x"));
    assert!(order_of(&layout, "x") < order_of(&layout, "b"));
}

#[test]
fn head_insertion_below_huge_negative_key_renormalizes() {
    let layout = placed(&[("a", 0, -1e16), ("x", 1, 5.0)]);

    let layout = reorder_field(layout, &id("x"), RowId::new(0), 0);

    assert_eq!(row_ids(&layout), vec![vec!["x", "a"]]);
    assert!(order_of(&layout, "x") < order_of(&layout, "a"));
}

#[test]
fn tail_insertion_above_huge_key_renormalizes() {
    let layout = placed(&[("a", 0, 1e16), ("x", 1, 5.0)]);

    let layout = reorder_field(layout, &id("x"), RowId::new(0), 1);

    assert_eq!(row_ids(&layout), vec![vec!["a", "x"]]);
    assert!(order_of(&layout, "x") > order_of(&layout, "a"));
}

#[test]
fn renormalize_preserves_rows_and_sequence() {
    let mut layout = generate_default(&columns(&["a", "b", "c", "d", "e"]));
    layout = reorder_field(layout, &id("c"), RowId::new(0), 1);
    layout = reorder_field(layout, &id("e"), RowId::new(3), 0);
    layout.fields_mut()[1].order = 0.001;
    let before = row_ids(&layout);

    let layout = renormalize(layout);

    assert_eq!(row_ids(&layout), before);
    let flat: Vec<f64> = derive_rows(&layout)
        .iter()
        .flat_map(|r| r.fields.iter().map(|f| f.order))
        .collect();
    let expected: Vec<f64> = (0..flat.len()).map(|i| i as f64).collect();
    assert_eq!(flat, expected);
}

// ===== reorder_row =====

#[test]
fn reorder_row_renumbers_row_ids_by_new_position() {
    let layout = generate_default(&columns(&["a", "b", "c"]));

    let layout = reorder_row(layout, 0, 2);

    let row_of = |raw: &str| layout.get(&id(raw)).unwrap().row_id;
    assert_eq!(row_of("b"), RowId::new(0));
    assert_eq!(row_of("c"), RowId::new(1));
    assert_eq!(row_of("a"), RowId::new(2));
}

#[test]
fn reorder_row_keeps_order_keys_and_groupings() {
    let mut layout = generate_default(&columns(&["a", "b", "c", "d"]));
    layout = reorder_field(layout, &id("b"), RowId::new(0), 1);
    let orders_before: Vec<f64> = layout.fields().iter().map(|f| f.order).collect();

    let after = reorder_row(layout, 2, 0);

    let orders_after: Vec<f64> = after.fields().iter().map(|f| f.order).collect();
    assert_eq!(orders_before, orders_after);
    let row_of = |raw: &str| after.get(&id(raw)).unwrap().row_id;
    assert_eq!(row_of("a"), row_of("b"), "rowmates stay together");
    assert_ne!(row_of("a"), row_of("c"));
    assert_ne!(row_of("c"), row_of("d"));
}

#[test]
fn reorder_row_swap_does_not_merge_rows() {
    let layout = generate_default(&columns(&["a", "b"]));

    let layout = reorder_row(layout, 1, 0);

    assert_ne!(
        layout.get(&id("a")).unwrap().row_id,
        layout.get(&id("b")).unwrap().row_id
    );
}

#[test]
fn reorder_row_out_of_range_is_noop() {
    let layout = generate_default(&columns(&["a", "b"]));
    let before = layout.clone();

    assert_eq!(reorder_row(layout.clone(), 0, 2), before);
    assert_eq!(reorder_row(layout, 5, 0), before);
}
