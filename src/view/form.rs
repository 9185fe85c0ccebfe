//! Form projection: which fields render where, and how big.

use crate::model::{FieldDescriptor, FieldSize, Layout, RowId, Width};
use crate::order::derive_rows;
use std::fmt::Write as _;

/// Column-name fragments that mark a field as free text.
const LONG_TEXT_MARKERS: [&str; 8] = [
    "comment",
    "description",
    "note",
    "target",
    "text",
    "content",
    "message",
    "detail",
];

/// Whether a field holds long free text and gets a multi-line editor.
pub fn is_long_text(column_name: &str) -> bool {
    let lowered = column_name.to_lowercase();
    LONG_TEXT_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Rendered editor height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorHeight {
    /// Collapsed: header only, no editor.
    HeaderOnly,
    /// Natural single-line height.
    Auto,
    /// Fixed height in pixels.
    Pixels(u16),
}

/// Editor height for a field given its size preset and expansion.
pub fn editor_height(field: &FieldDescriptor) -> EditorHeight {
    if !field.expanded {
        return EditorHeight::HeaderOnly;
    }
    if is_long_text(&field.column.name) {
        match field.size {
            FieldSize::Small => EditorHeight::Pixels(100),
            FieldSize::Medium => EditorHeight::Pixels(200),
            FieldSize::Large => EditorHeight::Pixels(300),
        }
    } else {
        match field.size {
            FieldSize::Small | FieldSize::Medium => EditorHeight::Auto,
            FieldSize::Large => EditorHeight::Pixels(120),
        }
    }
}

/// Width as a percentage of the row.
pub fn width_percent(width: Width) -> f32 {
    f32::from(width.get()) / f32::from(Width::MAX) * 100.0
}

/// One field as the form renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView<'a> {
    /// Descriptor being rendered.
    pub field: &'a FieldDescriptor,
    /// Editor height hint.
    pub height: EditorHeight,
    /// Share of the row as a percentage.
    pub width_percent: f32,
    /// Long-text field with a multi-line editor.
    pub multiline: bool,
    /// Whether the decrease-width control is enabled.
    pub can_shrink: bool,
    /// Whether the increase-width control is enabled.
    pub can_grow: bool,
}

impl<'a> FieldView<'a> {
    /// Compute the rendering hints for `field`.
    pub fn new(field: &'a FieldDescriptor) -> Self {
        Self {
            field,
            height: editor_height(field),
            width_percent: width_percent(field.width),
            multiline: is_long_text(&field.column.name),
            can_shrink: field.width.can_shrink(),
            can_grow: field.width.can_grow(),
        }
    }
}

/// A rendered row. `index` is the row's position in the full derived
/// sequence, which is what row drags address.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView<'a> {
    /// Row id.
    pub id: RowId,
    /// Position in the derived row sequence, counting rows skipped as empty.
    pub index: usize,
    /// Fields to render, left to right.
    pub fields: Vec<FieldView<'a>>,
}

/// Rows ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct FormView<'a> {
    /// Rows to render, top to bottom.
    pub rows: Vec<RowView<'a>>,
    /// Whether hidden fields were included.
    pub show_hidden: bool,
}

impl<'a> FormView<'a> {
    /// Project `layout` into rows. Hidden fields are dropped unless
    /// `show_hidden` is set, and rows left without fields are skipped.
    pub fn build(layout: &'a Layout, show_hidden: bool) -> Self {
        let rows = derive_rows(layout)
            .into_iter()
            .enumerate()
            .filter_map(|(index, row)| {
                let fields: Vec<FieldView<'a>> = row
                    .fields
                    .into_iter()
                    .filter(|f| show_hidden || !f.hidden)
                    .map(FieldView::new)
                    .collect();
                (!fields.is_empty()).then_some(RowView {
                    id: row.id,
                    index,
                    fields,
                })
            })
            .collect();
        Self { rows, show_hidden }
    }

    /// Number of rendered fields.
    pub fn field_count(&self) -> usize {
        self.rows.iter().map(|r| r.fields.len()).sum()
    }

    /// Plain-text rendering, one line per row:
    /// `[row] Label(width) Label(width, flags)`.
    ///
    /// Flags: `collapsed`, `hidden`, and the size when not medium.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let _ = write!(out, "[{}]", row.id);
            for view in &row.fields {
                let field = view.field;
                let mut flags = vec![format!("{}/12", field.width.get())];
                if field.size != FieldSize::Medium {
                    flags.push(field.size.as_str().to_string());
                }
                if !field.expanded {
                    flags.push("collapsed".to_string());
                }
                if field.hidden {
                    flags.push("hidden".to_string());
                }
                let _ = write!(out, " {}({})", field.column.label, flags.join(", "));
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, FieldId};
    use crate::order::generate_default;
    use crate::state::{change_size, change_width, toggle_expansion, toggle_visibility};

    fn layout() -> Layout {
        generate_default(&[
            Column::new("name", "Name"),
            Column::new("description", "Description"),
            Column::new("qty", "Quantity"),
        ])
    }

    #[test]
    fn long_text_detection_is_case_insensitive_substring() {
        assert!(is_long_text("Description"));
        assert!(is_long_text("internal_NOTES"));
        assert!(is_long_text("TargetDate"));
        assert!(!is_long_text("Quantity"));
        assert!(!is_long_text("Name"));
    }

    #[test]
    fn long_text_heights_follow_size() {
        let layout = layout();
        let id = FieldId::new("description");
        assert_eq!(editor_height(layout.get(&id).unwrap()), EditorHeight::Pixels(200));

        let small = change_size(layout.clone(), &id, FieldSize::Small);
        assert_eq!(editor_height(small.get(&id).unwrap()), EditorHeight::Pixels(100));

        let large = change_size(layout, &id, FieldSize::Large);
        assert_eq!(editor_height(large.get(&id).unwrap()), EditorHeight::Pixels(300));
    }

    #[test]
    fn short_field_heights_follow_size() {
        let layout = layout();
        let id = FieldId::new("qty");
        assert_eq!(editor_height(layout.get(&id).unwrap()), EditorHeight::Auto);

        let large = change_size(layout, &id, FieldSize::Large);
        assert_eq!(editor_height(large.get(&id).unwrap()), EditorHeight::Pixels(120));
    }

    #[test]
    fn collapsed_field_renders_header_only() {
        let id = FieldId::new("description");
        let layout = toggle_expansion(layout(), &id);
        assert_eq!(editor_height(layout.get(&id).unwrap()), EditorHeight::HeaderOnly);
    }

    #[test]
    fn width_percent_is_twelfths() {
        assert_eq!(width_percent(Width::FULL), 100.0);
        assert_eq!(width_percent(Width::clamped(6)), 50.0);
        assert_eq!(width_percent(Width::clamped(3)), 25.0);
    }

    #[test]
    fn hidden_fields_and_empty_rows_are_skipped() {
        let layout = toggle_visibility(layout(), &FieldId::new("description"));

        let view = FormView::build(&layout, false);

        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].index, 0);
        assert_eq!(view.rows[1].index, 2, "index refers to the full row sequence");
        assert_eq!(view.field_count(), 2);
    }

    #[test]
    fn show_hidden_keeps_everything() {
        let layout = toggle_visibility(layout(), &FieldId::new("description"));

        let view = FormView::build(&layout, true);

        assert_eq!(view.rows.len(), 3);
        assert!(view.rows[1].fields[0].field.hidden);
    }

    #[test]
    fn width_buttons_disable_at_bounds() {
        let id = FieldId::new("name");
        let narrow = change_width(layout(), &id, -11);
        let view = FormView::build(&narrow, false);
        let name = &view.rows[0].fields[0];
        assert!(!name.can_shrink);
        assert!(name.can_grow);

        let view = FormView::build(&narrow, false);
        let qty = &view.rows[2].fields[0];
        assert!(qty.can_shrink);
        assert!(!qty.can_grow);
    }
}
