//! Rendering-side projections (pure).
//!
//! Nothing here mutates a layout: the form view reads rows and sizing hints,
//! and record binding turns editor input into value commits.

pub mod form;
pub mod record;

pub use form::{editor_height, is_long_text, width_percent, EditorHeight, FieldView, FormView, RowView};
pub use record::{commit_edit, display_value, CellValue, Record, ValueSink};
