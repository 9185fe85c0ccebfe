//! Domain model types (pure).
//!
//! All types in this module are plain data. Behaviour lives in `order`
//! (reordering) and `state` (field edits, drag gestures, sessions).

pub mod action;
pub mod column;
pub mod error;
pub mod field;
pub mod layout;

// Re-export for convenience
pub use action::LayoutAction;
pub use column::{Column, DocumentKey, FieldId};
pub use error::AppError;
pub use field::{FieldDescriptor, FieldSize, RowId, Width};
pub use layout::{Layout, Row};
