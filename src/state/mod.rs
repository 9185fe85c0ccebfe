//! Layout state (pure transitions plus the persistence-aware session).
//!
//! Field edits and the action reducer are pure functions testable without any
//! store; the session is the only part that talks to a persistence port.

pub mod drag;
pub mod field_handler;
pub mod layout_handler;
pub mod session;

// Re-export for convenience
pub use drag::{Container, DragCoordinator, DragError, DragKind, DragPosition, DragState};
pub use field_handler::{change_size, change_width, toggle_expansion, toggle_visibility};
pub use layout_handler::handle_layout_action;
pub use session::{LayoutSession, DEFAULT_LAYOUT_NAME};
