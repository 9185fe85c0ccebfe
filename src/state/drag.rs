//! Drag gesture state machine.
//!
//! Translates begin/drop/cancel events from any UI toolkit into order engine
//! calls. Only one gesture can be active at a time.
//!
//! ```text
//! Idle --begin_drag--> Dragging --drop/cancel--> Idle
//!                         |
//!                    begin_drag => DragError::AlreadyDragging (gesture kept)
//! ```

use crate::model::{Layout, RowId};
use crate::order::{derive_rows, reorder_field, reorder_row};
use thiserror::Error;
use tracing::{debug, warn};

/// What is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragKind {
    /// A single field, moved within or between rows.
    Field,
    /// A whole row, moved within the row sequence.
    Row,
}

/// A drop zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    /// The fields of one row; indices address the row's members.
    Row(RowId),
    /// The sequence of rows; indices address derived row positions.
    Rows,
}

impl Container {
    fn accepts(self, kind: DragKind) -> bool {
        matches!(
            (self, kind),
            (Container::Row(_), DragKind::Field) | (Container::Rows, DragKind::Row)
        )
    }
}

/// Where a gesture started or ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DragPosition {
    /// Drop zone.
    pub container: Container,
    /// Position within the drop zone.
    pub index: usize,
}

impl DragPosition {
    /// Position `index` within `container`.
    pub fn new(container: Container, index: usize) -> Self {
        Self { container, index }
    }
}

/// Coordinator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A gesture started and not yet dropped or cancelled.
    Dragging {
        /// What is being dragged.
        kind: DragKind,
        /// Where the gesture started.
        source: DragPosition,
    },
}

/// Rejected drag gestures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DragError {
    /// `begin_drag` while another gesture is active.
    #[error("a drag gesture is already in progress")]
    AlreadyDragging,
    /// The source container does not hold items of this kind.
    #[error("{kind:?} cannot be dragged from {container:?}")]
    IncompatibleSource {
        /// Requested gesture kind.
        kind: DragKind,
        /// Container the gesture tried to start from.
        container: Container,
    },
}

/// Single-gesture drag state machine.
#[derive(Debug, Clone, Default)]
pub struct DragCoordinator {
    state: DragState,
}

impl DragCoordinator {
    /// Idle coordinator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Whether a gesture is active.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Start a gesture. Rejected while another gesture is active; the active
    /// gesture is kept.
    pub fn begin_drag(
        &mut self,
        kind: DragKind,
        container: Container,
        index: usize,
    ) -> Result<(), DragError> {
        if self.is_dragging() {
            warn!(?kind, ?container, index, "begin_drag rejected: gesture in progress");
            return Err(DragError::AlreadyDragging);
        }
        if !container.accepts(kind) {
            return Err(DragError::IncompatibleSource { kind, container });
        }
        let source = DragPosition::new(container, index);
        debug!(?kind, ?source, "drag started");
        self.state = DragState::Dragging { kind, source };
        Ok(())
    }

    /// Abort the active gesture, if any.
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            debug!("drag cancelled");
        }
        self.state = DragState::Idle;
    }

    /// Finish the gesture and apply it to `layout`.
    ///
    /// Dropping outside any container (`None`), onto a container of the wrong
    /// kind, or back onto the source position leaves the layout unchanged.
    /// Always returns the coordinator to `Idle`.
    pub fn drop(&mut self, layout: Layout, destination: Option<DragPosition>) -> Layout {
        let state = std::mem::take(&mut self.state);
        let DragState::Dragging { kind, source } = state else {
            debug!("drop ignored: no gesture in progress");
            return layout;
        };

        let Some(destination) = destination else {
            debug!(?kind, "dropped outside any container");
            return layout;
        };
        if !destination.container.accepts(kind) {
            debug!(?kind, ?destination, "dropped onto incompatible container");
            return layout;
        }
        if destination == source {
            debug!(?kind, ?source, "dropped at source position");
            return layout;
        }

        match (kind, source.container, destination.container) {
            (DragKind::Field, Container::Row(source_row), Container::Row(dest_row)) => {
                let field_id = derive_rows(&layout)
                    .iter()
                    .find(|row| row.id == source_row)
                    .and_then(|row| row.fields.get(source.index))
                    .map(|field| field.id.clone());
                match field_id {
                    Some(field_id) => reorder_field(layout, &field_id, dest_row, destination.index),
                    None => {
                        warn!(?source, "drop ignored: no field at drag source");
                        layout
                    }
                }
            }
            (DragKind::Row, _, _) => reorder_row(layout, source.index, destination.index),
            _ => layout,
        }
    }
}

#[cfg(test)]
#[path = "drag_tests.rs"]
mod tests;
