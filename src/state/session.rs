//! Layout session.
//!
//! Binds the active dataset (its columns and document key) to the layout
//! being edited, and mediates save/switch/delete against a
//! [`PersistencePort`].

use crate::model::{Column, DocumentKey, Layout, LayoutAction, Row};
use crate::order::{derive_rows, generate_default, next_row_id};
use crate::persistence::{LayoutCollection, PersistenceError, PersistencePort, SavedLayout};
use crate::state::drag::{Container, DragCoordinator, DragError, DragKind, DragPosition};
use crate::state::handle_layout_action;
use tracing::{debug, info};

/// Name given to generated layouts and to saves with a blank name.
pub const DEFAULT_LAYOUT_NAME: &str = "Default";

/// Editing session for one dataset's form layout.
#[derive(Debug)]
pub struct LayoutSession<P: PersistencePort> {
    store: P,
    columns: Vec<Column>,
    document_key: DocumentKey,
    layout: Layout,
    layout_name: String,
    collection: LayoutCollection,
    drag: DragCoordinator,
}

impl<P: PersistencePort> LayoutSession<P> {
    /// Session with no dataset loaded yet. Call [`initialize`](Self::initialize)
    /// once the columns are known.
    pub fn new(store: P) -> Self {
        Self {
            store,
            columns: Vec::new(),
            document_key: DocumentKey::default(),
            layout: Layout::default(),
            layout_name: DEFAULT_LAYOUT_NAME.to_string(),
            collection: LayoutCollection::new(),
            drag: DragCoordinator::new(),
        }
    }

    /// Bind the session to a column set and document key.
    ///
    /// Reloads the saved layouts, then adopts the one stored under
    /// `document_key` if it covers exactly these columns; otherwise starts
    /// from the default layout. Call again whenever the column set changes.
    pub fn initialize(&mut self, columns: Vec<Column>, document_key: DocumentKey) {
        self.collection = LayoutCollection::load(&self.store);
        self.drag.cancel();

        let stored = self
            .collection
            .get(&document_key)
            .filter(|saved| saved.layout.matches_columns(&columns));

        match stored {
            Some(saved) => {
                info!(
                    key = %document_key,
                    name = %saved.name,
                    fields = saved.layout.len(),
                    "adopted saved layout"
                );
                self.layout = saved.layout.clone();
                self.layout_name = saved.name.clone();
            }
            None => {
                if self.collection.contains(&document_key) {
                    info!(key = %document_key, "saved layout does not match columns, using default");
                } else {
                    debug!(key = %document_key, "no saved layout, using default");
                }
                self.layout = generate_default(&columns);
                self.layout_name = DEFAULT_LAYOUT_NAME.to_string();
            }
        }

        self.columns = columns;
        self.document_key = document_key;
    }

    /// Save the current layout under the current document key.
    ///
    /// The name is trimmed; a blank name becomes "Default". The whole
    /// collection is rewritten; the in-memory collection and name only change
    /// once the write succeeded.
    pub fn save_as(&mut self, name: &str) -> Result<(), PersistenceError> {
        let name = match name.trim() {
            "" => DEFAULT_LAYOUT_NAME,
            trimmed => trimmed,
        };

        let mut updated = self.collection.clone();
        updated.insert(
            self.document_key.clone(),
            SavedLayout {
                name: name.to_string(),
                layout: self.layout.clone(),
            },
        );
        updated.save(&mut self.store)?;

        info!(key = %self.document_key, name, "layout saved");
        self.collection = updated;
        self.layout_name = name.to_string();
        Ok(())
    }

    /// Adopt the layout saved under `key`. Returns `false` (and changes
    /// nothing) when there is none.
    pub fn switch_to(&mut self, key: &DocumentKey) -> bool {
        let Some(saved) = self.collection.get(key) else {
            debug!(key = %key, "switch_to: no such saved layout");
            return false;
        };
        info!(key = %key, name = %saved.name, "switched layout");
        self.layout = saved.layout.clone();
        self.layout_name = saved.name.clone();
        self.drag.cancel();
        true
    }

    /// Remove the layout saved under `key` and persist the collection.
    ///
    /// Unknown keys are a no-op returning `Ok(false)`. Deleting the active key
    /// leaves the layout being edited untouched.
    pub fn delete_saved(&mut self, key: &DocumentKey) -> Result<bool, PersistenceError> {
        if !self.collection.contains(key) {
            debug!(key = %key, "delete_saved: no such saved layout");
            return Ok(false);
        }
        let mut updated = self.collection.clone();
        updated.remove(key);
        updated.save(&mut self.store)?;

        info!(key = %key, "saved layout deleted");
        self.collection = updated;
        Ok(true)
    }

    /// Replace the current layout with the default for the current columns.
    /// Saved layouts are not touched.
    pub fn restore_default(&mut self) {
        self.layout = generate_default(&self.columns);
        self.layout_name = DEFAULT_LAYOUT_NAME.to_string();
        self.drag.cancel();
        info!(key = %self.document_key, "restored default layout");
    }

    /// Apply a layout action to the current layout.
    pub fn apply(&mut self, action: LayoutAction) {
        let layout = std::mem::take(&mut self.layout);
        self.layout = handle_layout_action(layout, action);
    }

    /// Start a drag gesture. See [`DragCoordinator::begin_drag`].
    pub fn begin_drag(
        &mut self,
        kind: DragKind,
        container: Container,
        index: usize,
    ) -> Result<(), DragError> {
        self.drag.begin_drag(kind, container, index)
    }

    /// Finish the active drag gesture. See [`DragCoordinator::drop`].
    pub fn drop_at(&mut self, destination: Option<DragPosition>) {
        let layout = std::mem::take(&mut self.layout);
        self.layout = self.drag.drop(layout, destination);
    }

    /// Abort the active drag gesture, if any.
    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Whether a drag gesture is active.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Rows of the current layout, in display order.
    pub fn rows(&self) -> Vec<Row<'_>> {
        derive_rows(&self.layout)
    }

    /// Container for dropping a field into a brand-new row.
    pub fn new_row_container(&self) -> Container {
        Container::Row(next_row_id(&self.layout))
    }

    /// `(document key, layout name)` of every saved layout, in key order.
    pub fn saved_layouts(&self) -> Vec<(&DocumentKey, &str)> {
        self.collection
            .iter()
            .map(|(key, saved)| (key, saved.name.as_str()))
            .collect()
    }

    /// Name to pre-fill when saving: the current layout's name, or empty
    /// while it is still the generated "Default".
    pub fn suggested_save_name(&self) -> &str {
        if self.layout_name == DEFAULT_LAYOUT_NAME {
            ""
        } else {
            &self.layout_name
        }
    }

    /// Layout being edited.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Name of the layout being edited.
    pub fn layout_name(&self) -> &str {
        &self.layout_name
    }

    /// Key the current dataset saves under.
    pub fn document_key(&self) -> &DocumentKey {
        &self.document_key
    }

    /// Columns of the current dataset.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Saved layouts as last loaded or written.
    pub fn collection(&self) -> &LayoutCollection {
        &self.collection
    }

    /// Persistence port.
    pub fn store(&self) -> &P {
        &self.store
    }

    /// Consume the session, returning its persistence port.
    pub fn into_store(self) -> P {
        self.store
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
