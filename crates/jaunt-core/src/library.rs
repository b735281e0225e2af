//! The session-scoped library of reusable events.
//!
//! The library holds detached copies of events the author wants to reuse.
//! It lives and dies with the authoring session: nothing here is ever sent
//! to the backend, and closing the session drops it.

use serde::{Deserialize, Serialize};

use crate::error::{AuthoringError, Result};
use crate::models::LibraryItem;

/// An ordered collection of library items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Library {
    items: Vec<LibraryItem>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an item, returning its ID.
    pub fn add(&mut self, item: LibraryItem) -> u64 {
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Looks up an item by ID.
    pub fn get(&self, item_id: u64) -> Option<&LibraryItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Removes an item by ID, returning it.
    pub fn remove(&mut self, item_id: u64) -> Result<LibraryItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or(AuthoringError::LibraryItemNotFound { id: item_id })?;
        Ok(self.items.remove(index))
    }

    /// All items in insertion order.
    pub fn items(&self) -> &[LibraryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
