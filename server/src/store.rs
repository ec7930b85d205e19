//! In-memory item store.
//!
//! # Design
//! `ItemStore` is the only owner of the item collection. The collection sits
//! behind a single `RwLock` that every operation holds for its whole body, so
//! a create/update/delete is never observed half-applied. Items are kept in a
//! `Vec` to preserve insertion order; lookups are linear scans by id.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::StoreError;

/// A single item held by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub description: String,
}

/// Request payload for creating an item. Both fields are required, but are
/// optional here so that a missing field surfaces as a validation error
/// instead of a decode error.
#[derive(Debug, Default, Deserialize)]
pub struct NewItem {
    #[serde(default, deserialize_with = "loose_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub description: Option<String>,
}

/// Request payload for updating an item. Absent or empty fields keep the
/// current value.
#[derive(Debug, Default, Deserialize)]
pub struct ItemPatch {
    #[serde(default, deserialize_with = "loose_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub description: Option<String>,
}

/// Accept any JSON value for a text field. `null`, `false`, `0` and `""`
/// count as not supplied; strings are taken as-is and anything else is kept
/// as its JSON text.
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    };
    Ok(text)
}

/// How `ItemStore::create` picks the id of a new item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum IdAssignment {
    /// Count of items ever created, plus one. Ids are never reused.
    #[default]
    Sequence,
    /// Current collection size, plus one. Can hand out an id that is still
    /// in use once items have been deleted.
    Length,
}

#[derive(Debug, Default)]
struct Items {
    entries: Vec<Item>,
    created: u64,
}

impl Items {
    fn position(&self, id: u64) -> Option<usize> {
        self.entries.iter().position(|item| item.id == id)
    }
}

#[derive(Debug, Default)]
pub struct ItemStore {
    items: RwLock<Items>,
    assignment: IdAssignment,
}

impl ItemStore {
    pub fn new(assignment: IdAssignment) -> Self {
        Self {
            items: RwLock::new(Items::default()),
            assignment,
        }
    }

    /// Append a new item. Fails without touching the collection when either
    /// field is missing or empty.
    pub async fn create(&self, input: NewItem) -> Result<Item, StoreError> {
        let (Some(name), Some(description)) = (supplied(input.name), supplied(input.description))
        else {
            tracing::debug!("rejected item without name or description");
            return Err(StoreError::Validation);
        };

        let mut items = self.items.write().await;
        let id = match self.assignment {
            IdAssignment::Sequence => items.created + 1,
            IdAssignment::Length => items.entries.len() as u64 + 1,
        };
        let item = Item {
            id,
            name,
            description,
        };
        items.created += 1;
        items.entries.push(item.clone());
        tracing::debug!(id, "created item");
        Ok(item)
    }

    /// All items, in insertion order.
    pub async fn list(&self) -> Vec<Item> {
        self.items.read().await.entries.clone()
    }

    pub async fn get(&self, id: u64) -> Result<Item, StoreError> {
        let items = self.items.read().await;
        items
            .entries
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    /// Overwrite the supplied fields of an item in place. The id and the
    /// item's position never change.
    pub async fn update(&self, id: u64, patch: ItemPatch) -> Result<Item, StoreError> {
        let mut items = self.items.write().await;
        let index = items.position(id).ok_or(StoreError::NotFound)?;
        let item = &mut items.entries[index];
        if let Some(name) = supplied(patch.name) {
            item.name = name;
        }
        if let Some(description) = supplied(patch.description) {
            item.description = description;
        }
        tracing::debug!(id, "updated item");
        Ok(item.clone())
    }

    /// Remove an item, keeping the remaining items in order.
    pub async fn delete(&self, id: u64) -> Result<(), StoreError> {
        let mut items = self.items.write().await;
        let index = items.position(id).ok_or(StoreError::NotFound)?;
        items.entries.remove(index);
        tracing::debug!(id, "deleted item");
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.entries.is_empty()
    }
}

/// A field counts as supplied only when present and non-empty.
fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
