// src/entity/item.rs
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{ItemStatus, ItemType, Timestamp};
use crate::error::{Result, SparkError};

pub const UNTITLED: &str = "Untitled";

/// Trim a title, falling back to [`UNTITLED`] when nothing is left.
pub fn normalize_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}

fn untitled() -> String {
    UNTITLED.to_string()
}

/// Field decoders that accept whatever an older or hand-edited file holds,
/// so any JSON object decodes to an item `save` will accept again.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::{normalize_title, untitled};

    /// Strings and numbers are kept; anything else becomes empty and is
    /// given a fresh id by the store.
    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(id) => id,
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        })
    }

    pub fn title<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(title) => normalize_title(&title),
            _ => untitled(),
        })
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => None,
            Value::String(text) => Some(text),
            other => Some(other.to_string()),
        })
    }
}

/// A single learning task on the board.
///
/// Every field is serialized, nullable ones as explicit `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default = "untitled", deserialize_with = "lenient::title")]
    pub title: String,
    #[serde(rename = "type", default)]
    pub item_type: ItemType,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub date_added: Timestamp,
    pub moved_to_in_progress_at: Option<Timestamp>,
    pub last_accessed_at: Option<Timestamp>,
    pub discarded_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub takeaways: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub learning_notes: Option<String>,
}

impl Item {
    pub fn new(id: String, title: &str, item_type: ItemType, now: Timestamp) -> Self {
        Self {
            id,
            title: normalize_title(title),
            item_type,
            status: ItemStatus::Envisioned,
            date_added: now,
            moved_to_in_progress_at: None,
            last_accessed_at: None,
            discarded_at: None,
            completed_at: None,
            takeaways: None,
            learning_notes: None,
        }
    }

    /// The date a card shows in its current column.
    pub fn column_date(&self) -> Option<&Timestamp> {
        match self.status {
            ItemStatus::Envisioned => {
                Some(&self.date_added).filter(|added| !added.as_str().is_empty())
            }
            ItemStatus::InProgress => self
                .last_accessed_at
                .as_ref()
                .or(self.moved_to_in_progress_at.as_ref()),
            ItemStatus::Discarded => self.discarded_at.as_ref(),
            ItemStatus::Completed => self.completed_at.as_ref(),
        }
    }

    /// Short id used in listings.
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

/// Field changes accepted by `Board::update`. Fields left as `None` are untouched.
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub title: Option<String>,
    pub item_type: Option<ItemType>,
    pub takeaways: Option<Option<String>>, // Some(None) to clear, Some(Some(s)) to set
    pub learning_notes: Option<Option<String>>,
}

impl ItemUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.item_type.is_none()
            && self.takeaways.is_none()
            && self.learning_notes.is_none()
    }

    pub(crate) fn apply_to(self, item: &mut Item) {
        if let Some(title) = self.title {
            item.title = normalize_title(&title);
        }
        if let Some(item_type) = self.item_type {
            item.item_type = item_type;
        }
        if let Some(takeaways) = self.takeaways {
            item.takeaways = takeaways;
        }
        if let Some(notes) = self.learning_notes {
            item.learning_notes = notes;
        }
    }
}

/// The whole board, persisted as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub items: Vec<Item>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn remove(&mut self, id: &str) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Items in one board column, in stored order.
    pub fn in_column(&self, status: ItemStatus) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |item| item.status == status)
    }

    /// Number of completed items ("collected fires").
    pub fn fire_count(&self) -> usize {
        self.in_column(ItemStatus::Completed).count()
    }

    /// Find an item by exact id, or else by a unique id prefix.
    pub fn resolve(&self, id_or_prefix: &str) -> Result<&Item> {
        if let Some(item) = self.get(id_or_prefix) {
            return Ok(item);
        }
        if id_or_prefix.is_empty() {
            return Err(SparkError::ItemNotFound(id_or_prefix.to_string()));
        }

        let mut matches = self
            .items
            .iter()
            .filter(|item| item.id.starts_with(id_or_prefix));
        match (matches.next(), matches.count()) {
            (Some(item), 0) => Ok(item),
            (Some(_), rest) => Err(SparkError::AmbiguousId {
                prefix: id_or_prefix.to_string(),
                matches: rest + 1,
            }),
            (None, _) => Err(SparkError::ItemNotFound(id_or_prefix.to_string())),
        }
    }

    /// Check the invariants a collection must hold before it is written.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if item.id.is_empty() {
                return Err(SparkError::InvalidCollection(
                    "item with empty id".to_string(),
                ));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(SparkError::InvalidCollection(format!(
                    "duplicate item id {}",
                    item.id
                )));
            }
            if item.title.trim().is_empty() {
                return Err(SparkError::InvalidCollection(format!(
                    "item {} has a blank title",
                    item.id
                )));
            }
        }
        Ok(())
    }
}
