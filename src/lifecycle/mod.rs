//! The board engine: creation, status transitions, access tracking, field
//! updates, deletion and decay.
//!
//! Every mutation is applied to a copy of the collection and only replaces
//! the in-memory state once the store has accepted the whole new collection.

mod decay;

pub use decay::{apply_decay, elapsed_days, is_stale, DEFAULT_DECAY_DAYS};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::clock::{Clock, IdGenerator, SystemClock, UuidGenerator};
use crate::entity::{Collection, Item, ItemStatus, ItemType, ItemUpdate, Timestamp};
use crate::error::{Result, SparkError};
use crate::storage::Store;

const MAX_ID_ATTEMPTS: usize = 16;

pub struct Board<S, C = SystemClock, G = UuidGenerator> {
    store: S,
    clock: C,
    ids: G,
    decay_days: u32,
    collection: Collection,
    decayed: Vec<String>,
}

impl<S: Store> Board<S> {
    /// Load the board from `store` and run the decay sweep.
    pub fn open(store: S, decay_days: u32) -> Result<Self> {
        Self::open_with(store, SystemClock, UuidGenerator, decay_days)
    }
}

impl<S: Store, C: Clock, G: IdGenerator> Board<S, C, G> {
    pub fn open_with(store: S, clock: C, ids: G, decay_days: u32) -> Result<Self> {
        let collection = store.load();
        let mut board = Self {
            store,
            clock,
            ids,
            decay_days,
            collection,
            decayed: Vec::new(),
        };
        board.decayed = board.apply_decay()?;
        Ok(board)
    }

    /// Re-read the store and sweep again.
    pub fn reload(&mut self) -> Result<()> {
        self.collection = self.store.load();
        self.decayed = self.apply_decay()?;
        Ok(())
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn items(&self) -> &[Item] {
        &self.collection.items
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.collection.get(id)
    }

    pub fn decay_days(&self) -> u32 {
        self.decay_days
    }

    /// Ids discarded by the sweep that ran when the board was last loaded.
    pub fn decayed_on_load(&self) -> &[String] {
        &self.decayed
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Discard stale in-progress items. Saves once if anything changed.
    pub fn apply_decay(&mut self) -> Result<Vec<String>> {
        let mut next = self.collection.clone();
        let decayed = apply_decay(&mut next, self.clock.now(), self.decay_days);
        if decayed.is_empty() {
            return Ok(decayed);
        }

        self.commit(next)?;
        for id in &decayed {
            info!(id = %id, days = self.decay_days, "decayed stale item to discarded");
        }
        Ok(decayed)
    }

    /// Add a new spark. An unknown `item_type` becomes `other`, a blank title
    /// becomes "Untitled".
    pub fn create(&mut self, title: &str, item_type: &str) -> Result<Item> {
        let item_type = ItemType::from_lenient(item_type);
        let id = self.fresh_id()?;
        let item = Item::new(id, title, item_type, Timestamp::from(self.clock.now()));

        let mut next = self.collection.clone();
        next.items.push(item.clone());
        self.commit(next)?;

        debug!(id = %item.id, item_type = %item.item_type, "created item");
        Ok(item)
    }

    /// Status moves return `Ok(false)` for an unknown id and for an item
    /// already in the target column, which is left untouched.
    pub fn move_to_in_progress(&mut self, id: &str) -> Result<bool> {
        self.transition(id, ItemStatus::InProgress)
    }

    pub fn move_to_discarded(&mut self, id: &str) -> Result<bool> {
        self.transition(id, ItemStatus::Discarded)
    }

    pub fn move_to_completed(&mut self, id: &str) -> Result<bool> {
        self.transition(id, ItemStatus::Completed)
    }

    /// Record that a card was opened. Only in-progress items are touched;
    /// returns whether anything changed.
    pub fn access(&mut self, id: &str) -> Result<bool> {
        let now = Timestamp::from(self.clock.now());
        let mut next = self.collection.clone();
        match next.get_mut(id) {
            Some(item) if item.status == ItemStatus::InProgress => {
                item.last_accessed_at = Some(now);
            }
            _ => return Ok(false),
        }
        self.commit(next)?;
        Ok(true)
    }

    /// Apply field changes regardless of status. Returns `false` for an unknown id.
    pub fn update(&mut self, id: &str, update: ItemUpdate) -> Result<bool> {
        let mut next = self.collection.clone();
        let Some(item) = next.get_mut(id) else {
            return Ok(false);
        };
        update.apply_to(item);
        self.commit(next)?;
        Ok(true)
    }

    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let mut next = self.collection.clone();
        if next.remove(id).is_none() {
            return Ok(false);
        }
        self.commit(next)?;
        debug!(id = %id, "deleted item");
        Ok(true)
    }

    fn transition(&mut self, id: &str, to: ItemStatus) -> Result<bool> {
        let now = Timestamp::from(self.clock.now());
        let mut next = self.collection.clone();
        let Some(item) = next.get_mut(id) else {
            return Ok(false);
        };
        if item.status == to {
            return Ok(false);
        }
        enter(item, to, now)?;
        self.commit(next)?;
        debug!(id = %id, status = %to, "moved item");
        Ok(true)
    }

    fn fresh_id(&self) -> Result<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if !id.is_empty() && !self.collection.contains(&id) {
                return Ok(id);
            }
        }
        Err(SparkError::InvalidCollection(
            "id generator keeps producing ids already in use".to_string(),
        ))
    }

    fn commit(&mut self, next: Collection) -> Result<()> {
        self.store.save(&next)?;
        self.collection = next;
        Ok(())
    }
}

/// Move `item` into `to`, stamping the matching timestamp.
fn enter(item: &mut Item, to: ItemStatus, now: Timestamp) -> Result<()> {
    match (item.status, to) {
        (ItemStatus::Envisioned | ItemStatus::Discarded, ItemStatus::InProgress) => {
            item.moved_to_in_progress_at = Some(now.clone());
            item.last_accessed_at = Some(now);
        }
        (ItemStatus::InProgress, ItemStatus::Completed) => {
            item.completed_at = Some(now);
        }
        (ItemStatus::InProgress, ItemStatus::Discarded) => {
            item.discarded_at = Some(now);
        }
        (from, to) => return Err(SparkError::InvalidTransition { from, to }),
    }
    item.status = to;
    Ok(())
}
