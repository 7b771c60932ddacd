use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, warn};
use uuid::Uuid;

use super::Store;
use crate::entity::{Collection, Item};
use crate::error::Result;

pub const DEFAULT_DATA_FILE: &str = "data.json";

/// Stores the board as a pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Option<Value> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no data file yet, starting empty");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable data file, starting empty");
                return None;
            }
        };

        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt data file, starting empty");
                None
            }
        }
    }
}

/// Decode `{"items": [...]}`.
///
/// Every object in `items` is kept. Records with a missing or repeated id get
/// a fresh one so the loaded collection always passes `Collection::validate`.
/// Entries that are not objects are skipped.
fn collection_from_value(value: Value) -> Option<Collection> {
    let Value::Object(mut root) = value else {
        return None;
    };
    let Some(Value::Array(raw_items)) = root.remove("items") else {
        return None;
    };

    let mut seen: HashSet<String> = HashSet::with_capacity(raw_items.len());
    let mut items: Vec<Item> = Vec::with_capacity(raw_items.len());
    for (index, raw) in raw_items.into_iter().enumerate() {
        if !raw.is_object() {
            warn!(index, "skipping record that is not an object");
            continue;
        }
        let mut item = match serde_json::from_value::<Item>(raw) {
            Ok(item) => item,
            Err(e) => {
                warn!(index, error = %e, "skipping undecodable record");
                continue;
            }
        };
        if item.id.is_empty() || seen.contains(&item.id) {
            let fresh = Uuid::new_v4().to_string();
            warn!(index, old = %item.id, new = %fresh, "record had a missing or duplicate id, assigned a new one");
            item.id = fresh;
        }
        seen.insert(item.id.clone());
        items.push(item);
    }
    Some(Collection { items })
}

impl Store for JsonStore {
    fn load(&self) -> Collection {
        let Some(value) = self.read_document() else {
            return Collection::new();
        };
        match collection_from_value(value) {
            Some(collection) => {
                debug!(path = %self.path.display(), items = collection.len(), "loaded board");
                collection
            }
            None => {
                warn!(path = %self.path.display(), "data file is not an items document, starting empty");
                Collection::new()
            }
        }
    }

    fn save(&self, collection: &Collection) -> Result<()> {
        collection.validate()?;

        let mut bytes = serde_json::to_vec_pretty(collection)?;
        bytes.push(b'\n');

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        // Same directory as the target so the final rename stays on one filesystem.
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), items = collection.len(), "saved board");
        Ok(())
    }
}
