mod json_store;

pub use json_store::{JsonStore, DEFAULT_DATA_FILE};

use crate::entity::Collection;
use crate::error::Result;

/// Whole-collection persistence.
///
/// `load` never fails: a missing or damaged backing file yields an empty
/// collection. `save` either replaces the previous state completely or
/// leaves it untouched.
pub trait Store {
    fn load(&self) -> Collection;
    fn save(&self, collection: &Collection) -> Result<()>;
}

impl<S: Store + ?Sized> Store for &S {
    fn load(&self) -> Collection {
        (**self).load()
    }

    fn save(&self, collection: &Collection) -> Result<()> {
        (**self).save(collection)
    }
}
