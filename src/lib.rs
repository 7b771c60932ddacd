pub mod cli;
pub mod clock;
pub mod config;
pub mod entity;
pub mod error;
pub mod lifecycle;
pub mod storage;
pub mod warnings;

pub use config::BoardConfig;
pub use entity::{Collection, Item, ItemStatus, ItemType, ItemUpdate, Timestamp};
pub use error::{Result, SparkError};
pub use lifecycle::{apply_decay, Board};
pub use storage::{JsonStore, Store};
