use thiserror::Error;

use crate::entity::ItemStatus;

#[derive(Error, Debug)]
pub enum SparkError {
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Id prefix '{prefix}' is ambiguous ({matches} items match)")]
    AmbiguousId { prefix: String, matches: usize },

    #[error("Cannot move item from {from} to {to}")]
    InvalidTransition { from: ItemStatus, to: ItemStatus },

    #[error("Invalid collection: {0}")]
    InvalidCollection(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SparkError>;
