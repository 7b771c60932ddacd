// src/entity/kind.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Tutorial,
    Course,
    Book,
    Article,
    Project,
    Idea,
    #[default]
    Other,
}

impl ItemType {
    pub const ALL: [ItemType; 7] = [
        ItemType::Tutorial,
        ItemType::Course,
        ItemType::Book,
        ItemType::Article,
        ItemType::Project,
        ItemType::Idea,
        ItemType::Other,
    ];

    /// Parse a type name, coercing anything unrecognised to `Other`.
    pub fn from_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ItemType::Tutorial => "📺",
            ItemType::Course => "🎓",
            ItemType::Book => "📚",
            ItemType::Article => "📝",
            ItemType::Project => "🛠️",
            ItemType::Idea => "💡",
            ItemType::Other => "📌",
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemType::Tutorial => write!(f, "tutorial"),
            ItemType::Course => write!(f, "course"),
            ItemType::Book => write!(f, "book"),
            ItemType::Article => write!(f, "article"),
            ItemType::Project => write!(f, "project"),
            ItemType::Idea => write!(f, "idea"),
            ItemType::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tutorial" => Ok(ItemType::Tutorial),
            "course" => Ok(ItemType::Course),
            "book" => Ok(ItemType::Book),
            "article" => Ok(ItemType::Article),
            "project" => Ok(ItemType::Project),
            "idea" => Ok(ItemType::Idea),
            "other" => Ok(ItemType::Other),
            _ => Err(format!("Invalid item type: {}", s)),
        }
    }
}

impl<'de> Deserialize<'de> for ItemType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(raw) => ItemType::from_lenient(&raw),
            _ => ItemType::Other,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Envisioned,
    InProgress,
    Discarded,
    Completed,
}

impl ItemStatus {
    /// Board columns, left to right.
    pub const ALL: [ItemStatus; 4] = [
        ItemStatus::Envisioned,
        ItemStatus::InProgress,
        ItemStatus::Discarded,
        ItemStatus::Completed,
    ];

    pub fn column_title(&self) -> &'static str {
        match self {
            ItemStatus::Envisioned => "Spark",
            ItemStatus::InProgress => "In Progress",
            ItemStatus::Discarded => "Discarded",
            ItemStatus::Completed => "Fire",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ItemStatus::Envisioned => "✨",
            ItemStatus::InProgress => "🌱",
            ItemStatus::Discarded => "🗑️",
            ItemStatus::Completed => "🔥",
        }
    }

    /// Label for the date shown next to a card in this column.
    pub fn date_label(&self) -> &'static str {
        match self {
            ItemStatus::Envisioned => "Added",
            ItemStatus::InProgress => "Last accessed",
            ItemStatus::Discarded => "Discarded",
            ItemStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemStatus::Envisioned => write!(f, "envisioned"),
            ItemStatus::InProgress => write!(f, "in_progress"),
            ItemStatus::Discarded => write!(f, "discarded"),
            ItemStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "envisioned" | "spark" => Ok(ItemStatus::Envisioned),
            "in_progress" | "inprogress" => Ok(ItemStatus::InProgress),
            "discarded" => Ok(ItemStatus::Discarded),
            "completed" | "fire" => Ok(ItemStatus::Completed),
            _ => Err(format!("Invalid item status: {}", s)),
        }
    }
}

// Records without a recognisable status land in the Spark column.
impl<'de> Deserialize<'de> for ItemStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(raw) => raw.parse().unwrap_or_default(),
            _ => ItemStatus::Envisioned,
        })
    }
}
