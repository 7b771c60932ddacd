//! Decay warnings for the board.
//!
//! This module flags in-progress items that will be discarded on a coming
//! load unless someone opens them.

use chrono::{DateTime, Utc};

use crate::entity::{Collection, ItemStatus, Timestamp};
use crate::lifecycle::elapsed_days;

/// A warning about an item close to decaying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// In-progress item with `days_left` whole days before it is discarded.
    DecayingSoon {
        id: String,
        title: String,
        days_left: i64,
    },
}

/// Check in-progress items against the decay threshold.
///
/// # Arguments
/// * `collection` - The board, after the decay sweep has run
/// * `now` - Current instant
/// * `decay_days` - Decay threshold in whole days
/// * `warn_days` - Warn when this many days or fewer remain
///
/// # Returns
/// A vector of warnings in collection order (empty if nothing is close)
pub fn check_decay(
    collection: &Collection,
    now: DateTime<Utc>,
    decay_days: u32,
    warn_days: u32,
) -> Vec<Warning> {
    collection
        .in_column(ItemStatus::InProgress)
        .filter_map(|item| {
            let last = item.last_accessed_at.as_ref().and_then(Timestamp::parse)?;
            let days_left = i64::from(decay_days) - elapsed_days(last, now);
            (days_left <= i64::from(warn_days)).then(|| Warning::DecayingSoon {
                id: item.id.clone(),
                title: item.title.clone(),
                days_left,
            })
        })
        .collect()
}

/// Format a warning for display.
pub fn format_warning(warning: &Warning) -> String {
    match warning {
        Warning::DecayingSoon {
            title, days_left, ..
        } if *days_left <= 0 => {
            format!("Warning: '{}' is due to decay on the next load", title)
        }
        Warning::DecayingSoon {
            title, days_left, ..
        } => {
            let unit = if *days_left == 1 { "day" } else { "days" };
            format!(
                "Warning: '{}' decays in {} {} unless you open it",
                title, days_left, unit
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Item, ItemType};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap()
    }

    fn active(id: &str, accessed_days_ago: i64) -> Item {
        let mut item = Item::new(id.to_string(), id, ItemType::Book, Timestamp::from(now()));
        item.status = ItemStatus::InProgress;
        item.last_accessed_at = Some(Timestamp::from(now() - Duration::days(accessed_days_ago)));
        item
    }

    #[test]
    fn test_no_warnings_when_recently_opened() {
        let collection = Collection {
            items: vec![active("a", 1), active("b", 4)],
        };
        assert!(check_decay(&collection, now(), 7, 2).is_empty());
    }

    #[test]
    fn test_warns_inside_window() {
        let collection = Collection {
            items: vec![active("a", 5), active("b", 6), active("c", 1)],
        };
        let warnings = check_decay(&collection, now(), 7, 2);
        assert_eq!(warnings.len(), 2);
        match &warnings[1] {
            Warning::DecayingSoon { id, days_left, .. } => {
                assert_eq!(id, "b");
                assert_eq!(*days_left, 1);
            }
        }
    }

    #[test]
    fn test_ignores_other_columns_and_missing_timestamps() {
        let mut spark = active("spark", 6);
        spark.status = ItemStatus::Envisioned;
        let mut unknown = active("unknown", 6);
        unknown.last_accessed_at = None;
        let collection = Collection {
            items: vec![spark, unknown],
        };
        assert!(check_decay(&collection, now(), 7, 2).is_empty());
    }

    #[test]
    fn test_format_days_left() {
        let msg = format_warning(&Warning::DecayingSoon {
            id: "a".to_string(),
            title: "Async book".to_string(),
            days_left: 2,
        });
        assert!(msg.contains("Async book"));
        assert!(msg.contains("2 days"));

        let msg = format_warning(&Warning::DecayingSoon {
            id: "a".to_string(),
            title: "Async book".to_string(),
            days_left: 1,
        });
        assert!(msg.contains("1 day "));
    }

    #[test]
    fn test_format_overdue() {
        let msg = format_warning(&Warning::DecayingSoon {
            id: "a".to_string(),
            title: "Old".to_string(),
            days_left: 0,
        });
        assert!(msg.contains("next load"));
    }
}
