//! Automatic discarding of in-progress items nobody has opened lately.

use chrono::{DateTime, Utc};

use crate::entity::{Collection, Item, ItemStatus, Timestamp};

pub const DEFAULT_DECAY_DAYS: u32 = 7;

/// Whole days from `since` to `now`, truncated.
pub fn elapsed_days(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - since).num_days()
}

/// An in-progress item is stale when its last access is missing, unparseable,
/// or at least `threshold_days` whole days old.
pub fn is_stale(item: &Item, now: DateTime<Utc>, threshold_days: u32) -> bool {
    if item.status != ItemStatus::InProgress {
        return false;
    }
    match item.last_accessed_at.as_ref().and_then(Timestamp::parse) {
        Some(last) => elapsed_days(last, now) >= i64::from(threshold_days),
        None => true,
    }
}

/// Move every stale item to discarded, stamping `discarded_at` with `now`.
///
/// Returns the ids that changed, in collection order.
pub fn apply_decay(collection: &mut Collection, now: DateTime<Utc>, threshold_days: u32) -> Vec<String> {
    let stamp = Timestamp::from(now);
    let mut decayed = Vec::new();
    for item in &mut collection.items {
        if is_stale(item, now, threshold_days) {
            item.status = ItemStatus::Discarded;
            item.discarded_at = Some(stamp.clone());
            decayed.push(item.id.clone());
        }
    }
    decayed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ItemType;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
    }

    fn in_progress(id: &str, last_accessed: Option<Timestamp>) -> Item {
        let mut item = Item::new(
            id.to_string(),
            id,
            ItemType::Tutorial,
            Timestamp::from(now() - Duration::days(30)),
        );
        item.status = ItemStatus::InProgress;
        item.moved_to_in_progress_at = Some(Timestamp::from(now() - Duration::days(20)));
        item.last_accessed_at = last_accessed;
        item
    }

    fn accessed_ago(ago: Duration) -> Option<Timestamp> {
        Some(Timestamp::from(now() - ago))
    }

    #[test]
    fn test_elapsed_days_truncates() {
        let since = now() - Duration::days(6) - Duration::hours(23);
        assert_eq!(elapsed_days(since, now()), 6);
        assert_eq!(elapsed_days(now() - Duration::days(7), now()), 7);
        assert_eq!(elapsed_days(now() + Duration::hours(3), now()), 0);
    }

    #[test]
    fn test_just_over_threshold_decays() {
        let mut collection = Collection {
            items: vec![in_progress("old", accessed_ago(Duration::days(7) + Duration::seconds(1)))],
        };
        let decayed = apply_decay(&mut collection, now(), DEFAULT_DECAY_DAYS);

        assert_eq!(decayed, vec!["old".to_string()]);
        let item = &collection.items[0];
        assert_eq!(item.status, ItemStatus::Discarded);
        assert_eq!(item.discarded_at, Some(Timestamp::from(now())));
    }

    #[test]
    fn test_exactly_threshold_decays() {
        let mut collection = Collection {
            items: vec![in_progress("edge", accessed_ago(Duration::days(7)))],
        };
        assert_eq!(apply_decay(&mut collection, now(), 7).len(), 1);
    }

    #[test]
    fn test_just_under_threshold_stays() {
        let mut collection = Collection {
            items: vec![in_progress(
                "fresh",
                accessed_ago(Duration::days(6) + Duration::hours(23)),
            )],
        };
        let decayed = apply_decay(&mut collection, now(), DEFAULT_DECAY_DAYS);

        assert!(decayed.is_empty());
        assert_eq!(collection.items[0].status, ItemStatus::InProgress);
        assert!(collection.items[0].discarded_at.is_none());
    }

    #[test]
    fn test_missing_last_access_decays() {
        let mut collection = Collection {
            items: vec![in_progress("never", None)],
        };
        apply_decay(&mut collection, now(), DEFAULT_DECAY_DAYS);
        assert_eq!(collection.items[0].status, ItemStatus::Discarded);
    }

    #[test]
    fn test_malformed_last_access_decays() {
        let mut collection = Collection {
            items: vec![
                in_progress("garbled", Some(Timestamp::raw("yesterday-ish"))),
                in_progress("empty", Some(Timestamp::raw(""))),
            ],
        };
        let decayed = apply_decay(&mut collection, now(), DEFAULT_DECAY_DAYS);
        assert_eq!(decayed.len(), 2);
    }

    #[test]
    fn test_other_statuses_never_decay() {
        let mut spark = in_progress("spark", None);
        spark.status = ItemStatus::Envisioned;
        let mut fire = in_progress("fire", None);
        fire.status = ItemStatus::Completed;
        let mut trash = in_progress("trash", None);
        trash.status = ItemStatus::Discarded;
        let mut collection = Collection {
            items: vec![spark, fire, trash],
        };
        let before = collection.clone();

        assert!(apply_decay(&mut collection, now(), DEFAULT_DECAY_DAYS).is_empty());
        assert_eq!(collection, before);
    }

    #[test]
    fn test_naive_timestamp_is_read_as_utc() {
        let mut collection = Collection {
            items: vec![in_progress("naive", Some(Timestamp::raw("2026-06-14T12:00:00")))],
        };
        assert!(apply_decay(&mut collection, now(), DEFAULT_DECAY_DAYS).is_empty());
    }

    #[test]
    fn test_custom_threshold() {
        let mut collection = Collection {
            items: vec![in_progress("two", accessed_ago(Duration::days(2)))],
        };
        assert!(apply_decay(&mut collection.clone(), now(), 3).is_empty());
        assert_eq!(apply_decay(&mut collection, now(), 2).len(), 1);
    }
}
