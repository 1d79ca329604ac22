use chrono::{DateTime, FixedOffset};
use core::cmp::Reverse;

use crate::PlayerRecord;

pub const RECENT_ACTIVITY_LIMIT: usize = 10;

fn modified_at(record: &PlayerRecord) -> Option<DateTime<FixedOffset>> {
    record
        .last_modified_at
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
}

/// Most recently active players first, at most [`RECENT_ACTIVITY_LIMIT`] of them.
///
/// Records whose timestamp is missing or unreadable sort after all others. Records are
/// otherwise returned untouched.
pub fn recent_activity(mut records: Vec<PlayerRecord>) -> Vec<PlayerRecord> {
    records.sort_by_cached_key(|record| Reverse(modified_at(record)));
    records.truncate(RECENT_ACTIVITY_LIMIT);
    records
}
