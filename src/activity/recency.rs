//! Keeps only repositories pushed to inside the activity window.

use chrono::{DateTime, Utc};

use crate::activity::clock::six_months_before;
use crate::github::models::RepositoryRecord;

/// Returns the records pushed strictly after six months before `now`.
///
/// Relative order is preserved. Records without a push time, including
/// failed-page placeholders, never pass.
#[must_use]
pub fn filter_recent(records: Vec<RepositoryRecord>, now: DateTime<Utc>) -> Vec<RepositoryRecord> {
    let cutoff = six_months_before(now);
    records
        .into_iter()
        .filter(|record| record.pushed_at.is_some_and(|pushed| pushed > cutoff))
        .collect()
}
