//! Data models for listed repositories and their commit activity.
//!
//! Types prefixed with `Api` are internal deserialisation targets that
//! convert into the public domain types.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use super::error::ActivityError;
use super::locator::RepositoryFullName;

/// One repository from the organization listing.
///
/// A record produced for a listing page that could not be fetched carries
/// only `fetch_error`; it has neither a name nor a push time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRecord {
    /// Organization-qualified name.
    pub full_name: Option<RepositoryFullName>,
    /// Time of the most recent push, if GitHub reported one.
    pub pushed_at: Option<DateTime<Utc>>,
    /// Error captured while fetching the page this record stands in for.
    pub fetch_error: Option<ActivityError>,
}

impl RepositoryRecord {
    /// Builds a record for a successfully listed repository.
    #[must_use]
    pub const fn listed(full_name: RepositoryFullName, pushed_at: Option<DateTime<Utc>>) -> Self {
        Self {
            full_name: Some(full_name),
            pushed_at,
            fetch_error: None,
        }
    }

    /// Builds a placeholder for a listing page that failed.
    #[must_use]
    pub const fn failed(error: ActivityError) -> Self {
        Self {
            full_name: None,
            pushed_at: None,
            fetch_error: Some(error),
        }
    }

    /// Returns true when this record stands in for a failed page.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        self.fetch_error.is_some()
    }
}

/// One week bucket of commit activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityWeek {
    /// Start of the week (UTC).
    pub week_start: DateTime<Utc>,
    /// Commits made during the week.
    pub commit_total: u64,
}

/// The six-month commit summary for one repository, or why it is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityReport {
    /// Statistics URL the summary was requested from.
    pub source_url: String,
    /// Repository the report describes.
    pub repository: RepositoryFullName,
    /// Sum of weekly commit totals inside the window.
    pub commit_summary: u64,
    /// Set when the statistics could not be obtained.
    pub error: Option<ActivityError>,
}

impl ActivityReport {
    /// Builds a report carrying a computed summary.
    #[must_use]
    pub const fn summarised(
        source_url: String,
        repository: RepositoryFullName,
        commit_summary: u64,
    ) -> Self {
        Self {
            source_url,
            repository,
            commit_summary,
            error: None,
        }
    }

    /// Builds a report carrying only an error.
    #[must_use]
    pub const fn failed(
        source_url: String,
        repository: RepositoryFullName,
        error: ActivityError,
    ) -> Self {
        Self {
            source_url,
            repository,
            commit_summary: 0,
            error: Some(error),
        }
    }
}

/// API response type for organization repository listings.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiRepository {
    pub(crate) full_name: String,
    pub(crate) pushed_at: Option<DateTime<Utc>>,
}

impl From<ApiRepository> for RepositoryRecord {
    fn from(value: ApiRepository) -> Self {
        match RepositoryFullName::parse(&value.full_name) {
            Ok(full_name) => Self::listed(full_name, value.pushed_at),
            Err(error) => Self::failed(error),
        }
    }
}

/// API response type for one `commit_activity` week.
#[derive(Debug, Clone, Deserialize)]
struct ApiActivityWeek {
    total: u64,
    week: i64,
}

/// Decodes a `commit_activity` response body.
///
/// # Errors
///
/// Returns [`ActivityError::Decode`] when the body is not a JSON array of
/// `{total, week}` objects or a week timestamp is out of range.
pub(crate) fn decode_activity_weeks(body: &str) -> Result<Vec<ActivityWeek>, ActivityError> {
    let weeks: Vec<ApiActivityWeek> =
        serde_json::from_str(body).map_err(|error| ActivityError::Decode {
            message: error.to_string(),
        })?;

    weeks
        .into_iter()
        .map(|api| {
            let week_start = Utc
                .timestamp_opt(api.week, 0)
                .single()
                .ok_or_else(|| ActivityError::Decode {
                    message: format!("week timestamp {} is out of range", api.week),
                })?;
            Ok(ActivityWeek {
                week_start,
                commit_total: api.total,
            })
        })
        .collect()
}
