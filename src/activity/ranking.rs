//! Ordering collected reports into the final ranking.

use regex::Regex;

use crate::github::locator::OrganizationName;
use crate::github::models::ActivityReport;

/// One line of the final report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRepository {
    /// Short repository name shown to the user.
    pub name: String,
    /// Commits inside the activity window.
    pub commit_summary: u64,
}

/// Ranks reports by commit summary, most active first.
///
/// Reports are stably sorted ascending and emitted in reverse, so ties come
/// out in reverse input order. Reports with a zero summary are skipped.
#[must_use]
pub fn rank(
    mut reports: Vec<ActivityReport>,
    organization: &OrganizationName,
) -> Vec<RankedRepository> {
    reports.sort_by_key(|report| report.commit_summary);
    let pattern = name_pattern(organization);
    reports
        .iter()
        .rev()
        .filter(|report| report.commit_summary > 0)
        .map(|report| RankedRepository {
            name: display_name(pattern.as_ref(), report),
            commit_summary: report.commit_summary,
        })
        .collect()
}

fn name_pattern(organization: &OrganizationName) -> Option<Regex> {
    let escaped = regex::escape(organization.as_str());
    Regex::new(&format!(r"(?i){escaped}/(\.?[a-zA-Z0-9].+)/stats")).ok()
}

fn display_name(pattern: Option<&Regex>, report: &ActivityReport) -> String {
    pattern
        .and_then(|regex| regex.captures(&report.source_url))
        .and_then(|captures| captures.get(1))
        .map_or_else(
            || report.repository.name().to_owned(),
            |matched| matched.as_str().to_owned(),
        )
}
