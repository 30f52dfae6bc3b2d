//! End-to-end activity ranking for one organization.

use std::sync::Arc;

use tracing::{info, warn};

use crate::activity::clock::Clock;
use crate::activity::listing::RepositoryLister;
use crate::activity::orchestrator::StatsOrchestrator;
use crate::activity::poller::StatsPoller;
use crate::activity::ranking::{RankedRepository, rank};
use crate::activity::recency::filter_recent;
use crate::github::error::ActivityError;
use crate::github::gateway::{CommitActivityGateway, RepositoryPageGateway};
use crate::github::locator::OrganizationName;
use crate::github::models::{ActivityReport, RepositoryRecord};

/// Lists, filters, polls and ranks the repositories of an organization.
///
/// No state is carried between organizations; each call starts afresh.
pub struct ActivityIntake<G> {
    gateway: Arc<G>,
    clock: Arc<dyn Clock>,
}

impl<G> ActivityIntake<G>
where
    G: RepositoryPageGateway + CommitActivityGateway + 'static,
{
    /// Creates an intake over a gateway serving both endpoints.
    #[must_use]
    pub const fn new(gateway: Arc<G>, clock: Arc<dyn Clock>) -> Self {
        Self { gateway, clock }
    }

    /// Produces the ranking for `organization`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the first listing page fails. Later page
    /// failures and statistics failures are logged and the affected
    /// repositories drop out of the ranking.
    pub async fn rank_organization(
        &self,
        organization: &OrganizationName,
    ) -> Result<Vec<RankedRepository>, ActivityError> {
        info!(
            organization = organization.as_str(),
            "grabbing list of all repositories"
        );
        let records = RepositoryLister::new(Arc::clone(&self.gateway))
            .list(organization)
            .await?;
        log_placeholders(&records);

        info!(
            organization = organization.as_str(),
            listed = records.len(),
            "filtering repositories pushed within six months"
        );
        let repositories: Vec<_> = filter_recent(records, self.clock.now())
            .into_iter()
            .filter_map(|record| record.full_name)
            .collect();

        info!(
            organization = organization.as_str(),
            repositories = repositories.len(),
            "collecting statistics for each repository"
        );
        let poller = StatsPoller::new(Arc::clone(&self.gateway), Arc::clone(&self.clock));
        let reports = StatsOrchestrator::new(poller).collect(repositories).await;
        log_failed_reports(&reports);

        Ok(rank(reports, organization))
    }
}

fn log_placeholders(records: &[RepositoryRecord]) {
    for error in records.iter().filter_map(|record| record.fetch_error.as_ref()) {
        warn!(%error, "listing page skipped");
    }
}

fn log_failed_reports(reports: &[ActivityReport]) {
    for report in reports {
        if let Some(error) = &report.error {
            warn!(
                repository = report.repository.as_str(),
                %error,
                "statistics unavailable; repository omitted from ranking"
            );
        }
    }
}
