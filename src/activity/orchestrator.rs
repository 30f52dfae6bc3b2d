//! Statistics collection for every filtered repository.

use std::collections::HashSet;
use std::sync::Arc;

use crate::activity::poller::StatsPoller;
use crate::activity::worker_pool::run_pool;
use crate::github::gateway::CommitActivityGateway;
use crate::github::locator::RepositoryFullName;
use crate::github::models::ActivityReport;

/// Number of statistics polls allowed in flight at once.
pub const STATS_POOL_WIDTH: usize = 50;

/// Runs a [`StatsPoller`] per repository on a fixed-width worker pool.
pub struct StatsOrchestrator<G> {
    poller: Arc<StatsPoller<G>>,
}

impl<G> StatsOrchestrator<G>
where
    G: CommitActivityGateway + 'static,
{
    /// Wraps the poller shared by every worker.
    #[must_use]
    pub fn new(poller: StatsPoller<G>) -> Self {
        Self {
            poller: Arc::new(poller),
        }
    }

    /// Collects one report per repository, in completion order.
    ///
    /// A repository whose worker died without reporting gets a failed
    /// report appended after the rest.
    pub async fn collect(&self, repositories: Vec<RepositoryFullName>) -> Vec<ActivityReport> {
        let poller = Arc::clone(&self.poller);
        let mut reports = run_pool(STATS_POOL_WIDTH, repositories.clone(), move |repository| {
            let worker = Arc::clone(&poller);
            async move { worker.poll(&repository).await }
        })
        .await;

        if reports.len() < repositories.len() {
            let reported: HashSet<String> = reports
                .iter()
                .map(|report| report.repository.as_str().to_owned())
                .collect();
            reports.extend(
                repositories
                    .into_iter()
                    .filter(|repository| !reported.contains(repository.as_str()))
                    .map(|repository| self.poller.abandoned(repository)),
            );
        }
        reports
    }
}
